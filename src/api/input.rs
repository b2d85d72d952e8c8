//! Duration input as submitted by the control page

use serde::{Deserialize, Serialize};

/// Raw value of the duration field. The page may send the field text or a
/// number, depending on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DurationInput {
    /// Whole positive seconds, or `None` for anything the timer should ignore
    pub fn seconds(&self) -> Option<u64> {
        let seconds = match self {
            DurationInput::Integer(n) => u64::try_from(*n).ok()?,
            DurationInput::Float(f) => {
                if !f.is_finite() || f.fract() != 0.0 || *f < 1.0 || *f > u64::MAX as f64 {
                    return None;
                }
                *f as u64
            }
            DurationInput::Text(text) => text.trim().parse::<u64>().ok()?,
        };

        (seconds > 0).then_some(seconds)
    }
}

/// Body of `POST /duration`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    #[serde(default)]
    pub value: Option<DurationInput>,
}

impl DurationRequest {
    pub fn seconds(&self) -> Option<u64> {
        self.value.as_ref().and_then(DurationInput::seconds)
    }
}
