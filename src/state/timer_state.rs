//! Timer snapshot published to clients

use serde::{Deserialize, Serialize};

use super::RunState;
use crate::utils::format_time;

/// Point-in-time view of the countdown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    /// Last confirmed duration in seconds, if any
    pub duration: Option<u64>,
    pub time_left: u64,
    pub run_state: RunState,
    /// `time_left` rendered as `MM:SS`
    pub display: String,
}

impl TimerState {
    pub fn new(duration: Option<u64>, time_left: u64, run_state: RunState) -> Self {
        Self {
            duration,
            time_left,
            run_state,
            display: format_time(time_left),
        }
    }
}
