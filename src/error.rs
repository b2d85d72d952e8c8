//! Library error type

use thiserror::Error;

/// Errors raised while driving the countdown
#[derive(Debug, Error)]
pub enum TimerError {
    /// A mutex guarding shared state was poisoned by a panicking holder
    #[error("failed to lock {0}: mutex poisoned")]
    LockPoisoned(&'static str),
}
