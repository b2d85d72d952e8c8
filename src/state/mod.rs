//! State management module
//!
//! This module contains the countdown state machine and the shared
//! application state that drives it.

pub mod app_state;
pub mod countdown;
pub mod run_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{ActionOutcome, AppState};
pub use countdown::{Countdown, TickOutcome};
pub use run_state::RunState;
pub use timer_state::TimerState;
