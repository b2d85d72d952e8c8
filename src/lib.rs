//! Countdown Timer - a countdown with start/pause/reset controls
//!
//! This library provides the countdown state machine, the ticker that drives
//! it, and the HTTP surface used to control and observe it.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TimerError;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
