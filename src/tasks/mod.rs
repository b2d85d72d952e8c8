//! Background tasks module
//!
//! This module contains the task that drives the countdown while it runs.

pub mod ticker;

// Re-export main functions
pub use ticker::ticker_task;
