//! Countdown ticker background task

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::watch,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::state::{Countdown, TickOutcome, TimerState};

/// Decrement the countdown once per `period` until it expires or the epoch
/// this ticker was started with goes stale.
///
/// The first tick lands one full period after spawning. Cancellation is the
/// owner's job: the handle is aborted by every action that changes the run
/// state.
pub async fn ticker_task(
    countdown: Arc<Mutex<Countdown>>,
    updates: Arc<watch::Sender<TimerState>>,
    epoch: u64,
    period: Duration,
) {
    debug!("Starting ticker (epoch {})", epoch);

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        // Publish while the countdown is still locked so an action that
        // follows this tick can never be overwritten by it.
        let outcome = match countdown.lock() {
            Ok(mut countdown) => {
                let outcome = countdown.tick(epoch);
                if outcome != TickOutcome::Ignored {
                    updates.send_replace(countdown.snapshot());
                }
                outcome
            }
            Err(e) => {
                error!("Failed to lock countdown: {}", e);
                break;
            }
        };

        match outcome {
            TickOutcome::Decremented(left) => {
                debug!("Tick: {}s left", left);
            }
            TickOutcome::Expired => {
                info!("Countdown reached zero");
                break;
            }
            TickOutcome::Ignored => {
                debug!("Ticker epoch {} is stale, stopping", epoch);
                break;
            }
        }
    }
}
