//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use super::{Countdown, TimerState};
use crate::{error::TimerError, tasks::ticker_task};

/// What an action did to the countdown
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// False when the action was a no-op
    pub applied: bool,
    pub timer: TimerState,
}

/// Owns the countdown, its single ticker, and server metadata
#[derive(Debug)]
pub struct AppState {
    countdown: Arc<Mutex<Countdown>>,
    /// The one live ticker, if any. Always locked before `countdown`.
    ticker: Mutex<Option<JoinHandle<()>>>,
    tick_period: Duration,
    /// Channel for timer updates
    timer_update_tx: Arc<watch::Sender<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(port: u16, host: String, tick_period: Duration) -> Self {
        let countdown = Countdown::new();
        let (timer_update_tx, _) = watch::channel(countdown.snapshot());

        Self {
            countdown: Arc::new(Mutex::new(countdown)),
            ticker: Mutex::new(None),
            tick_period,
            timer_update_tx: Arc::new(timer_update_tx),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Confirm a duration. `None` or zero is silently ignored.
    pub fn set_duration(&self, seconds: Option<u64>) -> Result<ActionOutcome, TimerError> {
        let Some(seconds) = seconds else {
            debug!("Ignoring empty duration input");
            return Ok(ActionOutcome {
                applied: false,
                timer: self.get_timer_state()?,
            });
        };

        self.apply("set-duration", |countdown, ticker| {
            if !countdown.set_duration(seconds) {
                return false;
            }
            cancel(ticker);
            info!("Duration set to {}s", seconds);
            true
        })
    }

    pub fn start(&self) -> Result<ActionOutcome, TimerError> {
        self.apply("start", |countdown, ticker| {
            let Some(epoch) = countdown.start() else {
                return false;
            };
            cancel(ticker);
            *ticker = Some(tokio::spawn(ticker_task(
                Arc::clone(&self.countdown),
                Arc::clone(&self.timer_update_tx),
                epoch,
                self.tick_period,
            )));
            info!("Countdown started with {}s left", countdown.time_left());
            true
        })
    }

    pub fn pause(&self) -> Result<ActionOutcome, TimerError> {
        self.apply("pause", |countdown, ticker| {
            if !countdown.pause() {
                return false;
            }
            cancel(ticker);
            info!("Countdown paused at {}s", countdown.time_left());
            true
        })
    }

    pub fn reset(&self) -> Result<ActionOutcome, TimerError> {
        self.apply("reset", |countdown, ticker| {
            countdown.reset();
            cancel(ticker);
            info!("Countdown reset to {}s", countdown.time_left());
            true
        })
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, TimerError> {
        Ok(self.lock_countdown()?.snapshot())
    }

    /// Watch every snapshot the countdown publishes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last applied action and when it happened
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = match self.last_action.lock() {
            Ok(last_action) => last_action.clone(),
            Err(e) => {
                warn!("Failed to lock last action: {}", e);
                None
            }
        };

        match last_action {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    /// Run one action with the ticker and countdown locked, and publish the
    /// result before either lock is released.
    ///
    /// Holding the ticker lock for the whole action keeps cancel-before-create
    /// atomic with respect to other actions. Publishing under the countdown
    /// lock keeps the channel in the same order as the controller.
    fn apply<F>(&self, action: &str, updater: F) -> Result<ActionOutcome, TimerError>
    where
        F: FnOnce(&mut Countdown, &mut Option<JoinHandle<()>>) -> bool,
    {
        let mut ticker = self
            .ticker
            .lock()
            .map_err(|_| TimerError::LockPoisoned("ticker"))?;
        let mut countdown = self.lock_countdown()?;

        let applied = updater(&mut *countdown, &mut *ticker);
        let timer = countdown.snapshot();
        if applied {
            self.timer_update_tx.send_replace(timer.clone());
        }
        drop(countdown);
        drop(ticker);

        if applied {
            match self.last_action.lock() {
                Ok(mut last_action) => *last_action = Some((action.to_string(), Utc::now())),
                Err(e) => warn!("Failed to record last action {}: {}", action, e),
            }
        } else {
            debug!("Action {} had no effect", action);
        }

        Ok(ActionOutcome { applied, timer })
    }

    fn lock_countdown(&self) -> Result<MutexGuard<'_, Countdown>, TimerError> {
        self.countdown
            .lock()
            .map_err(|_| TimerError::LockPoisoned("countdown"))
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        match self.ticker.get_mut() {
            Ok(ticker) => cancel(ticker),
            Err(_) => warn!("Ticker lock poisoned on shutdown"),
        }
    }
}

fn cancel(ticker: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = ticker.take() {
        handle.abort();
    }
}
