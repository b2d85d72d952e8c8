//! Countdown controller: the state machine behind the timer
//!
//! The controller is synchronous and owns no timer itself. Whoever drives it
//! (see [`crate::tasks::ticker`]) calls [`Countdown::tick`] once per period
//! with the epoch it was handed by [`Countdown::start`].

use tracing::debug;

use super::{RunState, TimerState};

/// Result of applying a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or the tick came from a cancelled ticker
    Ignored,
    /// One second elapsed, carries the new remaining time
    Decremented(u64),
    /// Remaining time hit zero; the ticker must stop
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    duration: Option<u64>,
    time_left: u64,
    run_state: RunState,
    /// Bumped on every run-state change so stale ticks can be told apart
    epoch: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Confirm a new duration. Zero is rejected without touching any state.
    pub fn set_duration(&mut self, seconds: u64) -> bool {
        if seconds == 0 {
            debug!("Ignoring non-positive duration");
            return false;
        }

        self.duration = Some(seconds);
        self.time_left = seconds;
        self.enter(RunState::Idle);
        true
    }

    /// Begin or resume ticking. Returns the epoch the new ticker must carry,
    /// or `None` when nothing changed (already running or nothing left).
    pub fn start(&mut self) -> Option<u64> {
        if self.time_left == 0 || self.run_state.is_running() {
            return None;
        }

        self.enter(RunState::Running);
        Some(self.epoch)
    }

    pub fn pause(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }

        self.enter(RunState::Paused);
        true
    }

    /// Back to idle with the last confirmed duration (or zero) loaded
    pub fn reset(&mut self) {
        self.time_left = self.duration.unwrap_or(0);
        self.enter(RunState::Idle);
    }

    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if !self.run_state.is_running() || epoch != self.epoch {
            return TickOutcome::Ignored;
        }

        if self.time_left <= 1 {
            self.time_left = 0;
            self.enter(RunState::Idle);
            return TickOutcome::Expired;
        }

        self.time_left -= 1;
        TickOutcome::Decremented(self.time_left)
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState::new(self.duration, self.time_left, self.run_state)
    }

    fn enter(&mut self, run_state: RunState) {
        self.run_state = run_state;
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seconds: u64) -> (Countdown, u64) {
        let mut countdown = Countdown::new();
        assert!(countdown.set_duration(seconds));
        let epoch = countdown.start().expect("start should take effect");
        (countdown, epoch)
    }

    #[test]
    fn set_duration_loads_time_and_formats() {
        for seconds in [1, 9, 59, 60, 65, 599, 3599, 3600] {
            let mut countdown = Countdown::new();
            assert!(countdown.set_duration(seconds));
            let expected = format!("{:02}:{:02}", seconds / 60, seconds % 60);
            assert_eq!(countdown.snapshot().display, expected);
            assert_eq!(countdown.run_state(), RunState::Idle);
        }
    }

    #[test]
    fn zero_duration_changes_nothing() {
        let mut countdown = Countdown::new();
        countdown.set_duration(30);
        let before = countdown.epoch();

        assert!(!countdown.set_duration(0));
        assert_eq!(countdown.time_left(), 30);
        assert_eq!(countdown.duration(), Some(30));
        assert_eq!(countdown.epoch(), before);
    }

    #[test]
    fn start_without_time_is_noop() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.start(), None);
        assert_eq!(countdown.run_state(), RunState::Idle);
    }

    #[test]
    fn start_while_running_keeps_epoch() {
        let (mut countdown, epoch) = running(10);
        assert_eq!(countdown.start(), None);
        assert_eq!(countdown.epoch(), epoch);
    }

    #[test]
    fn pause_only_from_running() {
        let mut countdown = Countdown::new();
        countdown.set_duration(10);
        assert!(!countdown.pause());
        assert_eq!(countdown.run_state(), RunState::Idle);

        countdown.start();
        assert!(countdown.pause());
        assert!(!countdown.pause());
        assert_eq!(countdown.run_state(), RunState::Paused);
        assert_eq!(countdown.time_left(), 10);
    }

    #[test]
    fn reset_restores_confirmed_duration_from_any_state() {
        let (mut countdown, epoch) = running(20);
        countdown.tick(epoch);
        countdown.reset();
        assert_eq!(countdown.time_left(), 20);
        assert_eq!(countdown.run_state(), RunState::Idle);

        let epoch = countdown.start().unwrap();
        countdown.tick(epoch);
        countdown.pause();
        countdown.reset();
        assert_eq!(countdown.time_left(), 20);
        assert_eq!(countdown.run_state(), RunState::Idle);
    }

    #[test]
    fn reset_without_duration_zeroes() {
        let mut countdown = Countdown::new();
        countdown.reset();
        assert_eq!(countdown.time_left(), 0);
        assert_eq!(countdown.duration(), None);
    }

    #[test]
    fn pause_resume_reset_scenario() {
        let (mut countdown, epoch) = running(65);
        for _ in 0..5 {
            countdown.tick(epoch);
        }
        assert_eq!(countdown.time_left(), 60);
        assert_eq!(countdown.snapshot().display, "01:00");

        assert!(countdown.pause());
        assert_eq!(countdown.tick(epoch), TickOutcome::Ignored);
        assert_eq!(countdown.time_left(), 60);

        let resumed = countdown.start().unwrap();
        assert_eq!(countdown.tick(resumed), TickOutcome::Decremented(59));

        countdown.reset();
        assert_eq!(countdown.time_left(), 65);
        assert_eq!(countdown.run_state(), RunState::Idle);
    }

    #[test]
    fn stale_epoch_is_ignored() {
        let (mut countdown, first) = running(10);
        countdown.pause();
        let second = countdown.start().unwrap();

        assert_eq!(countdown.tick(first), TickOutcome::Ignored);
        assert_eq!(countdown.tick(second), TickOutcome::Decremented(9));
    }

    #[test]
    fn expiry_stops_at_zero_and_goes_idle() {
        let (mut countdown, epoch) = running(2);
        assert_eq!(countdown.tick(epoch), TickOutcome::Decremented(1));
        assert_eq!(countdown.tick(epoch), TickOutcome::Expired);
        assert_eq!(countdown.time_left(), 0);
        assert_eq!(countdown.snapshot().display, "00:00");
        assert_eq!(countdown.run_state(), RunState::Idle);

        assert_eq!(countdown.tick(epoch), TickOutcome::Ignored);
        assert_eq!(countdown.start(), None);
    }
}
