//! Reconnection back-off and timer bookkeeping.

use std::time::Duration;
use tokio::task::JoinHandle;

/// Upper bound on the delay between reconnection attempts.
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Delay before reconnection attempt `attempt` (1-based): 2^attempt seconds,
/// capped at [`MAX_RECONNECT_DELAY`].
pub fn reconnect_delay(attempt: u32) -> Duration {
    let secs = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_secs(secs).min(MAX_RECONNECT_DELAY)
}

/// An armed reconnect as returned by [`ReconnectState::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAttempt {
    pub attempt: u32,
    pub delay: Duration,
    pub generation: u64,
}

/// Reconnect state machine data, guarded by the session lock.
///
/// Each armed timer carries the generation it was armed with; cancelling
/// bumps the generation, so a timer that fires after cancellation finds a
/// mismatch and does nothing.
#[derive(Debug, Default)]
pub struct ReconnectState {
    attempts: u32,
    pending: bool,
    manual_disconnect: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl ReconnectState {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_manual_disconnect(&self) -> bool {
        self.manual_disconnect
    }

    pub fn set_manual_disconnect(&mut self, manual: bool) {
        self.manual_disconnect = manual;
    }

    /// Claim the next attempt. `None` when one is already pending or the
    /// user disconnected on purpose.
    pub fn schedule(&mut self) -> Option<ScheduledAttempt> {
        if self.pending || self.manual_disconnect {
            return None;
        }
        self.pending = true;
        self.attempts += 1;
        self.generation += 1;
        Some(ScheduledAttempt {
            attempt: self.attempts,
            delay: reconnect_delay(self.attempts),
            generation: self.generation,
        })
    }

    /// Attach the timer task for the attempt just scheduled.
    pub fn arm(&mut self, timer: JoinHandle<()>) {
        if let Some(previous) = self.timer.replace(timer) {
            previous.abort();
        }
    }

    /// Called when a timer fires. Returns the attempt number if the timer is
    /// still the armed one.
    pub fn fire(&mut self, generation: u64) -> Option<u32> {
        if !self.pending || self.generation != generation {
            return None;
        }
        self.pending = false;
        self.timer = None;
        Some(self.attempts)
    }

    /// Cancel any pending timer, keeping the attempt count.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Cancel and start counting attempts from zero.
    pub fn reset(&mut self) {
        self.cancel();
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_sequence() {
        let delays: Vec<u64> = (1..=7).map(|n| reconnect_delay(n).as_secs()).collect();
        assert_eq!(delays, [2, 4, 8, 16, 32, 60, 60]);
        assert_eq!(reconnect_delay(200), MAX_RECONNECT_DELAY);
    }

    #[test]
    fn test_schedule_is_single_flight() {
        let mut state = ReconnectState::default();
        let first = state.schedule().unwrap();
        assert_eq!(first.attempt, 1);
        assert!(state.schedule().is_none());
        assert_eq!(state.attempts(), 1);
    }

    #[test]
    fn test_manual_disconnect_blocks_schedule() {
        let mut state = ReconnectState::default();
        state.set_manual_disconnect(true);
        assert!(state.schedule().is_none());
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn test_cancelled_timer_is_stale() {
        let mut state = ReconnectState::default();
        let scheduled = state.schedule().unwrap();
        state.cancel();
        assert_eq!(state.fire(scheduled.generation), None);

        let scheduled = state.schedule().unwrap();
        assert_eq!(scheduled.attempt, 2);
        assert_eq!(state.fire(scheduled.generation), Some(2));
        assert!(!state.is_pending());
    }

    #[test]
    fn test_reset_clears_attempts() {
        let mut state = ReconnectState::default();
        state.schedule();
        state.reset();
        assert_eq!(state.attempts(), 0);
        assert!(!state.is_pending());
        assert_eq!(state.schedule().unwrap().delay, Duration::from_secs(2));
    }
}
