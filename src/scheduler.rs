use std::time::{Duration, Instant};

/// Decides when the driver loop should run the next simulation tick.
///
/// The interval is passed in on every check so speed changes take effect
/// right after the tick that caused them.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    last_tick: Instant,
}

impl TickScheduler {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self { last_tick: now }
    }

    /// Returns true and re-arms the timer when `interval` has elapsed.
    pub fn is_due(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_tick) < interval {
            return false;
        }

        self.last_tick = now;
        true
    }

    /// Re-arms the timer without ticking, e.g. after resuming from pause.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self, now: Instant, interval: Duration) -> Duration {
        interval.saturating_sub(now.saturating_duration_since(self.last_tick))
    }
}
