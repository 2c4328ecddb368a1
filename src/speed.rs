use std::time::Duration;

/// Score-driven game speed.
///
/// The tick interval is `floor(base / multiplier)` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedController {
    multiplier: f64,
    base_interval_ms: u64,
    tick_interval_ms: u64,
}

impl SpeedController {
    #[must_use]
    pub fn new(base_interval_ms: u64) -> Self {
        Self {
            multiplier: 1.0,
            base_interval_ms,
            tick_interval_ms: base_interval_ms,
        }
    }

    /// Steps the multiplier up when `score` is a non-zero multiple of
    /// `threshold`. Returns whether a level-up happened.
    ///
    /// This is evaluated on every food eaten, so a score that skips over a
    /// multiple never levels up and landing on one always does.
    pub fn maybe_level_up(&mut self, score: u32, threshold: u32, step: f64) -> bool {
        if threshold == 0 || score == 0 || score % threshold != 0 {
            return false;
        }

        self.multiplier += step;
        self.tick_interval_ms = (self.base_interval_ms as f64 / self.multiplier).floor() as u64;
        true
    }

    pub fn reset(&mut self) {
        self.multiplier = 1.0;
        self.tick_interval_ms = self.base_interval_ms;
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
