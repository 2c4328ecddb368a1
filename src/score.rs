use crate::config::HIGH_SCORE_CAPACITY;

/// Current round score plus the best scores seen in this process.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScoreTracker {
    score: u32,
    high_scores: Vec<u32>,
    capacity: usize,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(HIGH_SCORE_CAPACITY)
    }
}

impl ScoreTracker {
    /// Creates a tracker that keeps the best `capacity` round scores.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            score: 0,
            high_scores: Vec::new(),
            capacity,
        }
    }

    pub fn add(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Files the current score into the history, best first.
    pub fn record_round_end(&mut self) {
        self.high_scores.push(self.score);
        self.high_scores.sort_unstable_by(|a, b| b.cmp(a));
        self.high_scores.truncate(self.capacity);
    }

    /// Zeroes the current score; the history survives.
    pub fn reset(&mut self) {
        self.score = 0;
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best scores in descending order.
    #[must_use]
    pub fn high_scores(&self) -> &[u32] {
        &self.high_scores
    }

    /// Highest recorded score, or 0 before the first round ends.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.high_scores.first().copied().unwrap_or(0)
    }
}
