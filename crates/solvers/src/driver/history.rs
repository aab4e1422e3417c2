use ndarray::Array1;

/// The best point and score after each completed iteration.
///
/// Entries are appended once per iteration and never removed, so the scores
/// form a non-increasing sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    x: Vec<Array1<f64>>,
    scores: Vec<f64>,
}

impl History {
    pub(super) fn push(&mut self, x: Array1<f64>, score: f64) {
        self.x.push(x);
        self.scores.push(score);
    }

    /// Best points, one per iteration.
    #[must_use]
    pub fn x(&self) -> &[Array1<f64>] {
        &self.x
    }

    /// Best scores, one per iteration.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterates over `(x, score)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Array1<f64>, f64)> + '_ {
        self.x.iter().zip(self.scores.iter().copied())
    }
}
