use ndarray::Array1;

/// A candidate solution and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// The candidate point.
    pub x: Array1<f64>,

    /// The score at `x`; lower is better.
    pub score: f64,
}

impl State {
    /// Creates a new state.
    #[must_use]
    pub fn new(x: Array1<f64>, score: f64) -> Self {
        Self { x, score }
    }
}
