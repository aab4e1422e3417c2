use ndarray::Array1;

use super::History;

/// Why an optimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The best score came within `tol` of the configured bound.
    Converged,

    /// No significant improvement for `no_improv_iter_limit` iterations.
    Stagnated,

    /// Reached the iteration limit.
    MaxIters,

    /// The algorithm reached a state it cannot advance from.
    ///
    /// Conjugate gradient reports this when a recurrence denominator vanishes.
    Halted,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an optimization run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final status.
    pub status: Status,

    /// Best point found.
    pub x: Array1<f64>,

    /// Score at the best point.
    pub score: f64,

    /// Best point and score after each iteration.
    pub history: History,

    /// Number of iterations executed; equals `history.len()`.
    pub iters: usize,
}
