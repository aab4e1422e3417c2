use ndarray::Array1;

use super::State;

/// Emitted by the driver after each completed iteration.
///
/// The iteration has already been recorded in the history when the observer
/// sees it.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter, starting at 1.
    pub iter: usize,

    /// The algorithm's current iterate.
    pub x: &'a Array1<f64>,

    /// Score of the current iterate.
    pub score: f64,

    /// Best state found so far.
    pub best: &'a State,

    /// Consecutive iterations without a significant improvement.
    pub no_improv_iters: usize,
}

/// Control actions an observer can request from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best solution found so far.
    StopEarly,
}
