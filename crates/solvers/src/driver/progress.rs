use ndarray::Array1;

use super::{Config, Event, History, Solution, State, Status};

/// Iteration counters, best state, and history for a single run.
///
/// A run always has a best state: tracking starts with the first score.
pub(super) struct Progress {
    iters: usize,
    no_improv_iters: usize,
    best: State,
    history: History,
}

impl Progress {
    /// Starts tracking with the first completed iteration.
    ///
    /// The first score always counts as an improvement.
    pub(super) fn start(x: &Array1<f64>, score: f64) -> Self {
        let best = State::new(x.clone(), score);
        let mut history = History::default();
        history.push(best.x.clone(), best.score);

        Self {
            iters: 1,
            no_improv_iters: 0,
            best,
            history,
        }
    }

    /// Records a completed iteration.
    ///
    /// A strictly lower score replaces the best state, but only a decrease of
    /// more than `tol` resets the stagnation counter. Any non-NaN score
    /// replaces a NaN best.
    /// Returns true if the improvement was significant.
    pub(super) fn record(&mut self, x: &Array1<f64>, score: f64, tol: f64) -> bool {
        self.iters += 1;

        let replaces_nan = self.best.score.is_nan() && !score.is_nan();
        let significant = replaces_nan || score < self.best.score - tol;
        if replaces_nan || score < self.best.score {
            self.best = State::new(x.clone(), score);
        }

        if significant {
            self.no_improv_iters = 0;
        } else {
            self.no_improv_iters += 1;
        }

        self.history.push(self.best.x.clone(), self.best.score);
        significant
    }

    /// Returns the status to stop with, if a driver rule fires.
    ///
    /// Rules are checked in order: iteration limit, bound gap, stagnation.
    /// Stagnation is only considered when no bound is configured.
    pub(super) fn termination(&self, config: &Config) -> Option<Status> {
        if config.iter_limit().is_some_and(|limit| self.iters > limit) {
            return Some(Status::MaxIters);
        }

        match config.bound() {
            Some(bound) if self.best.score - bound < config.tol() => Some(Status::Converged),
            None if self.no_improv_iters >= config.no_improv_iter_limit() => {
                Some(Status::Stagnated)
            }
            _ => None,
        }
    }

    pub(super) fn event<'a>(&'a self, x: &'a Array1<f64>, score: f64) -> Event<'a> {
        Event {
            iter: self.iters,
            x,
            score,
            best: &self.best,
            no_improv_iters: self.no_improv_iters,
        }
    }

    pub(super) fn iters(&self) -> usize {
        self.iters
    }

    pub(super) fn best(&self) -> &State {
        &self.best
    }

    pub(super) fn into_solution(self, status: Status) -> Solution {
        Solution {
            status,
            x: self.best.x,
            score: self.best.score,
            history: self.history,
            iters: self.iters,
        }
    }
}
