//! The shared iterate/terminate/track-best loop.
//!
//! # Algorithm
//!
//! A [`Driver`] owns an [`Algorithm`] and a [`Config`]. Each call to
//! [`Driver::optimize`]:
//!
//! 1. Calls [`Algorithm::init`], which restarts from the stored start point.
//! 2. Scores the current iterate and records it as the first iteration.
//! 3. Emits an [`Event`], then checks termination.
//! 4. If the run continues, calls [`Algorithm::update`], scores the new
//!    iterate, records it, and repeats from step 3.
//!
//! # Termination
//!
//! Checked after every iteration, first match wins:
//!
//! - [`Status::MaxIters`] — more than `iter_limit` iterations have completed
//! - [`Status::Converged`] — a bound is set and `best.score - bound < tol`
//! - [`Status::Stagnated`] — no bound is set and the last
//!   `no_improv_iter_limit` iterations each failed to improve the best score
//!   by more than `tol`
//! - [`Status::Halted`] — [`Algorithm::halted`] returned true
//!
//! With a bound, a plateau above it never stagnates; the run continues until
//! it reaches the bound or the iteration limit.
//!
//! # Observer Events
//!
//! The driver emits one [`Event`] per iteration, after the iteration has been
//! recorded in the history. Observers can return [`Action::StopEarly`] to end
//! the run with [`Status::StoppedByObserver`].

mod config;
mod event;
mod history;
mod progress;
mod solution;
mod state;


pub use config::Config;
pub use event::{Action, Event};
pub use history::History;
pub use solution::{Solution, Status};
pub use state::State;

use gradus_core::Observer;
use ndarray::Array1;
use tracing::{debug, trace};

use crate::Error;

use progress::Progress;

/// The update rule of an iterative optimizer.
///
/// The driver owns the loop; implementations own their working vectors.
pub trait Algorithm {
    /// Resets working state to the stored start point.
    ///
    /// # Errors
    ///
    /// Returns an error if the start point or problem data are invalid, or if
    /// a collaborator fails during setup.
    fn init(&mut self) -> Result<(), Error>;

    /// Scores the current iterate. Lower is better.
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator fails.
    fn score(&mut self) -> Result<f64, Error>;

    /// Returns the current iterate.
    fn x(&self) -> &Array1<f64>;

    /// Advances to the next iterate.
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator fails.
    fn update(&mut self) -> Result<(), Error>;

    /// Returns true if the algorithm cannot make further progress.
    ///
    /// Checked after the driver's own termination rules.
    fn halted(&self) -> bool {
        false
    }
}

/// Runs an [`Algorithm`] under a convergence [`Config`].
#[derive(Debug, Clone)]
pub struct Driver<A> {
    algorithm: A,
    config: Config,
}

impl<A: Algorithm> Driver<A> {
    /// Creates a driver for `algorithm`.
    #[must_use]
    pub fn new(algorithm: A, config: Config) -> Self {
        Self { algorithm, config }
    }

    /// Returns the convergence config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the algorithm in its current state.
    #[must_use]
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Consumes the driver and returns the algorithm.
    pub fn into_algorithm(self) -> A {
        self.algorithm
    }

    /// Runs the algorithm from its start point until a termination rule fires.
    ///
    /// Every call starts fresh, so repeated calls return identical solutions
    /// for deterministic collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm fails to initialize, score, or update.
    pub fn optimize<Obs>(&mut self, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        self.algorithm.init()?;
        let mut score = self.algorithm.score()?;
        let mut progress = Progress::start(self.algorithm.x(), score);

        loop {
            let event = progress.event(self.algorithm.x(), score);
            trace!(
                iter = event.iter,
                score,
                best = event.best.score,
                no_improv_iters = event.no_improv_iters,
                "iteration"
            );

            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(finish(progress, Status::StoppedByObserver));
            }

            let status = progress
                .termination(&self.config)
                .or_else(|| self.algorithm.halted().then_some(Status::Halted));
            if let Some(status) = status {
                return Ok(finish(progress, status));
            }

            self.algorithm.update()?;
            score = self.algorithm.score()?;
            progress.record(self.algorithm.x(), score, self.config.tol());
        }
    }

    /// Runs the algorithm without observer support.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm fails to initialize, score, or update.
    pub fn optimize_unobserved(&mut self) -> Result<Solution, Error> {
        self.optimize(())
    }
}

fn finish(progress: Progress, status: Status) -> Solution {
    debug!(
        ?status,
        iters = progress.iters(),
        score = progress.best().score,
        "optimizer finished"
    );
    progress.into_solution(status)
}
