//! Nelder-Mead simplex search.
//!
//! A derivative-free minimizer that keeps `n + 1` scored points in `n`
//! dimensions and moves the worst of them each update.
//!
//! # Algorithm
//!
//! The initial simplex is the start point plus one point per dimension with
//! that coordinate advanced by `step`. Each update computes the centroid `x0`
//! of every point except the worst, then tries in order:
//!
//! 1. Reflection `xr = x0 + alpha·(x0 - worst)`. Accepted if it scores at
//!    least as well as the best point but below the second worst.
//! 2. Expansion `xe = x0 + gamma·(x0 - worst)`, only when `xr` beats the best
//!    point. The better of `xe` and `xr` replaces the worst.
//! 3. Contraction `xc = x0 + rho·(x0 - worst)`. Accepted if it beats the
//!    worst point.
//! 4. Shrink every point toward the best: `p ← best + sigma·(p - best)`.
//!
//! Points are kept sorted by score, ties in insertion order.
//!
//! # Score and Termination
//!
//! The score is the lowest objective value in the simplex. There is no
//! natural bound, so the usual driver config is
//! [`Config::stagnating(1e-7, 10)`](Config::stagnating).

mod params;
mod simplex;

#[cfg(test)]
mod tests;

pub use params::Params;

use gradus_core::{Objective, Observer};
use ndarray::Array1;
use tracing::trace;

use crate::{
    Error,
    driver::{Action, Algorithm, Config, Driver, Event, Solution, State},
    evaluate,
};

use simplex::Simplex;

/// The transformation applied by the most recent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The reflected point replaced the worst vertex.
    Reflect,

    /// The expanded point replaced the worst vertex.
    Expand,

    /// The contracted point replaced the worst vertex.
    Contract,

    /// Every vertex moved toward the best one.
    Shrink,
}

/// Nelder-Mead as a driver [`Algorithm`].
pub struct NelderMead<'a, O> {
    objective: &'a O,
    params: Params,
    start: Array1<f64>,
    simplex: Simplex,
    last_move: Option<Move>,
}

impl<'a, O: Objective> NelderMead<'a, O> {
    /// Creates a simplex search from `start_x`.
    #[must_use]
    pub fn new(objective: &'a O, start_x: Array1<f64>, params: Params) -> Self {
        Self {
            objective,
            params,
            start: start_x,
            simplex: Simplex::default(),
            last_move: None,
        }
    }

    /// Returns the simplex points, best first once scored.
    #[must_use]
    pub fn simplex(&self) -> &[State] {
        self.simplex.points()
    }

    /// Returns the transformation applied by the last update, if any.
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    fn step(&mut self) -> Result<Move, Error> {
        if self.simplex.is_empty() {
            return Err(Error::EmptyStart);
        }

        let params = self.params;
        let x0 = self.simplex.centroid();
        let away = &x0 - &self.simplex.worst().x;
        let best = self.simplex.best().score;

        let reflected = self.state_at(&x0 + &(&away * params.alpha()))?;
        if best <= reflected.score && reflected.score < self.simplex.second_worst().score {
            self.simplex.replace_worst(reflected);
            return Ok(Move::Reflect);
        }

        if reflected.score < best {
            let expanded = self.state_at(&x0 + &(&away * params.gamma()))?;
            if expanded.score < reflected.score {
                self.simplex.replace_worst(expanded);
                return Ok(Move::Expand);
            }
            self.simplex.replace_worst(reflected);
            return Ok(Move::Reflect);
        }

        let contracted = self.state_at(&x0 + &(&away * params.rho()))?;
        if contracted.score < self.simplex.worst().score {
            self.simplex.replace_worst(contracted);
            return Ok(Move::Contract);
        }

        self.simplex
            .shrink(params.sigma(), |x| evaluate::objective(self.objective, x))?;
        Ok(Move::Shrink)
    }

    fn state_at(&self, x: Array1<f64>) -> Result<State, Error> {
        let score = evaluate::objective(self.objective, &x)?;
        Ok(State::new(x, score))
    }
}

impl<O: Objective> Algorithm for NelderMead<'_, O> {
    fn init(&mut self) -> Result<(), Error> {
        if self.start.is_empty() {
            return Err(Error::EmptyStart);
        }
        self.simplex = Simplex::around(&self.start, self.params.step(), |x| {
            evaluate::objective(self.objective, x)
        })?;
        self.last_move = None;
        Ok(())
    }

    /// Sorts the simplex and reports its best score.
    ///
    /// Fails with [`Error::EmptyStart`] until `init` has built the simplex.
    fn score(&mut self) -> Result<f64, Error> {
        if self.simplex.is_empty() {
            return Err(Error::EmptyStart);
        }
        self.simplex.sort();
        Ok(self.simplex.best().score)
    }

    fn x(&self) -> &Array1<f64> {
        self.simplex.points().first().map_or(&self.start, |p| &p.x)
    }

    fn update(&mut self) -> Result<(), Error> {
        let applied = self.step()?;
        trace!(?applied, "simplex update");
        self.last_move = Some(applied);
        Ok(())
    }
}

/// Minimizes the objective by Nelder-Mead simplex search.
///
/// The observer receives an [`Event`] after each iteration.
/// See the [driver docs](crate::driver) for event timing and termination rules.
///
/// # Errors
///
/// Returns an error if `start_x` is empty or if the objective fails.
pub fn minimize<O, Obs>(
    objective: &O,
    start_x: Array1<f64>,
    params: Params,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    Driver::new(NelderMead::new(objective, start_x, params), *config).optimize(observer)
}

/// Minimizes the objective by Nelder-Mead without observer support.
///
/// # Errors
///
/// Returns an error if `start_x` is empty or if the objective fails.
pub fn minimize_unobserved<O: Objective>(
    objective: &O,
    start_x: Array1<f64>,
    params: Params,
    config: &Config,
) -> Result<Solution, Error> {
    minimize(objective, start_x, params, config, ())
}
