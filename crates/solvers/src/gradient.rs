//! Gradient descent with backtracking line search.
//!
//! # Algorithm
//!
//! Each update picks a step `alpha` by [backtracking](crate::line_search)
//! along the negative gradient at `x`, then moves according to the [`Method`]:
//!
//! - [`Method::Plain`] — `x ← x - alpha·∇f(x)`
//! - [`Method::Momentum`] — `v ← momentum·v - alpha·∇f(x)`, then `x ← x + v`
//! - [`Method::Nesterov`] — as momentum, but the gradient in the velocity
//!   update is taken at the look-ahead point `x + momentum·v`
//!
//! The velocity starts at zero, so momentum `0` reproduces plain descent
//! step for step.
//!
//! # Score and Termination
//!
//! The score is `|∇f(x)|`. The natural driver config is
//! [`Config::bounded(0.0, tol)`](Config::bounded), which stops once the
//! gradient norm falls below `tol`.

mod params;


pub use params::{DEFAULT_MOMENTUM, Method, Params};

use gradus_core::{Gradient, Objective, Observer};
use ndarray::Array1;

use crate::{
    Error,
    driver::{Action, Algorithm, Config, Driver, Event, Solution},
    evaluate, line_search,
};

/// Gradient descent as a driver [`Algorithm`].
pub struct GradientDescent<'a, O, G> {
    objective: &'a O,
    gradient: &'a G,
    params: Params,
    start: Array1<f64>,
    x: Array1<f64>,
    velocity: Array1<f64>,
    /// Gradient at `x`, kept between scoring and updating.
    gradient_at_x: Option<Array1<f64>>,
}

impl<'a, O, G> GradientDescent<'a, O, G>
where
    O: Objective,
    G: Gradient,
{
    /// Creates gradient descent from `start_x`.
    #[must_use]
    pub fn new(objective: &'a O, gradient: &'a G, start_x: Array1<f64>, params: Params) -> Self {
        let velocity = Array1::zeros(start_x.len());
        Self {
            objective,
            gradient,
            params,
            x: start_x.clone(),
            start: start_x,
            velocity,
            gradient_at_x: None,
        }
    }

    /// Returns the current velocity (always zero for plain descent).
    #[must_use]
    pub fn velocity(&self) -> &Array1<f64> {
        &self.velocity
    }

    fn gradient_at_x(&mut self) -> Result<Array1<f64>, Error> {
        if let Some(g) = &self.gradient_at_x {
            return Ok(g.clone());
        }
        let g = evaluate::gradient(self.gradient, &self.x)?;
        self.gradient_at_x = Some(g.clone());
        Ok(g)
    }
}

impl<O, G> Algorithm for GradientDescent<'_, O, G>
where
    O: Objective,
    G: Gradient,
{
    fn init(&mut self) -> Result<(), Error> {
        if self.start.is_empty() {
            return Err(Error::EmptyStart);
        }
        self.x = self.start.clone();
        self.velocity = Array1::zeros(self.start.len());
        self.gradient_at_x = None;
        Ok(())
    }

    fn score(&mut self) -> Result<f64, Error> {
        let g = self.gradient_at_x()?;
        Ok(evaluate::norm(&g))
    }

    fn x(&self) -> &Array1<f64> {
        &self.x
    }

    fn update(&mut self) -> Result<(), Error> {
        let g = self.gradient_at_x()?;
        let step = line_search::backtrack(self.objective, &self.x, &g, self.params.line_search())?;
        let alpha = step.alpha;

        match self.params.method() {
            Method::Plain => {
                self.x = &self.x - &(&g * alpha);
            }
            Method::Momentum { momentum } => {
                self.velocity = &self.velocity * momentum - &(&g * alpha);
                self.x = &self.x + &self.velocity;
            }
            Method::Nesterov { momentum } => {
                let look_ahead = &self.x + &(&self.velocity * momentum);
                let g_ahead = evaluate::gradient(self.gradient, &look_ahead)?;
                self.velocity = &self.velocity * momentum - &(&g_ahead * alpha);
                self.x = &self.x + &self.velocity;
            }
        }

        self.gradient_at_x = None;
        Ok(())
    }
}

/// Minimizes the objective by gradient descent.
///
/// The observer receives an [`Event`] after each iteration.
/// See the [driver docs](crate::driver) for event timing and termination rules.
///
/// # Errors
///
/// Returns an error if `start_x` is empty, if the gradient returns a vector of
/// the wrong length, or if the objective or gradient fails.
pub fn minimize<O, G, Obs>(
    objective: &O,
    gradient: &G,
    start_x: Array1<f64>,
    params: Params,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    O: Objective,
    G: Gradient,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let algorithm = GradientDescent::new(objective, gradient, start_x, params);
    Driver::new(algorithm, *config).optimize(observer)
}

/// Minimizes the objective by gradient descent without observer support.
///
/// # Errors
///
/// Returns an error if `start_x` is empty, if the gradient returns a vector of
/// the wrong length, or if the objective or gradient fails.
pub fn minimize_unobserved<O, G>(
    objective: &O,
    gradient: &G,
    start_x: Array1<f64>,
    params: Params,
    config: &Config,
) -> Result<Solution, Error>
where
    O: Objective,
    G: Gradient,
{
    minimize(objective, gradient, start_x, params, config, ())
}
