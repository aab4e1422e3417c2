//! Backtracking line search with a two-sided sufficient-decrease test.
//!
//! Starting from `alpha0`, the step is shrunk by `rho` until the objective at
//! `x - alpha·g` lies inside the bracket
//!
//! ```text
//! [f(x) - beta2·alpha·|g|², f(x) - beta1·alpha·|g|²]
//! ```
//!
//! with `beta2 = 1 - beta1`. The upper edge demands enough decrease; the lower
//! edge rejects steps so short that the decrease is nearly linear.
//!
//! If shrinking would push `alpha` below the floor `tol`, the search returns
//! the last step above the floor instead of looping on an objective whose
//! bracket is never met.

use gradus_core::{Gradient, Objective};
use ndarray::Array1;
use tracing::debug;

use crate::{ConfigError, Error, error::in_unit_interval, evaluate};

/// Parameters for the backtracking line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backtracking {
    rho: f64,
    alpha0: f64,
    beta1: f64,
    tol: f64,
}

impl Default for Backtracking {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(0.7, 1.0, 0.3, 1e-17).unwrap()
    }
}

impl Backtracking {
    /// Creates validated line search parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `rho` is outside `(0, 1)`, `alpha0` is not finite
    /// and positive, `beta1` is outside `(0, 0.5]`, or `tol` is not finite and
    /// positive.
    pub fn new(rho: f64, alpha0: f64, beta1: f64, tol: f64) -> Result<Self, ConfigError> {
        if !in_unit_interval(rho) {
            return Err(ConfigError::Rho);
        }
        if !alpha0.is_finite() || alpha0 <= 0.0 {
            return Err(ConfigError::Alpha0);
        }
        if !(beta1 > 0.0 && beta1 <= 0.5) {
            return Err(ConfigError::Beta1);
        }
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::LineSearchTol);
        }

        Ok(Self {
            rho,
            alpha0,
            beta1,
            tol,
        })
    }

    /// Returns the shrink factor.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns the initial step.
    #[must_use]
    pub fn alpha0(&self) -> f64 {
        self.alpha0
    }

    /// Returns the coefficient of the sufficient-decrease (upper) edge.
    #[must_use]
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    /// Returns the coefficient of the short-step (lower) edge, `1 - beta1`.
    #[must_use]
    pub fn beta2(&self) -> f64 {
        1.0 - self.beta1
    }

    /// Returns the step floor.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }
}

/// The step chosen by a line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The step size.
    pub alpha: f64,

    /// Number of candidate steps evaluated.
    pub trials: usize,

    /// True if the bracket was never met and `alpha` is the last step above
    /// the floor.
    pub floored: bool,
}

/// Searches along `-gradient` from `x`, with the gradient given as a vector.
///
/// # Errors
///
/// Returns an error if `gradient` and `x` differ in length, or if the
/// objective fails.
pub fn backtrack<O: Objective>(
    objective: &O,
    x: &Array1<f64>,
    gradient: &Array1<f64>,
    params: &Backtracking,
) -> Result<Step, Error> {
    Error::check_dim("line search gradient", x.len(), gradient.len())?;

    let fx = evaluate::objective(objective, x)?;
    let slope = gradient.dot(gradient);

    let mut alpha = params.alpha0();
    let mut trials = 0;

    loop {
        trials += 1;
        let candidate = x - &(gradient * alpha);
        let f_candidate = evaluate::objective(objective, &candidate)?;

        let upper = fx - params.beta1() * alpha * slope;
        let lower = fx - params.beta2() * alpha * slope;
        if f_candidate <= upper && f_candidate >= lower {
            return Ok(Step {
                alpha,
                trials,
                floored: false,
            });
        }

        let previous = alpha;
        alpha *= params.rho();
        if alpha < params.tol() {
            debug!(alpha = previous, trials, "line search reached step floor");
            return Ok(Step {
                alpha: previous,
                trials,
                floored: true,
            });
        }
    }
}

/// Searches along `-∇f(x)` from `x`, evaluating the gradient at `x`.
///
/// Accepts exactly the steps [`backtrack`] accepts for the vector `∇f(x)`.
///
/// # Errors
///
/// Returns an error if the gradient or objective fails, or if the gradient
/// does not match `x` in length.
pub fn backtrack_with<O: Objective, G: Gradient>(
    objective: &O,
    gradient: &G,
    x: &Array1<f64>,
    params: &Backtracking,
) -> Result<Step, Error> {
    let g = evaluate::gradient(gradient, x)?;
    backtrack(objective, x, &g, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use proptest::prelude::*;

    fn square(x: &Array1<f64>) -> f64 {
        x.dot(x)
    }

    fn square_gradient(x: &Array1<f64>) -> Array1<f64> {
        2.0 * x
    }

    /// Checks the two-sided test for a scalar objective `f` at `x` along `g`.
    fn within_bracket(f: impl Fn(f64) -> f64, x: f64, g: f64, alpha: f64, beta1: f64) -> bool {
        let fx = f(x);
        let f_candidate = f(x - alpha * g);
        let upper = fx - beta1 * alpha * (g * g);
        let lower = fx - (1.0 - beta1) * alpha * (g * g);
        f_candidate <= upper && f_candidate >= lower
    }

    #[test]
    fn default_params() {
        let params = Backtracking::default();

        assert_relative_eq!(params.rho(), 0.7);
        assert_relative_eq!(params.alpha0(), 1.0);
        assert_relative_eq!(params.beta1(), 0.3);
        assert_relative_eq!(params.beta2(), 0.7);
        assert_relative_eq!(params.tol(), 1e-17);
    }

    #[test]
    fn rejects_invalid_params() {
        assert_eq!(Backtracking::new(1.0, 1.0, 0.3, 1e-17), Err(ConfigError::Rho));
        assert_eq!(Backtracking::new(0.7, 0.0, 0.3, 1e-17), Err(ConfigError::Alpha0));
        assert_eq!(Backtracking::new(0.7, 1.0, 0.6, 1e-17), Err(ConfigError::Beta1));
        assert_eq!(Backtracking::new(0.7, 1.0, 0.0, 1e-17), Err(ConfigError::Beta1));
        assert_eq!(
            Backtracking::new(0.7, 1.0, 0.3, 0.0),
            Err(ConfigError::LineSearchTol)
        );
    }

    #[test]
    fn square_at_one_accepts_second_trial() {
        // At x = 1 the full step lands on f(-1) = 1, above the upper edge.
        // One shrink gives alpha = 0.7, which lands inside the bracket.
        let x = array![1.0];
        let params = Backtracking::default();

        let step = backtrack_with(&square, &square_gradient, &x, &params).expect("should search");

        assert!(!step.floored);
        assert_eq!(step.trials, 2);
        assert_relative_eq!(step.alpha, 0.7, epsilon = 1e-12);
        assert!(within_bracket(|v| v * v, 1.0, 2.0, step.alpha, 0.3));
    }

    #[test]
    fn vector_and_function_gradients_agree() {
        let x = array![1.5, -2.0, 0.25];
        let params = Backtracking::default();

        let from_fn = backtrack_with(&square, &square_gradient, &x, &params).unwrap();
        let from_vec = backtrack(&square, &x, &square_gradient(&x), &params).unwrap();

        assert_eq!(from_fn, from_vec);
    }

    #[test]
    fn zero_gradient_accepts_initial_step() {
        let x = array![0.0, 0.0];
        let step = backtrack(&square, &x, &array![0.0, 0.0], &Backtracking::default()).unwrap();

        assert_eq!(step.trials, 1);
        assert!(!step.floored);
        assert_relative_eq!(step.alpha, 1.0);
    }

    #[test]
    fn unreachable_bracket_stops_at_floor() {
        // A constant objective never decreases, so the upper edge always fails.
        let flat = |_x: &Array1<f64>| 1.0;
        let params = Backtracking::new(0.5, 1.0, 0.3, 1e-3).unwrap();

        let step = backtrack(&flat, &array![0.0], &array![1.0], &params).unwrap();

        assert!(step.floored);
        assert!(step.alpha >= params.tol());
        assert!(step.alpha * params.rho() < params.tol());
        // 1, 0.5, ..., 2^-9 are tried; 2^-10 falls below the floor.
        assert_eq!(step.trials, 10);
        assert_relative_eq!(step.alpha, 2f64.powi(-9));
    }

    #[test]
    fn mismatched_gradient_is_rejected() {
        let result = backtrack(&square, &array![1.0, 2.0], &array![1.0], &Backtracking::default());

        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    proptest! {
        #[test]
        fn accepted_step_lies_in_bracket(
            curvature in 0.35f64..10.0,
            x in prop_oneof![-10.0f64..-0.1, 0.1f64..10.0],
        ) {
            // For f = c·x², the bracket holds for 2·c·alpha in [0.6, 1.4], a
            // window wider than one shrink, so a full step of at least 0.6
            // always lands in it.
            let f = move |v: f64| curvature * (v * v);
            let objective = move |v: &Array1<f64>| curvature * v.dot(v);
            let g = 2.0 * curvature * x;

            let step = backtrack(&objective, &array![x], &array![g], &Backtracking::default())
                .unwrap();

            prop_assert!(!step.floored);
            prop_assert!(within_bracket(f, x, g, step.alpha, 0.3));
        }
    }
}
