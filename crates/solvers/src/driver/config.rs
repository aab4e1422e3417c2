use crate::ConfigError;

/// Convergence policy shared by every optimizer.
///
/// With a `bound`, a run converges once the best score is within `tol` of the
/// bound, and stagnation alone never ends it. Without a `bound`, a run stops
/// after `no_improv_iter_limit` consecutive iterations that fail to improve the
/// best score by more than `tol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tol: f64,
    bound: Option<f64>,
    iter_limit: Option<usize>,
    no_improv_iter_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-8, None, None, 10).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated tolerance and bound.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive, or if `bound` is
    /// not finite.
    pub fn new(
        tol: f64,
        bound: Option<f64>,
        iter_limit: Option<usize>,
        no_improv_iter_limit: usize,
    ) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::Tol);
        }
        if bound.is_some_and(|b| !b.is_finite()) {
            return Err(ConfigError::Bound);
        }

        Ok(Self {
            tol,
            bound,
            iter_limit,
            no_improv_iter_limit,
        })
    }

    /// Creates a config that converges when the best score gets within `tol`
    /// of `bound`.
    ///
    /// Conjugate gradient and the gradient-descent family use `bound = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` or `bound` is invalid.
    pub fn bounded(bound: f64, tol: f64) -> Result<Self, ConfigError> {
        Self::new(tol, Some(bound), None, 10)
    }

    /// Creates a config that stops after `no_improv_iter_limit` iterations
    /// without an improvement greater than `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is invalid.
    pub fn stagnating(tol: f64, no_improv_iter_limit: usize) -> Result<Self, ConfigError> {
        Self::new(tol, None, None, no_improv_iter_limit)
    }

    /// Returns a copy that also stops once more than `iter_limit` iterations
    /// have completed.
    #[must_use]
    pub fn with_iter_limit(self, iter_limit: usize) -> Self {
        Self {
            iter_limit: Some(iter_limit),
            ..self
        }
    }

    /// Returns the improvement (or bound gap) tolerance.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the target score, if any.
    #[must_use]
    pub fn bound(&self) -> Option<f64> {
        self.bound
    }

    /// Returns the iteration limit, if any.
    #[must_use]
    pub fn iter_limit(&self) -> Option<usize> {
        self.iter_limit
    }

    /// Returns how many non-improving iterations end an unbounded run.
    #[must_use]
    pub fn no_improv_iter_limit(&self) -> usize {
        self.no_improv_iter_limit
    }
}
