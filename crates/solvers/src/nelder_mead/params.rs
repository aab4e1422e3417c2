use crate::{ConfigError, error::in_unit_interval};

/// Parameters for Nelder-Mead.
///
/// - `step`: offset of each initial vertex from the start point
/// - `alpha`: reflection coefficient
/// - `gamma`: expansion coefficient
/// - `rho`: contraction coefficient
/// - `sigma`: shrink coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    step: f64,
    alpha: f64,
    gamma: f64,
    rho: f64,
    sigma: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            step: 0.1,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
        }
    }
}

impl Params {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is zero or non-finite, `alpha` is not
    /// positive, `gamma` does not exceed `alpha`, or `rho` or `sigma` lies
    /// outside `(0, 1)`.
    pub fn new(
        step: f64,
        alpha: f64,
        gamma: f64,
        rho: f64,
        sigma: f64,
    ) -> Result<Self, ConfigError> {
        if !step.is_finite() || step == 0.0 {
            return Err(ConfigError::Step);
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ConfigError::Reflection);
        }
        if !gamma.is_finite() || gamma <= alpha {
            return Err(ConfigError::Expansion);
        }
        if !in_unit_interval(rho) {
            return Err(ConfigError::Contraction);
        }
        if !in_unit_interval(sigma) {
            return Err(ConfigError::Shrink);
        }

        Ok(Self {
            step,
            alpha,
            gamma,
            rho,
            sigma,
        })
    }

    /// Returns a copy with a different initial vertex offset.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is zero or non-finite.
    pub fn with_step(self, step: f64) -> Result<Self, ConfigError> {
        Self::new(step, self.alpha, self.gamma, self.rho, self.sigma)
    }

    /// Returns the offset of each initial vertex from the start point.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the reflection coefficient.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the expansion coefficient.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Returns the contraction coefficient.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns the shrink coefficient.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}
