use crate::{ConfigError, line_search::Backtracking};

/// A common momentum choice for [`Params::momentum`] and [`Params::nesterov`].
pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// How the iterate moves once a step size is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Move straight down the gradient.
    Plain,

    /// Accumulate a velocity from past gradients.
    Momentum { momentum: f64 },

    /// Accumulate a velocity from gradients at the look-ahead point.
    Nesterov { momentum: f64 },
}

/// Parameters for gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    method: Method,
    line_search: Backtracking,
}

impl Default for Params {
    fn default() -> Self {
        Self::plain()
    }
}

impl Params {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the momentum is not in `[0, 1)`.
    pub fn new(method: Method, line_search: Backtracking) -> Result<Self, ConfigError> {
        match method {
            Method::Plain => {}
            Method::Momentum { momentum } | Method::Nesterov { momentum } => {
                if !(0.0..1.0).contains(&momentum) {
                    return Err(ConfigError::Momentum);
                }
            }
        }

        Ok(Self {
            method,
            line_search,
        })
    }

    /// Plain descent with the default line search.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            method: Method::Plain,
            line_search: Backtracking::default(),
        }
    }

    /// Momentum descent with the default line search.
    ///
    /// # Errors
    ///
    /// Returns an error if `momentum` is not in `[0, 1)`.
    pub fn momentum(momentum: f64) -> Result<Self, ConfigError> {
        Self::new(Method::Momentum { momentum }, Backtracking::default())
    }

    /// Nesterov descent with the default line search.
    ///
    /// # Errors
    ///
    /// Returns an error if `momentum` is not in `[0, 1)`.
    pub fn nesterov(momentum: f64) -> Result<Self, ConfigError> {
        Self::new(Method::Nesterov { momentum }, Backtracking::default())
    }

    /// Returns a copy using `line_search` to pick step sizes.
    #[must_use]
    pub fn with_line_search(self, line_search: Backtracking) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    /// Returns the update rule.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the step-size search parameters.
    #[must_use]
    pub fn line_search(&self) -> &Backtracking {
        &self.line_search
    }
}
