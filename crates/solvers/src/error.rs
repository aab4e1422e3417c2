use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while running an optimizer.
///
/// Failures inside caller-supplied collaborators are boxed as the error's
/// source without modification.
#[derive(Debug, Error)]
pub enum Error {
    #[error("start point has no dimensions")]
    EmptyStart,

    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("objective evaluation failed")]
    Objective(#[source] Box<dyn StdError + Send + Sync>),

    #[error("gradient evaluation failed")]
    Gradient(#[source] Box<dyn StdError + Send + Sync>),

    #[error("preconditioner solve failed")]
    Preconditioner(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Returns a mismatch error unless `found == expected`.
    pub(crate) fn check_dim(
        context: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                context,
                expected,
                found,
            })
        }
    }
}

/// Errors that can occur when validating optimizer parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tol must be finite and positive")]
    Tol,

    #[error("bound must be finite")]
    Bound,

    #[error("rho must be in (0, 1)")]
    Rho,

    #[error("beta1 must be in (0, 0.5]")]
    Beta1,

    #[error("alpha0 must be finite and positive")]
    Alpha0,

    #[error("line search tol must be finite and positive")]
    LineSearchTol,

    #[error("momentum must be in [0, 1)")]
    Momentum,

    #[error("step must be finite and non-zero")]
    Step,

    #[error("reflection coefficient must be finite and positive")]
    Reflection,

    #[error("expansion coefficient must be finite and greater than the reflection coefficient")]
    Expansion,

    #[error("contraction coefficient must be in (0, 1)")]
    Contraction,

    #[error("shrink coefficient must be in (0, 1)")]
    Shrink,
}

/// Returns true if `value` lies in the open interval `(0, 1)`.
pub(crate) fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dim_accepts_equal() {
        assert!(Error::check_dim("x", 3, 3).is_ok());
    }

    #[test]
    fn check_dim_reports_both_sizes() {
        let err = Error::check_dim("gradient", 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dimension mismatch in gradient: expected 3, found 2"
        );
    }

    #[test]
    fn unit_interval_is_open() {
        assert!(in_unit_interval(0.5));
        assert!(!in_unit_interval(0.0));
        assert!(!in_unit_interval(1.0));
        assert!(!in_unit_interval(f64::NAN));
    }
}
