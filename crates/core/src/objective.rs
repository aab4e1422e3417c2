use std::convert::Infallible;

use ndarray::Array1;

/// A scalar function to be minimized.
///
/// Implementations are assumed to be pure: evaluating the same `x` twice must
/// give the same value. Solvers rely on this for reproducible runs.
///
/// Infallible closures `Fn(&Array1<f64>) -> f64` implement this trait
/// directly. Implement it on a type when evaluation can fail.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated at `x`.
    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error>;
}

/// The gradient of an [`Objective`].
///
/// The returned vector must have the same length as `x`; solvers check this
/// and report a dimension mismatch otherwise.
///
/// Infallible closures `Fn(&Array1<f64>) -> Array1<f64>` implement this trait
/// directly.
pub trait Gradient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the gradient at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be evaluated at `x`.
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error>;
}

impl<F> Objective for F
where
    F: Fn(&Array1<f64>) -> f64,
{
    type Error = Infallible;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        Ok(self(x))
    }
}

impl<F> Gradient for F
where
    F: Fn(&Array1<f64>) -> Array1<f64>,
{
    type Error = Infallible;

    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        Ok(self(x))
    }
}
