use std::convert::Infallible;

use ndarray::{Array1, Array2, ArrayView2};

/// A linear operator `A` that can be applied to a vector.
///
/// Dense matrices implement this through [`Array2`]. Sparse or matrix-free
/// operators only need to provide the product `A·v` and their shape.
pub trait LinearOperator {
    /// Number of rows of `A`.
    fn nrows(&self) -> usize;

    /// Number of columns of `A`.
    fn ncols(&self) -> usize;

    /// Returns the product `A·v`.
    ///
    /// Callers guarantee `v.len() == self.ncols()`.
    fn apply(&self, v: &Array1<f64>) -> Array1<f64>;
}

impl LinearOperator for Array2<f64> {
    fn nrows(&self) -> usize {
        self.dim().0
    }

    fn ncols(&self) -> usize {
        self.dim().1
    }

    fn apply(&self, v: &Array1<f64>) -> Array1<f64> {
        self.dot(v)
    }
}

impl LinearOperator for ArrayView2<'_, f64> {
    fn nrows(&self) -> usize {
        self.dim().0
    }

    fn ncols(&self) -> usize {
        self.dim().1
    }

    fn apply(&self, v: &Array1<f64>) -> Array1<f64> {
        self.dot(v)
    }
}

impl<T: LinearOperator + ?Sized> LinearOperator for &T {
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    fn apply(&self, v: &Array1<f64>) -> Array1<f64> {
        (**self).apply(v)
    }
}

/// Solves `M z = r` for a preconditioning matrix `M`.
///
/// A good preconditioner approximates `A` while being cheap to invert.
pub trait Preconditioner {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `z` such that `M z = r`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the system cannot be solved.
    fn solve(&self, r: &Array1<f64>) -> Result<Array1<f64>, Self::Error>;
}

/// The trivial preconditioner `M = I`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Preconditioner for Identity {
    type Error = Infallible;

    fn solve(&self, r: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        Ok(r.clone())
    }
}

/// The diagonal (Jacobi) preconditioner `M = diag(A)`.
///
/// A zero on the diagonal yields non-finite entries in `z`; they are passed
/// through to the solver unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobi {
    diagonal: Array1<f64>,
}

impl Jacobi {
    /// Creates a preconditioner from the diagonal of `M`.
    #[must_use]
    pub fn new(diagonal: Array1<f64>) -> Self {
        Self { diagonal }
    }

    /// Creates a preconditioner from the diagonal of a dense matrix.
    #[must_use]
    pub fn from_matrix(a: &Array2<f64>) -> Self {
        Self::new(a.diag().to_owned())
    }

    /// Returns the diagonal of `M`.
    #[must_use]
    pub fn diagonal(&self) -> &Array1<f64> {
        &self.diagonal
    }
}

impl Preconditioner for Jacobi {
    type Error = Infallible;

    fn solve(&self, r: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        Ok(r / &self.diagonal)
    }
}
