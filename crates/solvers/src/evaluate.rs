//! Calls into caller-supplied collaborators, mapping their errors and
//! checking the shapes they return.

use gradus_core::{Gradient, Objective, Preconditioner};
use ndarray::Array1;

use crate::Error;

/// Evaluates the objective at `x`.
pub(crate) fn objective<O: Objective>(objective: &O, x: &Array1<f64>) -> Result<f64, Error> {
    objective
        .value(x)
        .map_err(|e| Error::Objective(Box::new(e)))
}

/// Evaluates the gradient at `x` and checks that it matches `x` in length.
pub(crate) fn gradient<G: Gradient>(
    gradient: &G,
    x: &Array1<f64>,
) -> Result<Array1<f64>, Error> {
    let g = gradient
        .gradient(x)
        .map_err(|e| Error::Gradient(Box::new(e)))?;
    Error::check_dim("gradient", x.len(), g.len())?;
    Ok(g)
}

/// Solves `M z = r` and checks that `z` matches `r` in length.
pub(crate) fn precondition<P: Preconditioner>(
    preconditioner: &P,
    r: &Array1<f64>,
) -> Result<Array1<f64>, Error> {
    let z = preconditioner
        .solve(r)
        .map_err(|e| Error::Preconditioner(Box::new(e)))?;
    Error::check_dim("preconditioner", r.len(), z.len())?;
    Ok(z)
}

/// Euclidean norm.
pub(crate) fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}
