//! Core traits for the Gradus optimization library.
//!
//! This crate defines the collaborators that solvers consume but never
//! implement themselves:
//!
//! - [`Objective`] — a scalar function of a vector
//! - [`Gradient`] — the gradient of an objective
//! - [`LinearOperator`] — a matrix-like operator `A` applied as `A·v`
//! - [`Preconditioner`] — solves `M z = r` for a preconditioning matrix `M`
//! - [`Observer`] — receives solver events and optionally returns control actions
//!
//! Vectors are [`ndarray::Array1<f64>`] throughout.

mod linear;
mod objective;
mod observer;

pub use linear::{Identity, Jacobi, LinearOperator, Preconditioner};
pub use objective::{Gradient, Objective};
pub use observer::Observer;
