//! Iterative optimizers for the Gradus library.
//!
//! Every algorithm plugs its update rule into one shared [`driver`], which
//! owns iteration counting, best-point tracking, history, and termination.
//!
//! # Solvers
//!
//! - [`conjugate_gradient`] — plain and preconditioned conjugate gradient for
//!   symmetric positive-definite linear systems
//! - [`gradient`] — gradient descent with plain, momentum, or Nesterov updates
//! - [`nelder_mead`] — derivative-free simplex search
//!
//! The gradient methods pick step sizes with the backtracking search in
//! [`line_search`].

mod error;
mod evaluate;

pub use error::{ConfigError, Error};

pub mod conjugate_gradient;
pub mod driver;
pub mod gradient;
pub mod line_search;
pub mod nelder_mead;
