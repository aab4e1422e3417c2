//! Conjugate gradient for symmetric positive-definite systems `A x = b`.
//!
//! # Algorithm
//!
//! Starting from `r = b - A·x` and `p = r`, each update takes
//!
//! ```text
//! alpha = (r·r) / (p·A·p)
//! x     ← x + alpha·p
//! r'    = r - alpha·A·p
//! beta  = (r'·r') / (r·r)
//! p     ← r' + beta·p
//! ```
//!
//! The preconditioned variant solves `M z = r` with a [`Preconditioner`] and
//! uses `z` in place of `r` for the step and direction: `alpha = (r·z)/(p·A·p)`,
//! `beta = (r'·z')/(r·z)`, `p ← z' + beta·p`.
//!
//! # Score and Termination
//!
//! The score is `|r|`. The natural driver config is
//! [`Config::bounded(0.0, tol)`](Config::bounded); in exact arithmetic the
//! residual vanishes within `n` updates for an `n × n` system.
//!
//! If `r·z` vanishes relative to its starting value, or `p·A·p` vanishes
//! relative to `|p|·|A·p|`, the recurrence cannot continue. The update
//! leaves the iterate unchanged and the run ends with [`Status::Halted`]
//! (unless the bound is already met).
//!
//! [`Status::Halted`]: crate::driver::Status::Halted


use gradus_core::{LinearOperator, Observer, Preconditioner};
use ndarray::Array1;
use tracing::debug;

use crate::{
    Error,
    driver::{Action, Algorithm, Config, Driver, Event, Solution},
    evaluate,
};

/// True if `p·A·p` is round-off next to `|p|·|A·p|`.
fn curvature_vanishes(pap: f64, p: &Array1<f64>, ap: &Array1<f64>) -> bool {
    pap.abs() <= f64::EPSILON * evaluate::norm(p) * evaluate::norm(ap)
}

/// True if `r·z` has fallen to round-off relative to its starting value.
fn inner_vanishes(rz: f64, rz0: f64) -> bool {
    rz.abs() <= f64::EPSILON * f64::EPSILON * rz0.abs()
}

/// Checks that `A` is square and matches `b` and the start point.
fn check_system<A: LinearOperator>(
    a: &A,
    b: &Array1<f64>,
    start: &Array1<f64>,
) -> Result<(), Error> {
    if start.is_empty() {
        return Err(Error::EmptyStart);
    }
    Error::check_dim("operator columns", a.nrows(), a.ncols())?;
    Error::check_dim("right-hand side", a.nrows(), b.len())?;
    Error::check_dim("start point", a.ncols(), start.len())
}

/// Plain conjugate gradient as a driver [`Algorithm`].
pub struct ConjugateGradient<'a, A> {
    a: &'a A,
    b: &'a Array1<f64>,
    start: Array1<f64>,
    x: Array1<f64>,
    r: Array1<f64>,
    p: Array1<f64>,
    rr0: f64,
    halted: bool,
}

impl<'a, A: LinearOperator> ConjugateGradient<'a, A> {
    /// Creates conjugate gradient for `A x = b` from `start_x`.
    #[must_use]
    pub fn new(a: &'a A, b: &'a Array1<f64>, start_x: Array1<f64>) -> Self {
        Self {
            a,
            b,
            x: start_x.clone(),
            r: Array1::zeros(0),
            p: Array1::zeros(0),
            rr0: 0.0,
            start: start_x,
            halted: false,
        }
    }

    /// Returns the current residual `b - A·x`.
    #[must_use]
    pub fn residual(&self) -> &Array1<f64> {
        &self.r
    }
}

impl<A: LinearOperator> Algorithm for ConjugateGradient<'_, A> {
    fn init(&mut self) -> Result<(), Error> {
        check_system(self.a, self.b, &self.start)?;

        self.x = self.start.clone();
        self.r = self.b - &self.a.apply(&self.x);
        self.p = self.r.clone();
        self.rr0 = self.r.dot(&self.r);
        self.halted = false;
        Ok(())
    }

    fn score(&mut self) -> Result<f64, Error> {
        Ok(evaluate::norm(&self.r))
    }

    fn x(&self) -> &Array1<f64> {
        &self.x
    }

    fn update(&mut self) -> Result<(), Error> {
        let ap = self.a.apply(&self.p);
        let rr = self.r.dot(&self.r);
        let pap = self.p.dot(&ap);
        if inner_vanishes(rr, self.rr0) || curvature_vanishes(pap, &self.p, &ap) {
            debug!(rr, pap, "conjugate gradient breakdown");
            self.halted = true;
            return Ok(());
        }

        let alpha = rr / pap;
        self.x = &self.x + &(&self.p * alpha);
        let r_next = &self.r - &(&ap * alpha);
        let beta = r_next.dot(&r_next) / rr;
        self.p = &r_next + &(&self.p * beta);
        self.r = r_next;
        Ok(())
    }

    fn halted(&self) -> bool {
        self.halted
    }
}

/// Preconditioned conjugate gradient as a driver [`Algorithm`].
pub struct PreconditionedConjugateGradient<'a, A, P> {
    a: &'a A,
    b: &'a Array1<f64>,
    preconditioner: &'a P,
    start: Array1<f64>,
    x: Array1<f64>,
    r: Array1<f64>,
    z: Array1<f64>,
    p: Array1<f64>,
    rz0: f64,
    halted: bool,
}

impl<'a, A, P> PreconditionedConjugateGradient<'a, A, P>
where
    A: LinearOperator,
    P: Preconditioner,
{
    /// Creates preconditioned conjugate gradient for `A x = b` from `start_x`.
    #[must_use]
    pub fn new(a: &'a A, b: &'a Array1<f64>, start_x: Array1<f64>, preconditioner: &'a P) -> Self {
        Self {
            a,
            b,
            preconditioner,
            x: start_x.clone(),
            r: Array1::zeros(0),
            z: Array1::zeros(0),
            p: Array1::zeros(0),
            rz0: 0.0,
            start: start_x,
            halted: false,
        }
    }

    /// Returns the current residual `b - A·x`.
    #[must_use]
    pub fn residual(&self) -> &Array1<f64> {
        &self.r
    }
}

impl<A, P> Algorithm for PreconditionedConjugateGradient<'_, A, P>
where
    A: LinearOperator,
    P: Preconditioner,
{
    fn init(&mut self) -> Result<(), Error> {
        check_system(self.a, self.b, &self.start)?;

        self.x = self.start.clone();
        self.r = self.b - &self.a.apply(&self.x);
        self.z = evaluate::precondition(self.preconditioner, &self.r)?;
        self.p = self.z.clone();
        self.rz0 = self.r.dot(&self.z);
        self.halted = false;
        Ok(())
    }

    fn score(&mut self) -> Result<f64, Error> {
        Ok(evaluate::norm(&self.r))
    }

    fn x(&self) -> &Array1<f64> {
        &self.x
    }

    fn update(&mut self) -> Result<(), Error> {
        let ap = self.a.apply(&self.p);
        let rz = self.r.dot(&self.z);
        let pap = self.p.dot(&ap);
        if inner_vanishes(rz, self.rz0) || curvature_vanishes(pap, &self.p, &ap) {
            debug!(rz, pap, "preconditioned conjugate gradient breakdown");
            self.halted = true;
            return Ok(());
        }

        let alpha = rz / pap;
        self.x = &self.x + &(&self.p * alpha);
        let r_next = &self.r - &(&ap * alpha);
        let z_next = evaluate::precondition(self.preconditioner, &r_next)?;
        let beta = r_next.dot(&z_next) / rz;
        self.p = &z_next + &(&self.p * beta);
        self.r = r_next;
        self.z = z_next;
        Ok(())
    }

    fn halted(&self) -> bool {
        self.halted
    }
}

/// Solves `A x = b` by conjugate gradient.
///
/// The observer receives an [`Event`] after each iteration.
/// See the [driver docs](crate::driver) for event timing and termination rules.
///
/// # Errors
///
/// Returns an error if `start_x` is empty or if `A`, `b`, and `start_x` have
/// incompatible shapes.
pub fn solve<A, Obs>(
    a: &A,
    b: &Array1<f64>,
    start_x: Array1<f64>,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    A: LinearOperator,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    Driver::new(ConjugateGradient::new(a, b, start_x), *config).optimize(observer)
}

/// Solves `A x = b` by conjugate gradient without observer support.
///
/// # Errors
///
/// Returns an error if `start_x` is empty or if `A`, `b`, and `start_x` have
/// incompatible shapes.
pub fn solve_unobserved<A: LinearOperator>(
    a: &A,
    b: &Array1<f64>,
    start_x: Array1<f64>,
    config: &Config,
) -> Result<Solution, Error> {
    solve(a, b, start_x, config, ())
}

/// Solves `A x = b` by conjugate gradient preconditioned with `M`.
///
/// The observer receives an [`Event`] after each iteration.
/// See the [driver docs](crate::driver) for event timing and termination rules.
///
/// # Errors
///
/// Returns an error if `start_x` is empty, if `A`, `b`, and `start_x` have
/// incompatible shapes, or if the preconditioner fails or returns a vector of
/// the wrong length.
pub fn solve_preconditioned<A, P, Obs>(
    a: &A,
    b: &Array1<f64>,
    start_x: Array1<f64>,
    preconditioner: &P,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    A: LinearOperator,
    P: Preconditioner,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let algorithm = PreconditionedConjugateGradient::new(a, b, start_x, preconditioner);
    Driver::new(algorithm, *config).optimize(observer)
}

/// Solves `A x = b` by preconditioned conjugate gradient without observer
/// support.
///
/// # Errors
///
/// Returns an error if `start_x` is empty, if `A`, `b`, and `start_x` have
/// incompatible shapes, or if the preconditioner fails or returns a vector of
/// the wrong length.
pub fn solve_preconditioned_unobserved<A, P>(
    a: &A,
    b: &Array1<f64>,
    start_x: Array1<f64>,
    preconditioner: &P,
    config: &Config,
) -> Result<Solution, Error>
where
    A: LinearOperator,
    P: Preconditioner,
{
    solve_preconditioned(a, b, start_x, preconditioner, config, ())
}
