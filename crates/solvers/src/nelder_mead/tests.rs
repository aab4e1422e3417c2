use approx::assert_relative_eq;
use ndarray::{Array1, array};
use proptest::prelude::*;
use thiserror::Error;

use gradus_core::Objective;

use crate::{
    Error,
    driver::{Action, Algorithm, Config, Driver, Event, Status},
};

use super::{Move, NelderMead, Params, minimize, minimize_unobserved};

fn config() -> Config {
    Config::stagnating(1e-7, 10).unwrap().with_iter_limit(1000)
}

fn sphere(x: &Array1<f64>) -> f64 {
    x.dot(x)
}

fn rosenbrock(x: &Array1<f64>) -> f64 {
    (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
}

/// Runs a single update from `start` and reports the move taken.
fn first_move(objective: &impl Fn(&Array1<f64>) -> f64, start: Array1<f64>) -> Option<Move> {
    let mut driver = Driver::new(
        NelderMead::new(objective, start, Params::default()),
        config().with_iter_limit(1),
    );
    driver.optimize_unobserved().unwrap();
    driver.algorithm().last_move()
}

#[test]
fn minimizes_sphere() {
    let solution =
        minimize_unobserved(&sphere, array![1.0, 1.0], Params::default(), &config()).unwrap();

    assert_eq!(solution.status, Status::Stagnated);
    assert!(solution.score < 1e-6, "score {}", solution.score);
    assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1], 0.0, epsilon = 1e-3);
}

#[test]
fn sphere_history_is_non_increasing() {
    let solution =
        minimize_unobserved(&sphere, array![1.0, 1.0], Params::default(), &config()).unwrap();

    assert_relative_eq!(solution.history.scores()[0], 2.0);
    for pair in solution.history.scores().windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert_eq!(solution.history.len(), solution.iters);
}

#[test]
fn minimizes_rosenbrock() {
    let config = Config::stagnating(1e-12, 50).unwrap().with_iter_limit(5000);

    let solution =
        minimize_unobserved(&rosenbrock, array![-1.2, 1.0], Params::default(), &config).unwrap();

    assert_eq!(solution.status, Status::Stagnated);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-3);
}

#[test]
fn minimizes_in_one_dimension() {
    let parabola = |x: &Array1<f64>| (x[0] - 2.0).powi(2);

    let solution =
        minimize_unobserved(&parabola, array![0.0], Params::default(), &config()).unwrap();

    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-6);
}

#[test]
fn flat_objective_stops_after_two_iterations() {
    let flat = |_: &Array1<f64>| 0.0;
    let config = Config::stagnating(1e-7, 1).unwrap();

    let solution =
        minimize_unobserved(&flat, array![1.0, 2.0], Params::default(), &config).unwrap();

    assert_eq!(solution.status, Status::Stagnated);
    assert_eq!(solution.iters, 2);
    assert_eq!(solution.history.len(), 2);
}

#[test]
fn accepts_reflection_between_best_and_second_worst() {
    assert_eq!(first_move(&sphere, array![1.0, 1.0]), Some(Move::Reflect));
}

#[test]
fn expands_along_descending_direction() {
    let downhill = |x: &Array1<f64>| -x[0] - x[1];

    assert_eq!(first_move(&downhill, array![0.0, 0.0]), Some(Move::Expand));
}

#[test]
fn contracts_when_reflection_overshoots() {
    assert_eq!(first_move(&sphere, array![0.0, 0.0]), Some(Move::Contract));
}

#[test]
fn shrinks_when_contraction_fails() {
    let lopsided = |x: &Array1<f64>| if x[0] > 0.0 { x[0] } else { -3.0 * x[0] };
    let params = Params::default().with_step(1.0).unwrap();
    let mut driver = Driver::new(
        NelderMead::new(&lopsided, array![0.0], params),
        config().with_iter_limit(1),
    );

    driver.optimize_unobserved().unwrap();

    let algorithm = driver.algorithm();
    assert_eq!(algorithm.last_move(), Some(Move::Shrink));
    assert_eq!(algorithm.simplex()[0].x, array![0.0]);
    assert_eq!(algorithm.simplex()[1].x, array![0.5]);
}

#[test]
fn simplex_stays_sorted_with_dimension_plus_one_points() {
    let mut driver = Driver::new(
        NelderMead::new(&rosenbrock, array![-1.2, 1.0], Params::default()),
        config().with_iter_limit(25),
    );

    driver.optimize_unobserved().unwrap();

    let simplex = driver.algorithm().simplex();
    assert_eq!(simplex.len(), 3);
    for pair in simplex.windows(2) {
        assert!(pair[0].score <= pair[1].score);
    }
}

#[test]
fn x_is_start_before_first_run() {
    let algorithm = NelderMead::new(&sphere, array![3.0, 4.0], Params::default());

    assert_eq!(algorithm.x(), &array![3.0, 4.0]);
    assert!(algorithm.simplex().is_empty());
}

#[test]
fn undefined_region_never_becomes_best() {
    // NaN (with its sign bit set on common targets) left of the origin.
    let half_line = |x: &Array1<f64>| (x[0] - 1.0).powi(2) + 0.0 * x[0].sqrt();
    let params = Params::default().with_step(-0.1).unwrap();

    let solution = minimize_unobserved(&half_line, array![0.05], params, &config()).unwrap();

    assert!(solution.history.scores().iter().all(|s| s.is_finite()));
    assert_relative_eq!(solution.history.scores()[0], 0.9025);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-3);
}

#[test]
fn update_before_init_is_an_error() {
    let mut algorithm = NelderMead::new(&sphere, array![1.0, 1.0], Params::default());

    assert!(matches!(algorithm.score(), Err(Error::EmptyStart)));
    assert!(matches!(algorithm.update(), Err(Error::EmptyStart)));
}

#[test]
fn repeated_runs_are_identical() {
    let mut driver = Driver::new(
        NelderMead::new(&rosenbrock, array![-1.2, 1.0], Params::default()),
        config().with_iter_limit(100),
    );

    let first = driver.optimize_unobserved().unwrap();
    let second = driver.optimize_unobserved().unwrap();

    assert_eq!(first.x, second.x);
    assert_eq!(first.history, second.history);
}

#[test]
fn observer_can_stop_early() {
    let solution = minimize(
        &sphere,
        array![1.0, 1.0],
        Params::default(),
        &config(),
        |event: &Event<'_>| (event.iter == 5).then_some(Action::StopEarly),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 5);
}

#[test]
fn empty_start_is_rejected() {
    let result = minimize_unobserved(&sphere, Array1::zeros(0), Params::default(), &config());

    assert!(matches!(result, Err(Error::EmptyStart)));
}

#[derive(Debug, Error)]
#[error("outside the feasible box")]
struct Infeasible;

struct Boxed;

impl Objective for Boxed {
    type Error = Infeasible;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        if x.iter().any(|v| v.abs() > 1.05) {
            return Err(Infeasible);
        }
        Ok(sphere(x))
    }
}

#[test]
fn objective_errors_propagate() {
    let result = minimize_unobserved(&Boxed, array![1.0, 1.0], Params::default(), &config());

    let Err(Error::Objective(source)) = result else {
        panic!("expected an objective error");
    };
    assert_eq!(source.to_string(), "outside the feasible box");
}

proptest! {
    #[test]
    fn never_worse_than_start(cx in -5.0..5.0_f64, cy in -5.0..5.0_f64) {
        let shifted = move |x: &Array1<f64>| (x[0] - cx).powi(2) + 2.0 * (x[1] - cy).powi(2);
        let start = array![0.0, 0.0];
        let start_score = shifted(&start);

        let solution =
            minimize_unobserved(&shifted, start, Params::default(), &config()).unwrap();

        prop_assert!(solution.score <= start_score);
        for pair in solution.history.scores().windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }
}
