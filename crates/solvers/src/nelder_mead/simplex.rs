use ndarray::Array1;

use crate::{Error, driver::State};

/// The `n + 1` scored vertices of a Nelder-Mead search.
///
/// Accessors assume the simplex has been built and sorted.
#[derive(Debug, Clone, Default)]
pub(super) struct Simplex {
    points: Vec<State>,
}

impl Simplex {
    /// Builds the start point plus one vertex per coordinate offset by `step`.
    pub(super) fn around<F>(start: &Array1<f64>, step: f64, mut score: F) -> Result<Self, Error>
    where
        F: FnMut(&Array1<f64>) -> Result<f64, Error>,
    {
        let mut points = Vec::with_capacity(start.len() + 1);
        points.push(State::new(start.clone(), score(start)?));

        for i in 0..start.len() {
            let mut x = start.clone();
            x[i] += step;
            let s = score(&x)?;
            points.push(State::new(x, s));
        }

        Ok(Self { points })
    }

    pub(super) fn points(&self) -> &[State] {
        &self.points
    }

    pub(super) fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Orders vertices by ascending score, keeping ties in place.
    ///
    /// NaN scores sort last whatever their sign bit.
    pub(super) fn sort(&mut self) {
        self.points.sort_by(|a, b| {
            a.score
                .is_nan()
                .cmp(&b.score.is_nan())
                .then(a.score.total_cmp(&b.score))
        });
    }

    pub(super) fn best(&self) -> &State {
        &self.points[0]
    }

    pub(super) fn worst(&self) -> &State {
        &self.points[self.points.len() - 1]
    }

    /// The second highest scoring vertex (the best one in one dimension).
    pub(super) fn second_worst(&self) -> &State {
        &self.points[self.points.len() - 2]
    }

    /// Mean of every vertex except the worst.
    pub(super) fn centroid(&self) -> Array1<f64> {
        let rest = &self.points[..self.points.len() - 1];
        let mut x0 = Array1::zeros(self.worst().x.len());
        for p in rest {
            x0 += &p.x;
        }
        x0 / rest.len() as f64
    }

    pub(super) fn replace_worst(&mut self, state: State) {
        let last = self.points.len() - 1;
        self.points[last] = state;
    }

    /// Pulls every vertex toward the best one and rescores them all.
    pub(super) fn shrink<F>(&mut self, sigma: f64, mut score: F) -> Result<(), Error>
    where
        F: FnMut(&Array1<f64>) -> Result<f64, Error>,
    {
        let anchor = self.best().x.clone();
        let mut shrunk = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let x = &anchor + &((&p.x - &anchor) * sigma);
            let s = score(&x)?;
            shrunk.push(State::new(x, s));
        }
        self.points = shrunk;
        Ok(())
    }
}
