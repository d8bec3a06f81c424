use crate::dynamics::state::State;

/// One recorded point of the trajectory log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

/// Append-only log of pre-step positions, kept as parallel columns so
/// consumers can plot each one directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    x: Vec<f64>,
    y: Vec<f64>,
    theta: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            theta: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, state: &State) {
        self.x.push(state.pos.x);
        self.y.push(state.pos.y);
        self.theta.push(state.theta);
    }

    pub fn x_history(&self) -> &[f64] {
        &self.x
    }

    pub fn y_history(&self) -> &[f64] {
        &self.y
    }

    pub fn theta_history(&self) -> &[f64] {
        &self.theta
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            x: *self.x.get(i)?,
            y: *self.y.get(i)?,
            theta: *self.theta.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.theta)
            .map(|((&x, &y), &theta)| Sample { x, y, theta })
    }

    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Index and altitude of the highest recorded point.
    pub fn apogee(&self) -> Option<(usize, f64)> {
        self.y
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, y)| match best {
                Some((_, best_y)) if best_y >= y => best,
                _ => Some((i, y)),
            })
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.theta.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> Trajectory {
        let mut t = Trajectory::default();
        for (x, y, th) in [(0.0, 0.0, 10.0), (1.0, 5.0, 11.0), (2.0, 7.0, 12.0), (3.0, 4.0, 12.5)] {
            t.record(&State::at_rest(x, y, th));
        }
        t
    }

    #[test]
    fn columns_stay_parallel() {
        let t = sample_log();
        assert_eq!(t.len(), 4);
        assert_eq!(t.x_history(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(t.y_history(), &[0.0, 5.0, 7.0, 4.0]);
        assert_eq!(t.theta_history(), &[10.0, 11.0, 12.0, 12.5]);
        assert_eq!(t.iter().count(), 4);
        assert_eq!(t.last(), Some(Sample { x: 3.0, y: 4.0, theta: 12.5 }));
    }

    #[test]
    fn apogee_is_first_maximum() {
        let t = sample_log();
        assert_eq!(t.apogee(), Some((2, 7.0)));
        assert_eq!(Trajectory::default().apogee(), None);
    }

    #[test]
    fn clear_empties_all_columns() {
        let mut t = sample_log();
        t.clear();
        assert!(t.is_empty());
        assert!(t.get(0).is_none());
    }
}
