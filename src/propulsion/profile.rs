use itertools::Itertools;
use log::debug;

use crate::math::{interp, InterpMode};
use super::ThrustCurveError;

/// Relative tolerance used when snapping a time ratio onto the grid.
const GRID_SNAP_TOL: f64 = 1e-9;

/// Largest grid `ThrustProfile::build` will allocate (two `f64` columns).
pub const MAX_GRID_LEN: usize = 50_000_000;

/// Snap `ratio` to the nearest integer when it is within float noise of it.
#[inline]
fn snapped(ratio: f64) -> Option<f64> {
    let nearest = ratio.round();
    ((ratio - nearest).abs() <= GRID_SNAP_TOL * nearest.abs().max(1.0)).then_some(nearest)
}

/// Number of grid points `i * dt` with `i * dt < max_time`, i.e. `ceil(max_time / dt)`.
///
/// A ratio that lands on an integer up to rounding noise (60 / 0.005) is not
/// bumped to the next step.
pub fn grid_len(dt: f64, max_time: f64) -> usize {
    let ratio = max_time / dt;
    snapped(ratio).unwrap_or_else(|| ratio.ceil()).max(0.0) as usize
}

/// Grid index for a simulation time: `floor(time / dt)`, except that a time
/// sitting within rounding noise of a grid point maps to that point.
pub fn index_for_time(time: f64, dt: f64) -> usize {
    let ratio = time / dt;
    snapped(ratio).unwrap_or_else(|| ratio.floor()).max(0.0) as usize
}

// ---------------------------------------------------------------------------
// Thrust profile resampled onto the simulation grid
// ---------------------------------------------------------------------------

/// Thrust magnitude on a uniform time grid `t_i = i * dt`, `t_i < max_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrustProfile {
    dt: f64,
    max_time: f64,
    times: Vec<f64>,
    thrusts: Vec<f64>,
}

impl ThrustProfile {
    /// Resample raw `(time, thrust)` pairs onto the grid.
    ///
    /// Pairs may arrive in any order. Pairs with a non-finite component are
    /// dropped. Grid times outside the sampled range get zero thrust.
    pub fn build(raw: &[(f64, f64)], dt: f64, max_time: f64) -> Result<Self, ThrustCurveError> {
        if !(dt.is_finite() && dt > 0.0 && max_time.is_finite() && max_time > 0.0)
            || max_time / dt > MAX_GRID_LEN as f64
        {
            return Err(ThrustCurveError::InvalidGrid { dt, max_time });
        }

        let (raw_times, raw_thrusts): (Vec<f64>, Vec<f64>) = raw
            .iter()
            .copied()
            .filter(|(t, f)| t.is_finite() && f.is_finite())
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .unzip();

        if raw_times.len() < 2 {
            return Err(ThrustCurveError::InsufficientSamples {
                valid: raw_times.len(),
            });
        }
        if raw_times.len() < raw.len() {
            debug!(
                "dropped {} non-finite thrust samples",
                raw.len() - raw_times.len()
            );
        }

        let n = grid_len(dt, max_time);
        let times: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let thrusts = times
            .iter()
            .map(|&t| interp(&raw_times, &raw_thrusts, t, &InterpMode::Constant(0.0)))
            .collect();

        Ok(Self {
            dt,
            max_time,
            times,
            thrusts,
        })
    }

    /// Thrust at grid step `index`.
    pub fn thrust_at(&self, index: usize) -> Result<f64, ThrustCurveError> {
        self.get(index).ok_or(ThrustCurveError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Non-failing variant of [`thrust_at`](Self::thrust_at).
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.thrusts.get(index).copied()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn thrusts(&self) -> &[f64] {
        &self.thrusts
    }

    pub fn len(&self) -> usize {
        self.thrusts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thrusts.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn max_thrust(&self) -> f64 {
        self.thrusts.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Total impulse over the grid (trapezoidal rule), N·s.
    pub fn total_impulse(&self) -> f64 {
        self.thrusts
            .iter()
            .tuple_windows()
            .map(|(a, b)| 0.5 * (a + b) * self.dt)
            .sum()
    }

    /// Time between the first and last grid point with non-zero thrust, s.
    pub fn burn_time(&self) -> f64 {
        let first = self.thrusts.iter().position(|&f| f > 0.0);
        let last = self.thrusts.iter().rposition(|&f| f > 0.0);
        match (first, last) {
            (Some(a), Some(b)) => self.times[b] - self.times[a],
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> ThrustProfile {
        ThrustProfile::build(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)], 0.5, 3.0).unwrap()
    }

    #[test]
    fn resamples_triangle_with_zero_tail() {
        let p = triangle();
        assert_eq!(p.len(), 6);
        assert_eq!(p.times(), &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
        assert_eq!(p.thrust_at(1).unwrap(), 5.0);
        assert_eq!(p.thrust_at(2).unwrap(), 10.0);
        assert_eq!(p.thrust_at(3).unwrap(), 5.0);
        assert_eq!(p.thrust_at(5).unwrap(), 0.0);
    }

    #[test]
    fn unsorted_input_matches_sorted() {
        let shuffled =
            ThrustProfile::build(&[(2.0, 0.0), (0.0, 0.0), (1.0, 10.0)], 0.5, 3.0).unwrap();
        assert_eq!(shuffled, triangle());
    }

    #[test]
    fn zero_before_first_sample() {
        let p = ThrustProfile::build(&[(0.4, 8.0), (1.0, 8.0)], 0.1, 1.5).unwrap();
        assert_eq!(p.thrust_at(0).unwrap(), 0.0);
        assert_eq!(p.thrust_at(3).unwrap(), 0.0);
        assert_relative_eq!(p.thrust_at(5).unwrap(), 8.0);
        assert_eq!(p.thrust_at(11).unwrap(), 0.0);
    }

    #[test]
    fn lookup_past_grid_fails() {
        let p = triangle();
        assert!(matches!(
            p.thrust_at(6),
            Err(ThrustCurveError::OutOfRange { index: 6, len: 6 })
        ));
    }

    #[test]
    fn too_few_samples() {
        let err = ThrustProfile::build(&[(0.0, 1.0), (f64::NAN, 2.0)], 0.1, 1.0).unwrap_err();
        assert!(matches!(err, ThrustCurveError::InsufficientSamples { valid: 1 }));
    }

    #[test]
    fn bad_grid() {
        let raw = [(0.0, 0.0), (1.0, 1.0)];
        assert!(matches!(
            ThrustProfile::build(&raw, 0.0, 1.0),
            Err(ThrustCurveError::InvalidGrid { .. })
        ));
        assert!(matches!(
            ThrustProfile::build(&raw, 0.1, -1.0),
            Err(ThrustCurveError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let raw = [(0.0, 0.0), (1.0, 1.0)];
        assert!(matches!(
            ThrustProfile::build(&raw, 1e-3, 1e20),
            Err(ThrustCurveError::InvalidGrid { .. })
        ));
        assert!(matches!(
            ThrustProfile::build(&raw, f64::MIN_POSITIVE, 1.0),
            Err(ThrustCurveError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn grid_length_is_ceil_without_float_noise() {
        assert_eq!(grid_len(0.005, 60.0), 12_000);
        assert_eq!(grid_len(0.1, 0.3), 3);
        assert_eq!(grid_len(0.5, 3.0), 6);
        assert_eq!(grid_len(0.4, 1.0), 3);
    }

    #[test]
    fn time_index_snaps_to_grid() {
        let t: f64 = (0..3).map(|_| 0.1).sum();
        assert_eq!(index_for_time(t, 0.1), 3);
        assert_eq!(index_for_time(0.25, 0.1), 2);
        assert_eq!(index_for_time(0.0, 0.1), 0);
    }

    #[test]
    fn impulse_and_burn_time() {
        let p = triangle();
        assert_relative_eq!(p.total_impulse(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(p.burn_time(), 1.0);
        assert_eq!(p.max_thrust(), 10.0);
    }
}
