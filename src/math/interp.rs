// ---------------------------------------------------------------------------
// 1-D linear interpolation over a sorted table
// ---------------------------------------------------------------------------

/// Behaviour for query points outside the tabulated range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpMode {
    /// Extend the first/last segment.
    Extrapolate,
    /// Hold the first/last tabulated value.
    FirstLast,
    /// Return a fixed value.
    Constant(f64),
}

/// Index of the lower sample of the segment used for `xp`.
/// Always in `0..=x.len() - 2`; requires `x.len() >= 2`.
#[inline]
fn segment_index(x: &[f64], xp: f64) -> usize {
    x.partition_point(|&v| v <= xp)
        .saturating_sub(1)
        .min(x.len() - 2)
}

#[inline]
fn lerp_segment(x: &[f64], y: &[f64], i: usize, xp: f64) -> f64 {
    let dx = x[i + 1] - x[i];
    if dx <= 0.0 {
        // Repeated abscissa: take the later sample
        return y[i + 1];
    }
    y[i] + (y[i + 1] - y[i]) * (xp - x[i]) / dx
}

/// Linearly interpolate `y(x)` at `xp`. `x` must be sorted ascending.
///
/// Mismatched lengths are truncated to the shorter slice. An empty table
/// yields 0 and a single sample yields its value regardless of `mode`.
pub fn interp(x: &[f64], y: &[f64], xp: f64, mode: &InterpMode) -> f64 {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);

    match n {
        0 => 0.0,
        1 => y[0],
        _ => {
            let outside = if xp < x[0] {
                Some(y[0])
            } else if xp > x[n - 1] {
                Some(y[n - 1])
            } else {
                None
            };

            match (outside, mode) {
                (None, _) | (Some(_), InterpMode::Extrapolate) => {
                    lerp_segment(x, y, segment_index(x, xp), xp)
                }
                (Some(edge), InterpMode::FirstLast) => edge,
                (Some(_), InterpMode::Constant(val)) => *val,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_tables() {
        assert_eq!(interp(&[], &[], 2.0, &InterpMode::FirstLast), 0.0);
        assert_eq!(interp(&[1.0], &[2.0], 5.0, &InterpMode::Constant(0.0)), 2.0);
    }

    #[test]
    fn interior_points() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.5];
        let y = [0.0, 2.0, 5.0, 3.0, 2.0];

        assert_eq!(interp(&x, &y, 0.25, &InterpMode::FirstLast), 0.5);
        assert_eq!(interp(&x, &y, 1.5, &InterpMode::FirstLast), 3.5);
        assert_eq!(interp(&x, &y, 2.0, &InterpMode::FirstLast), 5.0);
        assert_eq!(interp(&x, &y, 4.5, &InterpMode::Constant(0.0)), 2.0);
    }

    #[test]
    fn outside_modes() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 10.0, 0.0];

        assert_eq!(interp(&x, &y, -1.0, &InterpMode::FirstLast), 0.0);
        assert_eq!(interp(&x, &y, 2.5, &InterpMode::Constant(0.0)), 0.0);
        assert_eq!(interp(&x, &y, -0.5, &InterpMode::Extrapolate), -5.0);
        assert_eq!(interp(&x, &y, 3.0, &InterpMode::Extrapolate), -10.0);
        assert_eq!(interp(&x, &y, 7.0, &InterpMode::Constant(-1.0)), -1.0);
    }

    #[test]
    fn repeated_abscissa_does_not_divide_by_zero() {
        let x = [0.0, 1.0, 1.0];
        let y = [0.0, 4.0, 8.0];
        let v = interp(&x, &y, 1.0, &InterpMode::Constant(0.0));
        assert!(v.is_finite());
        assert_eq!(v, 8.0);
    }
}
