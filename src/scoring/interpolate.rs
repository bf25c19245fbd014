//! Piecewise-linear interpolation, per spec.md §4.2.

use crate::config::Breakpoint;

/// Map a raw metric value to a 1-10 score via piecewise-linear
/// interpolation against `breakpoints`.
///
/// - Zero breakpoints: return 5.0 (neutral).
/// - One breakpoint: return its score, clamped to [1, 10].
/// - `x` at or beyond either end: return that end's score (clamp, not
///   extrapolate).
/// - Otherwise: linear interpolation within the enclosing segment.
pub fn interpolate(breakpoints: &[Breakpoint], x: f64) -> f64 {
    match breakpoints {
        [] => 5.0,
        [only] => only.score.clamp(1.0, 10.0),
        _ => {
            let first = breakpoints.first().unwrap();
            let last = breakpoints.last().unwrap();
            if x <= first.raw_value {
                return first.score;
            }
            if x >= last.raw_value {
                return last.score;
            }
            for window in breakpoints.windows(2) {
                let (a, b) = (window[0], window[1]);
                if x >= a.raw_value && x <= b.raw_value {
                    if (b.raw_value - a.raw_value).abs() < f64::EPSILON {
                        return a.score;
                    }
                    let t = (x - a.raw_value) / (b.raw_value - a.raw_value);
                    return a.score + t * (b.score - a.score);
                }
            }
            last.score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bps(pairs: &[(f64, f64)]) -> Vec<Breakpoint> {
        pairs
            .iter()
            .map(|(r, s)| Breakpoint { raw_value: *r, score: *s })
            .collect()
    }

    #[test]
    fn empty_breakpoints_is_neutral() {
        assert_eq!(interpolate(&[], 42.0), 5.0);
    }

    #[test]
    fn single_breakpoint_returns_clamped_score() {
        let bp = vec![Breakpoint { raw_value: 5.0, score: 12.0 }];
        assert_eq!(interpolate(&bp, 100.0), 10.0);
    }

    #[test]
    fn clamps_below_and_above_range() {
        let breakpoints = bps(&[(0.0, 10.0), (10.0, 1.0)]);
        assert_eq!(interpolate(&breakpoints, -5.0), 10.0);
        assert_eq!(interpolate(&breakpoints, 50.0), 1.0);
    }

    #[test]
    fn interpolates_midpoint_linearly() {
        let breakpoints = bps(&[(0.0, 10.0), (10.0, 0.0)]);
        assert_eq!(interpolate(&breakpoints, 5.0), 5.0);
    }

    #[test]
    fn monotonicity_holds_for_increasing_breakpoints() {
        let breakpoints = bps(&[(0.0, 1.0), (5.0, 5.0), (10.0, 10.0)]);
        let mut prev = interpolate(&breakpoints, 0.0);
        for x in 1..=100 {
            let x = x as f64 / 10.0;
            let current = interpolate(&breakpoints, x);
            assert!(current >= prev - 1e-9);
            prev = current;
        }
    }
}
