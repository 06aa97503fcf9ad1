//! The sliding-window primitive shared by every bar computation.

use crate::util::math::{prefix_sums, range_sum};

/// Default window radius: a centered 1000 ms window.
pub(crate) const DEFAULT_RADIUS: usize = 500;

/// How the window contents are reduced to one sample.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    /// Window sum scaled by 0.001, i.e. stress per second over unit steps.
    Sum,
    /// Plain average over the (possibly clipped) window.
    Average,
}

/// Centered moving window over a per-millisecond timeline.
///
/// `out[s]` covers `[max(0, s - radius), min(len, s + radius))`; a single
/// prefix sum keeps the whole pass O(len).
pub(crate) fn smooth(samples: &[f64], radius: usize, mode: Mode) -> Vec<f64> {
    let len = samples.len();
    let prefix = prefix_sums(samples);
    let mut out = Vec::with_capacity(len);

    for s in 0..len {
        let left = s.saturating_sub(radius);
        let right = (s + radius).min(len);
        let window = range_sum(&prefix, left, right);

        out.push(match mode {
            Mode::Sum => 0.001 * window,
            Mode::Average => window / (right - left) as f64,
        });
    }

    out
}

/// The default smoothing used by J, X, P, and R.
pub(crate) fn smooth_sum(samples: &[f64]) -> Vec<f64> {
    smooth(samples, DEFAULT_RADIUS, Mode::Sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_of_constant_signal_is_preserved() {
        // A full 1000-sample window times 0.001 reproduces the value.
        let samples = vec![2.5; 2000];
        let smoothed = smooth_sum(&samples);

        for &v in &smoothed[500..1500] {
            assert!((v - 2.5).abs() < 1e-12);
        }

        // Clipped windows at the edges shrink the sum but not the scale.
        assert!((smoothed[0] - 1.25).abs() < 1e-9);
    }

    #[test]
    fn average_mode_is_exact_on_constants_everywhere() {
        let samples = vec![0.75; 1200];

        for &v in &smooth(&samples, 250, Mode::Average) {
            assert!((v - 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn sum_window_is_centered() {
        let mut samples = vec![0.0; 1501];
        samples[750] = 1.0;

        let smoothed = smooth_sum(&samples);

        assert!((smoothed[750] - 0.001).abs() < 1e-15);
        assert!((smoothed[251] - 0.001).abs() < 1e-15);
        assert!(smoothed[250].abs() < 1e-15);
        // Half-open window: the left edge is included, so coverage runs
        // through s = 1250 on the right.
        assert!((smoothed[1250] - 0.001).abs() < 1e-15);
        assert!(smoothed[1251].abs() < 1e-15);
    }
}
