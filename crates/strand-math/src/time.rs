//! Mapping of continuous animation time onto discrete timestep samples.
//!
//! A geometry with `n + 1` timesteps has `n` time segments; continuous time
//! `u` in `[0, 1]` spans the whole animation.

use serde::{Deserialize, Serialize};

/// A closed interval of continuous animation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub lo: f32,
    pub hi: f32,
}

impl TimeRange {
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// The whole animation, `[0, 1]`.
    pub fn full() -> Self {
        Self { lo: 0.0, hi: 1.0 }
    }

    pub fn width(&self) -> f32 {
        self.hi - self.lo
    }

    pub fn center(&self) -> f32 {
        0.5 * (self.lo + self.hi)
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Map continuous time `u` to a segment index and interpolation fraction.
///
/// The index is clamped to `[0, num_segments - 1]` so that `index + 1` is
/// always a valid timestep; `index + fraction` reconstructs
/// `u * num_segments`.
pub fn time_segment(u: f32, num_segments: usize) -> (usize, f32) {
    if num_segments == 0 {
        return (0, 0.0);
    }
    let scaled = u * num_segments as f32;
    let index = scaled.floor().clamp(0.0, num_segments as f32 - 1.0);
    (index as usize, scaled - index)
}

/// Inclusive range of timestep sample indices whose support overlaps the
/// given time window.
///
/// The result indexes *samples* (so it lies in `[0, num_segments]`); bounding
/// a window requires the static bounds at every returned index. A zero-width
/// window still yields at least one sample.
pub fn time_segment_range(window: TimeRange, num_segments: usize) -> (usize, usize) {
    let n = num_segments as f32;
    let lo = (window.lo * n).floor().max(0.0) as usize;
    let hi = (window.hi * n).ceil().max(0.0) as usize;
    let lo = lo.min(num_segments);
    let hi = hi.min(num_segments).max(lo);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_reconstructs_scaled_time() {
        for n in 1..5 {
            for k in 0..=20 {
                let u = k as f32 / 20.0;
                let (index, fraction) = time_segment(u, n);
                assert!(index < n);
                assert!((0.0..=1.0).contains(&fraction));
                assert!(
                    (index as f32 + fraction - u * n as f32).abs() < 1e-5,
                    "u={} n={} -> ({}, {})",
                    u,
                    n,
                    index,
                    fraction
                );
            }
        }
    }

    #[test]
    fn test_segment_clamps_at_end() {
        let (index, fraction) = time_segment(1.0, 4);
        assert_eq!(index, 3);
        assert!((fraction - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_range_full_window() {
        assert_eq!(time_segment_range(TimeRange::full(), 4), (0, 4));
    }

    #[test]
    fn test_range_partial_window() {
        // [0.3, 0.6] with 4 segments touches samples 1..=3
        assert_eq!(time_segment_range(TimeRange::new(0.3, 0.6), 4), (1, 3));
    }

    #[test]
    fn test_range_zero_width_window() {
        let (lo, hi) = time_segment_range(TimeRange::new(0.5, 0.5), 2);
        assert!(lo <= hi, "degenerate window must map to a non-empty range");
        assert_eq!((lo, hi), (1, 1));

        // Zero width off a sample boundary still covers the enclosing pair.
        let (lo, hi) = time_segment_range(TimeRange::new(0.25, 0.25), 2);
        assert_eq!((lo, hi), (0, 1));
    }

    #[test]
    fn test_range_clamps_outside_animation() {
        assert_eq!(time_segment_range(TimeRange::new(-1.0, 2.0), 3), (0, 3));
    }
}
