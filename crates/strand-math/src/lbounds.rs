//! Bounds that vary linearly over a time interval.

use serde::{Deserialize, Serialize};

use crate::aabb::Aabb3;
use crate::time::{time_segment_range, TimeRange};
use crate::Vector3;

/// A pair of boxes bounding a moving primitive at the start and end of a
/// time interval; the primitive stays inside the componentwise
/// interpolation at every intermediate time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearBounds {
    pub bounds0: Aabb3,
    pub bounds1: Aabb3,
}

impl LinearBounds {
    pub const EMPTY: Self = Self {
        bounds0: Aabb3::EMPTY,
        bounds1: Aabb3::EMPTY,
    };

    pub fn new(bounds0: Aabb3, bounds1: Aabb3) -> Self {
        Self { bounds0, bounds1 }
    }

    /// Bounds at both endpoints of a static primitive.
    pub fn constant(bounds: Aabb3) -> Self {
        Self {
            bounds0: bounds,
            bounds1: bounds,
        }
    }

    /// The interpolated box at fraction `t` of the interval.
    pub fn bounds_at(&self, t: f32) -> Aabb3 {
        Aabb3::lerp(&self.bounds0, &self.bounds1, t)
    }

    /// A single box covering the whole interval.
    pub fn union(&self) -> Aabb3 {
        self.bounds0.merge(&self.bounds1)
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            bounds0: self.bounds0.merge(&other.bounds0),
            bounds1: self.bounds1.merge(&other.bounds1),
        }
    }

    /// Build linear bounds over `window` from static bounds sampled at each
    /// touched timestep.
    ///
    /// The endpoint boxes start as the first and last touched samples; each
    /// interior sample then widens both endpoints by its deficit against the
    /// interpolated box at its own time, so every sampled box ends up inside
    /// the interpolation.
    pub fn from_time_samples<F>(window: TimeRange, num_segments: usize, sample: F) -> Self
    where
        F: Fn(usize) -> Aabb3,
    {
        let (lo, hi) = time_segment_range(window, num_segments);
        if lo == hi {
            return Self::constant(sample(lo));
        }

        let mut out = Self::new(sample(lo), sample(hi));
        let span = (hi - lo) as f32;
        for k in lo + 1..hi {
            let f = (k - lo) as f32 / span;
            let interp = out.bounds_at(f);
            let bk = sample(k);
            let deficit_min = (interp.min - bk.min).max(Vector3::ZERO);
            let deficit_max = (bk.max - interp.max).max(Vector3::ZERO);
            out.bounds0.min -= deficit_min;
            out.bounds1.min -= deficit_min;
            out.bounds0.max += deficit_max;
            out.bounds1.max += deficit_max;
        }
        out
    }
}
