//! Aggregate statistics accumulated while emitting primitive references.
//!
//! Both aggregates are monoids: `merge` is associative and commutative with
//! `EMPTY` as identity, so partial aggregates from disjoint index ranges
//! combine without reprocessing.

use serde::{Deserialize, Serialize};
use strand_math::{Aabb3, LinearBounds};

use crate::primref::{PrimRef, PrimRefMB};

/// Geometry and centroid bounds over a set of accepted primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub geom_bounds: Aabb3,
    pub centroid_bounds: Aabb3,
    pub count: usize,
}

impl BuildStats {
    pub const EMPTY: Self = Self {
        geom_bounds: Aabb3::EMPTY,
        centroid_bounds: Aabb3::EMPTY,
        count: 0,
    };

    pub fn add(&mut self, prim: &PrimRef) {
        self.geom_bounds = self.geom_bounds.merge(&prim.bounds);
        self.centroid_bounds.extend_point(prim.center());
        self.count += 1;
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            geom_bounds: self.geom_bounds.merge(&other.geom_bounds),
            centroid_bounds: self.centroid_bounds.merge(&other.centroid_bounds),
            count: self.count + other.count,
        }
    }
}

impl Default for BuildStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Motion-blur aggregate: linear geometry bounds, centroid bounds of the
/// per-primitive union boxes, and the widest segment count seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildStatsMB {
    pub geom_bounds: LinearBounds,
    pub centroid_bounds: Aabb3,
    pub count: usize,
    pub max_time_segments: u32,
}

impl BuildStatsMB {
    pub const EMPTY: Self = Self {
        geom_bounds: LinearBounds::EMPTY,
        centroid_bounds: Aabb3::EMPTY,
        count: 0,
        max_time_segments: 0,
    };

    pub fn add(&mut self, prim: &PrimRefMB) {
        self.geom_bounds = self.geom_bounds.merge(&prim.lbounds);
        self.centroid_bounds.extend_point(prim.center());
        self.count += 1;
        self.max_time_segments = self.max_time_segments.max(prim.num_time_segments);
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            geom_bounds: self.geom_bounds.merge(&other.geom_bounds),
            centroid_bounds: self.centroid_bounds.merge(&other.centroid_bounds),
            count: self.count + other.count,
            max_time_segments: self.max_time_segments.max(other.max_time_segments),
        }
    }
}

impl Default for BuildStatsMB {
    fn default() -> Self {
        Self::EMPTY
    }
}
