use serde::{Deserialize, Serialize};
use strand_core::GeomId;
use strand_math::{Aabb3, LinearBounds, Point3, TimeRange};

/// A compact record handed to the spatial-structure builder: the bounds of
/// one curve plus enough identity to find it again at traversal time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimRef {
    pub bounds: Aabb3,
    pub geom_id: GeomId,
    pub prim_id: u32,
}

impl PrimRef {
    pub fn new(bounds: Aabb3, geom_id: GeomId, prim_id: u32) -> Self {
        Self {
            bounds,
            geom_id,
            prim_id,
        }
    }

    pub fn center(&self) -> Point3 {
        self.bounds.center()
    }
}

/// Motion-blurred primitive reference: linear bounds over the build's time
/// window plus the number of time segments the curve animates across.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimRefMB {
    pub lbounds: LinearBounds,
    pub num_time_segments: u32,
    pub time_range: TimeRange,
    pub geom_id: GeomId,
    pub prim_id: u32,
}

impl PrimRefMB {
    pub fn new(
        lbounds: LinearBounds,
        num_time_segments: u32,
        time_range: TimeRange,
        geom_id: GeomId,
        prim_id: u32,
    ) -> Self {
        Self {
            lbounds,
            num_time_segments,
            time_range,
            geom_id,
            prim_id,
        }
    }

    pub fn center(&self) -> Point3 {
        self.lbounds.union().center()
    }
}
