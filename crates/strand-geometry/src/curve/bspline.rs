//! Uniform cubic B-spline segment.

use strand_math::{Aabb3, Point3, Vec4, Vec4Swizzles, Vector3};

use super::cubic::PowerCubic;
use super::CurveSegment;

/// One span of a uniform cubic B-spline over four (position, radius)
/// control points.
///
/// Unlike the Bezier basis the curve does not interpolate its outer control
/// points; start and end are evaluated.
#[derive(Debug, Clone, Copy)]
pub struct BSplineSegment {
    cp: [Vec4; 4],
    poly: PowerCubic,
}

impl BSplineSegment {
    pub fn new(cp: [Vec4; 4]) -> Self {
        let [p0, p1, p2, p3] = cp;
        let poly = PowerCubic::new(
            (p0 + 4.0 * p1 + p2) / 6.0,
            (p2 - p0) * 0.5,
            (p0 - 2.0 * p1 + p2) * 0.5,
            (-p0 + 3.0 * p1 - 3.0 * p2 + p3) / 6.0,
        );
        Self { cp, poly }
    }

    pub fn control_points(&self) -> &[Vec4; 4] {
        &self.cp
    }
}

impl CurveSegment for BSplineSegment {
    fn point_at(&self, t: f32) -> Point3 {
        self.poly.point_at(t).xyz()
    }

    fn radius_at(&self, t: f32) -> f32 {
        self.poly.point_at(t).w
    }

    fn tangent_at(&self, t: f32) -> Vector3 {
        self.poly.derivative_at(t).xyz()
    }

    fn accurate_bounds(&self) -> Aabb3 {
        self.poly.accurate_bounds()
    }
}
