//! Cubic Bezier segment.

use strand_math::{Aabb3, Point3, Vec4, Vec4Swizzles, Vector3};

use super::cubic::PowerCubic;
use super::CurveSegment;

/// A cubic Bezier over four (position, radius) control points.
#[derive(Debug, Clone, Copy)]
pub struct BezierSegment {
    cp: [Vec4; 4],
    poly: PowerCubic,
}

impl BezierSegment {
    pub fn new(cp: [Vec4; 4]) -> Self {
        let [p0, p1, p2, p3] = cp;
        let poly = PowerCubic::new(
            p0,
            3.0 * (p1 - p0),
            3.0 * (p0 - 2.0 * p1 + p2),
            -p0 + 3.0 * p1 - 3.0 * p2 + p3,
        );
        Self { cp, poly }
    }

    pub fn control_points(&self) -> &[Vec4; 4] {
        &self.cp
    }
}

impl CurveSegment for BezierSegment {
    fn point_at(&self, t: f32) -> Point3 {
        self.poly.point_at(t).xyz()
    }

    fn radius_at(&self, t: f32) -> f32 {
        self.poly.point_at(t).w
    }

    fn tangent_at(&self, t: f32) -> Vector3 {
        self.poly.derivative_at(t).xyz()
    }

    // Bezier curves interpolate their outer control points.
    fn start(&self) -> Point3 {
        self.cp[0].xyz()
    }

    fn end(&self) -> Point3 {
        self.cp[3].xyz()
    }

    fn accurate_bounds(&self) -> Aabb3 {
        self.poly.accurate_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec4;

    fn sample_cp() -> [Vec4; 4] {
        [
            vec4(0.0, 0.0, 0.0, 0.2),
            vec4(1.0, 3.0, 0.0, 0.3),
            vec4(2.0, 3.0, 1.0, 0.3),
            vec4(3.0, 0.0, 1.0, 0.2),
        ]
    }

    #[test]
    fn test_endpoints_interpolate() {
        let seg = BezierSegment::new(sample_cp());
        assert!((seg.point_at(0.0) - seg.cp[0].xyz()).length() < 1e-6);
        assert!((seg.point_at(1.0) - seg.cp[3].xyz()).length() < 1e-6);
    }

    #[test]
    fn test_matches_bernstein_form() {
        let cp = sample_cp();
        let seg = BezierSegment::new(cp);
        for k in 0..=10 {
            let t = k as f32 / 10.0;
            let s = 1.0 - t;
            let expected = cp[0] * (s * s * s)
                + cp[1] * (3.0 * s * s * t)
                + cp[2] * (3.0 * s * t * t)
                + cp[3] * (t * t * t);
            assert!(
                (seg.point_at(t) - expected.xyz()).length() < 1e-5,
                "mismatch at t={}",
                t
            );
            assert!((seg.radius_at(t) - expected.w).abs() < 1e-5);
        }
    }

    #[test]
    fn test_start_tangent_direction() {
        let seg = BezierSegment::new(sample_cp());
        let expected = 3.0 * (seg.cp[1] - seg.cp[0]).xyz();
        assert!((seg.tangent_at(0.0) - expected).length() < 1e-5);
    }

    #[test]
    fn test_accurate_bounds_contains_curve() {
        let seg = BezierSegment::new(sample_cp());
        let bounds = seg.accurate_bounds();
        for k in 0..=50 {
            let t = k as f32 / 50.0;
            assert!(bounds.contains_point(seg.point_at(t)));
        }
    }
}
