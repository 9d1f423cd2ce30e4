//! Curve segment traits and per-basis implementations.

mod bezier;
mod bspline;
mod cubic;
mod linear;

use serde::{Deserialize, Serialize};
use strand_math::{Aabb3, Point3, Vec4, Vector3};

pub use bezier::BezierSegment;
pub use bspline::BSplineSegment;
pub use cubic::PowerCubic;
pub use linear::LinearSegment;

/// The control-point-to-curve mapping of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basis {
    Linear,
    Bezier,
    BSpline,
}

/// How a curve is rendered, which selects its bounding strategy.
///
/// Round curves are swept-radius tubes and get accurate offset-surface
/// bounds; flat curves are ribbons and get cheap tessellated bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Form {
    Round,
    Flat,
}

/// A single curve over four (position, radius) control points,
/// parameterized over `[0, 1]`.
pub trait CurveSegment: Send + Sync {
    /// Evaluate the curve position at parameter `t`.
    fn point_at(&self, t: f32) -> Point3;

    /// Evaluate the interpolated radius at parameter `t`.
    fn radius_at(&self, t: f32) -> f32;

    /// Evaluate the derivative (tangent direction, unnormalized) at `t`.
    fn tangent_at(&self, t: f32) -> Vector3;

    fn start(&self) -> Point3 {
        self.point_at(0.0)
    }

    fn end(&self) -> Point3 {
        self.point_at(1.0)
    }

    /// Bounds of the full swept curve body, radius included.
    fn accurate_bounds(&self) -> Aabb3;
}

/// Runtime dispatch over the three bases.
///
/// Constructed per query from gathered control points; the variants stay
/// `Copy` so no allocation happens on the bounding path.
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    Linear(LinearSegment),
    Bezier(BezierSegment),
    BSpline(BSplineSegment),
}

impl Basis {
    /// Build the evaluation strategy for this basis over four control
    /// points.
    pub fn segment(self, cp: [Vec4; 4]) -> Segment {
        match self {
            Basis::Linear => Segment::Linear(LinearSegment::new(cp)),
            Basis::Bezier => Segment::Bezier(BezierSegment::new(cp)),
            Basis::BSpline => Segment::BSpline(BSplineSegment::new(cp)),
        }
    }
}

impl CurveSegment for Segment {
    fn point_at(&self, t: f32) -> Point3 {
        match self {
            Segment::Linear(s) => s.point_at(t),
            Segment::Bezier(s) => s.point_at(t),
            Segment::BSpline(s) => s.point_at(t),
        }
    }

    fn radius_at(&self, t: f32) -> f32 {
        match self {
            Segment::Linear(s) => s.radius_at(t),
            Segment::Bezier(s) => s.radius_at(t),
            Segment::BSpline(s) => s.radius_at(t),
        }
    }

    fn tangent_at(&self, t: f32) -> Vector3 {
        match self {
            Segment::Linear(s) => s.tangent_at(t),
            Segment::Bezier(s) => s.tangent_at(t),
            Segment::BSpline(s) => s.tangent_at(t),
        }
    }

    fn start(&self) -> Point3 {
        match self {
            Segment::Linear(s) => s.start(),
            Segment::Bezier(s) => s.start(),
            Segment::BSpline(s) => s.start(),
        }
    }

    fn end(&self) -> Point3 {
        match self {
            Segment::Linear(s) => s.end(),
            Segment::Bezier(s) => s.end(),
            Segment::BSpline(s) => s.end(),
        }
    }

    fn accurate_bounds(&self) -> Aabb3 {
        match self {
            Segment::Linear(s) => s.accurate_bounds(),
            Segment::Bezier(s) => s.accurate_bounds(),
            Segment::BSpline(s) => s.accurate_bounds(),
        }
    }
}

/// Bound a flat (ribbon) curve by the union of `rate` straight sub-segment
/// boxes, each enlarged by the larger of its endpoint radii.
pub fn tessellated_bounds(curve: &dyn CurveSegment, rate: u32) -> Aabb3 {
    let rate = rate.max(1);
    let mut out = Aabb3::EMPTY;
    let mut prev_p = curve.point_at(0.0);
    let mut prev_r = curve.radius_at(0.0);
    for k in 1..=rate {
        let t = k as f32 / rate as f32;
        let p = curve.point_at(t);
        let r = curve.radius_at(t);
        let sub = Aabb3::new(prev_p.min(p), prev_p.max(p)).enlarge(prev_r.max(r));
        out = out.merge(&sub);
        prev_p = p;
        prev_r = r;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec4;

    fn arc_cp() -> [Vec4; 4] {
        [
            vec4(0.0, 0.0, 0.0, 0.1),
            vec4(1.0, 2.0, 0.0, 0.1),
            vec4(2.0, 2.0, 0.0, 0.1),
            vec4(3.0, 0.0, 0.0, 0.1),
        ]
    }

    #[test]
    fn test_tessellated_bounds_is_union_of_rate_subsegments() {
        let seg = Basis::Bezier.segment(arc_cp());
        let rate = 4;
        let bounds = tessellated_bounds(&seg, rate);

        let mut expected = Aabb3::EMPTY;
        for k in 0..rate {
            let t0 = k as f32 / rate as f32;
            let t1 = (k + 1) as f32 / rate as f32;
            let (p0, p1) = (seg.point_at(t0), seg.point_at(t1));
            let r = seg.radius_at(t0).max(seg.radius_at(t1));
            expected = expected.merge(&Aabb3::new(p0.min(p1), p0.max(p1)).enlarge(r));
        }
        assert_eq!(bounds, expected);
    }

    #[test]
    fn test_tessellated_bounds_contains_samples() {
        let seg = Basis::BSpline.segment(arc_cp());
        let bounds = tessellated_bounds(&seg, 8);
        for k in 0..=8 {
            let p = seg.point_at(k as f32 / 8.0);
            assert!(bounds.contains_point(p), "sample {} outside bounds", k);
        }
    }

    #[test]
    fn test_basis_dispatch_matches_inner() {
        let cp = arc_cp();
        let seg = Basis::Bezier.segment(cp);
        let inner = BezierSegment::new(cp);
        for k in 0..=4 {
            let t = k as f32 / 4.0;
            assert!((seg.point_at(t) - inner.point_at(t)).length() < 1e-6);
        }
    }
}
