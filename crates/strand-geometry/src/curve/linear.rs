//! Piecewise-linear segment over four control points.

use strand_math::{Aabb3, Point3, Vec4, Vec4Swizzles, Vector3};

use super::CurveSegment;

/// A three-span polyline through four (position, radius) control points,
/// uniformly parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct LinearSegment {
    cp: [Vec4; 4],
}

impl LinearSegment {
    pub fn new(cp: [Vec4; 4]) -> Self {
        Self { cp }
    }

    pub fn control_points(&self) -> &[Vec4; 4] {
        &self.cp
    }

    fn eval(&self, t: f32) -> Vec4 {
        let scaled = t * 3.0;
        let span = scaled.floor().clamp(0.0, 2.0);
        let f = scaled - span;
        let k = span as usize;
        self.cp[k].lerp(self.cp[k + 1], f)
    }
}

impl CurveSegment for LinearSegment {
    fn point_at(&self, t: f32) -> Point3 {
        self.eval(t).xyz()
    }

    fn radius_at(&self, t: f32) -> f32 {
        self.eval(t).w
    }

    fn tangent_at(&self, t: f32) -> Vector3 {
        let span = (t * 3.0).floor().clamp(0.0, 2.0) as usize;
        (self.cp[span + 1] - self.cp[span]).xyz() * 3.0
    }

    fn start(&self) -> Point3 {
        self.cp[0].xyz()
    }

    fn end(&self) -> Point3 {
        self.cp[3].xyz()
    }

    // Radius interpolates linearly along each span, so extending every
    // vertex by its own radius is already exact.
    fn accurate_bounds(&self) -> Aabb3 {
        let mut bounds = Aabb3::EMPTY;
        for v in self.cp {
            let r = v.w.max(0.0);
            bounds.extend_point(v.xyz() - Vector3::splat(r));
            bounds.extend_point(v.xyz() + Vector3::splat(r));
        }
        bounds
    }
}
