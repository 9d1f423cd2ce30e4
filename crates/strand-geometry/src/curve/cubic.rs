//! Shared power-form cubic evaluation and exact extrema bounding.

use strand_math::{Aabb3, Vec4, Vec4Swizzles};

/// A cubic `c0 + c1 t + c2 t^2 + c3 t^3` over (position, radius) values.
///
/// Both cubic bases reduce to this form through their basis matrices, so
/// evaluation and bounding are written once here.
#[derive(Debug, Clone, Copy)]
pub struct PowerCubic {
    pub c: [Vec4; 4],
}

impl PowerCubic {
    pub fn new(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            c: [c0, c1, c2, c3],
        }
    }

    pub fn point_at(&self, t: f32) -> Vec4 {
        ((self.c[3] * t + self.c[2]) * t + self.c[1]) * t + self.c[0]
    }

    pub fn derivative_at(&self, t: f32) -> Vec4 {
        (self.c[3] * (3.0 * t) + self.c[2] * 2.0) * t + self.c[1]
    }

    /// Exact bounds of the swept curve body over `[0, 1]`.
    ///
    /// Per-axis extrema come from the roots of the derivative quadratic; the
    /// position box is then enlarged by the maximum of the radius cubic,
    /// found the same way.
    pub fn accurate_bounds(&self) -> Aabb3 {
        let p0 = self.point_at(0.0);
        let p1 = self.point_at(1.0);
        let mut bounds = Aabb3::new(p0.xyz().min(p1.xyz()), p0.xyz().max(p1.xyz()));
        let mut max_radius = p0.w.max(p1.w);

        for axis in 0..4 {
            let a = 3.0 * self.c[3][axis];
            let b = 2.0 * self.c[2][axis];
            let c = self.c[1][axis];
            let (roots, n) = quadratic_roots_in_unit(a, b, c);
            for &t in &roots[..n] {
                let p = self.point_at(t);
                if axis < 3 {
                    bounds.extend_point(p.xyz());
                } else {
                    max_radius = max_radius.max(p.w);
                }
            }
        }

        bounds.enlarge(max_radius.max(0.0))
    }
}

/// Roots of `a t^2 + b t + c` strictly inside `(0, 1)`.
///
/// Uses the numerically stable form that avoids cancellation between `-b`
/// and the discriminant root.
pub fn quadratic_roots_in_unit(a: f32, b: f32, c: f32) -> ([f32; 2], usize) {
    let mut roots = [0.0f32; 2];
    let mut n = 0;

    if a.abs() < 1e-12 {
        // Degenerates to the linear case.
        if b.abs() > 1e-12 {
            let t = -c / b;
            if t > 0.0 && t < 1.0 {
                roots[n] = t;
                n += 1;
            }
        }
        return (roots, n);
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return (roots, 0);
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());

    let t0 = q / a;
    if t0 > 0.0 && t0 < 1.0 {
        roots[n] = t0;
        n += 1;
    }
    if q.abs() > 0.0 {
        let t1 = c / q;
        if t1 > 0.0 && t1 < 1.0 && t1 != t0 {
            roots[n] = t1;
            n += 1;
        }
    }
    (roots, n)
}
