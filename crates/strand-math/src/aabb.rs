use crate::{Point3, Vector3};
use glam::Affine3A;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    /// The empty box: the identity of `merge`, contains nothing.
    pub const EMPTY: Self = Self {
        min: Point3::splat(f32::INFINITY),
        max: Point3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// All coordinates finite (and the box non-empty).
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn extend_point(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box by a uniform amount on every side.
    pub fn enlarge(&self, amount: f32) -> Self {
        let offset = Vector3::splat(amount);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }

    /// Componentwise interpolation between two boxes.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        Self {
            min: a.min.lerp(b.min, t),
            max: a.max.lerp(b.max, t),
        }
    }

    /// Bounds of the eight transformed corners.
    pub fn transformed(&self, space: &Affine3A) -> Self {
        let mut out = Self::EMPTY;
        for corner in 0..8 {
            let p = Point3::new(
                if corner & 1 == 0 { self.min.x } else { self.max.x },
                if corner & 2 == 0 { self.min.y } else { self.max.y },
                if corner & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.extend_point(space.transform_point3(p));
        }
        out
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn test_from_points() {
        let pts = vec![vec3(1.0, 2.0, 3.0), vec3(-1.0, 5.0, 0.0), vec3(3.0, -1.0, 2.0)];
        let aabb = Aabb3::from_points(&pts).unwrap();
        assert_eq!(aabb.min, vec3(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, vec3(3.0, 5.0, 3.0));
    }

    #[test]
    fn test_empty_is_merge_identity() {
        let b = Aabb3::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0));
        assert!(Aabb3::EMPTY.is_empty());
        assert_eq!(Aabb3::EMPTY.merge(&b), b);
        assert_eq!(b.merge(&Aabb3::EMPTY), b);
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb3::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(vec3(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(vec3(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_contains_box() {
        let outer = Aabb3::new(vec3(0.0, 0.0, 0.0), vec3(4.0, 4.0, 4.0));
        let inner = Aabb3::new(vec3(1.0, 1.0, 1.0), vec3(2.0, 2.0, 2.0));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_enlarge() {
        let aabb = Aabb3::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0)).enlarge(0.5);
        assert_eq!(aabb.min, vec3(-0.5, -0.5, -0.5));
        assert_eq!(aabb.max, vec3(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_transformed_translation() {
        let aabb = Aabb3::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0));
        let moved = aabb.transformed(&Affine3A::from_translation(vec3(10.0, 0.0, 0.0)));
        assert!((moved.min - vec3(10.0, 0.0, 0.0)).length() < 1e-6);
        assert!((moved.max - vec3(11.0, 1.0, 1.0)).length() < 1e-6);
    }
}
