//! Orthonormal coordinate frames for locally aligned bounding.

use glam::Mat3;
use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// A right-handed orthonormal basis.
///
/// `z` is the primary axis; curve-aligned frames point it along the curve so
/// that local-space boxes hug long diagonal primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Frame {
    pub const IDENTITY: Self = Self {
        x: Vector3::X,
        y: Vector3::Y,
        z: Vector3::Z,
    };

    pub fn new(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self { x, y, z }
    }

    /// Complete a unit primary axis into a full frame.
    ///
    /// The secondary axes are chosen deterministically: of the two canonical
    /// perpendiculars, the one with the larger squared length wins, so nearby
    /// inputs produce nearby frames.
    pub fn from_z(z: Vector3) -> Self {
        let dx0 = Vector3::new(0.0, z.z, -z.y);
        let dx1 = Vector3::new(-z.z, 0.0, z.x);
        let x = if dx0.length_squared() > dx1.length_squared() {
            dx0
        } else {
            dx1
        }
        .normalize();
        let y = z.cross(x).normalize();
        Self { x, y, z }
    }

    pub fn to_mat3(&self) -> Mat3 {
        Mat3::from_cols(self.x, self.y, self.z)
    }

    /// Express a world-space point in this frame.
    pub fn to_local(&self, p: Point3) -> Point3 {
        Point3::new(self.x.dot(p), self.y.dot(p), self.z.dot(p))
    }

    /// Map a frame-local point back to world space.
    pub fn to_world(&self, p: Point3) -> Point3 {
        self.x * p.x + self.y * p.y + self.z * p.z
    }

    pub fn is_orthonormal(&self, eps: f32) -> bool {
        (self.x.length() - 1.0).abs() < eps
            && (self.y.length() - 1.0).abs() < eps
            && (self.z.length() - 1.0).abs() < eps
            && self.x.dot(self.y).abs() < eps
            && self.y.dot(self.z).abs() < eps
            && self.z.dot(self.x).abs() < eps
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::vec3;

    #[test]
    fn test_from_z_is_orthonormal() {
        for z in [
            Vector3::Z,
            Vector3::X,
            Vector3::Y,
            vec3(1.0, 2.0, -3.0).normalize(),
            vec3(-0.3, 0.1, 0.9).normalize(),
        ] {
            let f = Frame::from_z(z);
            assert!(f.is_orthonormal(1e-5), "not orthonormal for z={:?}", z);
            assert_relative_eq!(f.z.dot(z), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_right_handed() {
        let f = Frame::from_z(vec3(0.2, -0.4, 0.6).normalize());
        let cross = f.x.cross(f.y);
        assert!((cross - f.z).length() < 1e-5);
    }

    #[test]
    fn test_local_world_round_trip() {
        let f = Frame::from_z(vec3(1.0, 1.0, 1.0).normalize());
        let p = vec3(0.3, -2.0, 5.0);
        let back = f.to_world(f.to_local(p));
        assert!((back - p).length() < 1e-4);
    }
}
