pub mod aabb;
pub mod frame;
pub mod lbounds;
pub mod time;

pub use glam::{Affine3A, Mat3, Vec2, Vec3, Vec4, Vec4Swizzles};
pub use aabb::Aabb3;
pub use frame::Frame;
pub use lbounds::LinearBounds;
pub use time::TimeRange;

pub type Point3 = Vec3;
pub type Vector3 = Vec3;
