pub mod aabb;
pub mod interp;
pub mod transform;

pub use glam::{DMat4, DVec3, DVec4};
pub use aabb::Aabb3;
pub use interp::{lerp, wrap_angle};
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Homogeneous point (`w = 1`) or direction (`w = 0`).
pub type Vector4 = DVec4;

/// Lift a point into homogeneous coordinates.
#[inline]
pub fn point4(p: Point3) -> Vector4 {
    p.extend(1.0)
}

/// Lift a direction into homogeneous coordinates.
#[inline]
pub fn direction4(v: Vector3) -> Vector4 {
    v.extend(0.0)
}
