use crate::{DMat4, Point3, Vector3, Vector4};

/// 4x4 homogeneous transform used for model, view and projection matrices.
///
/// Composition follows column-vector convention: `a.then(&b)` applies `a`
/// first, then `b`, i.e. the product `b * a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub matrix: DMat4,
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_mat4(matrix: DMat4) -> Self {
        Self { matrix }
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    pub fn from_scale(s: Vector3) -> Self {
        Self::from_mat4(DMat4::from_scale(s))
    }

    /// Right-handed rotation about +Y by `degrees`.
    pub fn from_rotation_y_degrees(degrees: f64) -> Self {
        Self::from_mat4(DMat4::from_rotation_y(degrees.to_radians()))
    }

    /// Right-handed view transform looking from `eye` towards `target`.
    pub fn look_at(eye: Point3, target: Point3, up: Vector3) -> Self {
        Self::from_mat4(DMat4::look_at_rh(eye, target, up))
    }

    /// OpenGL-style perspective projection (clip z in `[-1, 1]`).
    pub fn perspective_degrees(fov_y_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self::from_mat4(DMat4::perspective_rh_gl(
            fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        ))
    }

    pub fn to_mat4(&self) -> DMat4 {
        self.matrix
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.matrix.transform_point3(p)
    }

    /// Multiply a homogeneous vector, keeping its `w` as produced.
    pub fn transform_vec4(&self, v: Vector4) -> Vector4 {
        self.matrix * v
    }

    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.matrix * self.matrix)
    }

    pub fn inverse(&self) -> Option<Transform> {
        if self.matrix.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(self.matrix.inverse()))
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform::from_mat4(self.matrix * rhs.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec3, dvec4};

    #[test]
    fn test_translation_then_rotation() {
        let t = Transform::from_translation(dvec3(1.0, 0.0, 0.0))
            .then(&Transform::from_rotation_y_degrees(90.0));
        // +X rotated 90 degrees about +Y lands on -Z
        let p = t.transform_point(Point3::ZERO);
        assert!(p.abs_diff_eq(dvec3(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_scale() {
        let t = Transform::from_scale(dvec3(0.15, 1.5, 0.15));
        let p = t.transform_point(dvec3(1.0, 1.0, -1.0));
        assert!(p.abs_diff_eq(dvec3(0.15, 1.5, -0.15), 1e-12));
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let view = Transform::look_at(dvec3(0.0, 0.0, 3.0), Point3::ZERO, Vector3::Y);
        let eye = view.transform_vec4(dvec4(0.0, 0.0, 3.0, 1.0));
        assert!(eye.abs_diff_eq(dvec4(0.0, 0.0, 0.0, 1.0), 1e-12));
        let target = view.transform_point(Point3::ZERO);
        assert!(target.abs_diff_eq(dvec3(0.0, 0.0, -3.0), 1e-12));
    }

    #[test]
    fn test_inverse_round_trip() {
        let view = Transform::look_at(dvec3(1.0, 2.0, 3.0), Point3::ZERO, Vector3::Y);
        let inv = view.inverse().unwrap();
        let p = dvec3(0.3, -0.7, 2.0);
        assert!(inv.transform_point(view.transform_point(p)).abs_diff_eq(p, 1e-10));
        assert!(Transform::from_scale(Vector3::ZERO).inverse().is_none());
    }

    #[test]
    fn test_perspective_maps_near_plane() {
        let proj = Transform::perspective_degrees(60.0, 1.0, 0.1, 15.0);
        let clip = proj.transform_vec4(dvec4(0.0, 0.0, -0.1, 1.0));
        assert!((clip.z / clip.w + 1.0).abs() < 1e-9);
    }
}
