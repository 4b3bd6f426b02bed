//! Light position tagged with the coordinate frame it is expressed in.

use serde::{Deserialize, Serialize};
use sor_core::{Result, SorError};
use sor_math::{point4, Point3, Transform, Vector4};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightFrame {
    /// Fixed in the world; moves on screen with the camera.
    World,
    /// Fixed relative to the viewer.
    Eye,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightPosition {
    World(Point3),
    Eye(Point3),
}

impl LightPosition {
    pub fn new(frame: LightFrame, coords: Point3) -> Self {
        match frame {
            LightFrame::World => LightPosition::World(coords),
            LightFrame::Eye => LightPosition::Eye(coords),
        }
    }

    pub fn frame(&self) -> LightFrame {
        match self {
            LightPosition::World(_) => LightFrame::World,
            LightPosition::Eye(_) => LightFrame::Eye,
        }
    }

    pub fn coords(&self) -> Point3 {
        match *self {
            LightPosition::World(p) | LightPosition::Eye(p) => p,
        }
    }

    /// Same frame, new coordinates.
    pub fn with_coords(&self, coords: Point3) -> Self {
        Self::new(self.frame(), coords)
    }

    /// Homogeneous eye-space position for the shading uniform.
    pub fn eye_space(&self, view: &Transform) -> Vector4 {
        match *self {
            LightPosition::World(p) => view.transform_vec4(point4(p)),
            LightPosition::Eye(p) => point4(p),
        }
    }

    /// Re-express in eye coordinates without moving the light visually.
    pub fn into_eye(self, view: &Transform) -> LightPosition {
        match self {
            LightPosition::World(p) => LightPosition::Eye(view.transform_point(p)),
            eye @ LightPosition::Eye(_) => eye,
        }
    }

    /// Re-express in world coordinates through the inverse view transform.
    pub fn into_world(self, view: &Transform) -> Result<LightPosition> {
        match self {
            world @ LightPosition::World(_) => Ok(world),
            LightPosition::Eye(p) => {
                let inverse = view.inverse().ok_or_else(|| {
                    SorError::InvalidOperation("view transform is not invertible".into())
                })?;
                Ok(LightPosition::World(inverse.transform_point(p)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sor_math::{DVec3, DVec4};

    fn dvec3(x: f64, y: f64, z: f64) -> DVec3 {
        DVec3::new(x, y, z)
    }

    fn dvec4(x: f64, y: f64, z: f64, w: f64) -> DVec4 {
        DVec4::new(x, y, z, w)
    }
    use sor_math::Vector3;

    fn view() -> Transform {
        Transform::look_at(dvec3(0.0, 0.0, 3.0), Point3::ZERO, Vector3::Y)
    }

    #[test]
    fn test_eye_space_uniform() {
        let world = LightPosition::World(dvec3(1.0, 0.0, 0.0));
        assert!(world.eye_space(&view()).abs_diff_eq(dvec4(1.0, 0.0, -3.0, 1.0), 1e-12));
        let eye = LightPosition::Eye(dvec3(0.0, 1.0, 0.0));
        assert_eq!(eye.eye_space(&view()), dvec4(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_frame_round_trip_keeps_visual_position() {
        let start = LightPosition::World(dvec3(0.5, -1.0, 2.0));
        let eye = start.into_eye(&view());
        assert_eq!(eye.frame(), LightFrame::Eye);
        assert!(eye.eye_space(&view()).abs_diff_eq(start.eye_space(&view()), 1e-12));

        let back = eye.into_world(&view()).unwrap();
        assert_eq!(back.frame(), LightFrame::World);
        assert!(back.coords().abs_diff_eq(start.coords(), 1e-12));
    }

    #[test]
    fn test_singular_view_is_rejected() {
        let singular = Transform::from_scale(Vector3::ZERO);
        let eye = LightPosition::Eye(Point3::ONE);
        assert!(matches!(eye.into_world(&singular), Err(SorError::InvalidOperation(_))));
    }
}
