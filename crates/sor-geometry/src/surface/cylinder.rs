//! Unit cylinder.

use sor_core::BoundingBox;
use sor_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{ParamAxis, RevolutionSurface};

/// Unit-radius cylinder of height 2 centered on the origin, axis +Y.
///
/// `S(t, θ) = (cos θ, t, -sin θ)` with `t` running from `+1` (top) down to
/// `-1` (bottom). Any scaling is applied by the model transform at draw time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CylinderSurface;

impl CylinderSurface {
    pub const TOP: f64 = 1.0;
    pub const BOTTOM: f64 = -1.0;

    pub fn new() -> Self {
        Self
    }

    /// Center of the top cap.
    pub fn top_pole(&self) -> Point3 {
        Point3::new(0.0, Self::TOP, 0.0)
    }

    /// Center of the bottom cap.
    pub fn bottom_pole(&self) -> Point3 {
        Point3::new(0.0, Self::BOTTOM, 0.0)
    }
}

impl RevolutionSurface for CylinderSurface {
    fn point_at(&self, t: f64, theta: f64) -> Point3 {
        let (sin, cos) = theta.sin_cos();
        Point3::new(cos, t, -sin)
    }

    fn partials(&self, _t: f64, theta: f64) -> (Vector3, Vector3) {
        let (sin, cos) = theta.sin_cos();
        (Vector3::Y, Vector3::new(-sin, 0.0, -cos))
    }

    fn normal_at(&self, t: f64, theta: f64) -> Vector3 {
        let (d_t, d_theta) = self.partials(t, theta);
        d_theta.cross(d_t).normalize_or_zero()
    }

    fn t_axis(&self) -> ParamAxis {
        ParamAxis::Span {
            start: Self::TOP,
            end: Self::BOTTOM,
        }
    }
}

impl BoundingBox for CylinderSurface {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        (Point3::splat(-1.0), Point3::splat(1.0))
    }
}
