//! Ring (torus) surface.

use sor_core::{BoundingBox, Result, SorError, Validate};
use sor_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::{ParamAxis, RevolutionSurface};

/// A torus centered on the origin lying in the XZ plane, axis +Y.
///
/// `t` walks around the tube cross-section and `θ` around the axis, both a
/// full turn:
///
/// `S(t, θ) = (cos θ · (r sin t + R), r cos t, -sin θ · (r sin t + R))`
///
/// where `R` is `major_radius` and `r` is `minor_radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSurface {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl RingSurface {
    pub fn new(major_radius: f64, minor_radius: f64) -> Result<Self> {
        let ring = Self {
            major_radius,
            minor_radius,
        };
        ring.validate()?;
        Ok(ring)
    }

    /// Distance from the axis to the tube surface at profile angle `t`.
    #[inline]
    fn sweep_radius(&self, t: f64) -> f64 {
        self.minor_radius * t.sin() + self.major_radius
    }
}

impl Default for RingSurface {
    fn default() -> Self {
        Self {
            major_radius: 0.4,
            minor_radius: 0.04,
        }
    }
}

impl Validate for RingSurface {
    fn validate(&self) -> Result<()> {
        if !(self.minor_radius.is_finite() && self.minor_radius > 0.0) {
            return Err(SorError::config(format!(
                "ring minor radius must be positive, got {}",
                self.minor_radius
            )));
        }
        // The tube must not reach the axis or the normal degenerates at r sin t + R = 0.
        if !(self.major_radius.is_finite() && self.major_radius > self.minor_radius) {
            return Err(SorError::config(format!(
                "ring major radius {} must exceed minor radius {}",
                self.major_radius, self.minor_radius
            )));
        }
        Ok(())
    }
}

impl RevolutionSurface for RingSurface {
    fn point_at(&self, t: f64, theta: f64) -> Point3 {
        let (sin_th, cos_th) = theta.sin_cos();
        let rho = self.sweep_radius(t);
        Point3::new(cos_th * rho, self.minor_radius * t.cos(), -sin_th * rho)
    }

    fn partials(&self, t: f64, theta: f64) -> (Vector3, Vector3) {
        let (sin_th, cos_th) = theta.sin_cos();
        let (sin_t, cos_t) = t.sin_cos();
        let r = self.minor_radius;
        let rho = self.sweep_radius(t);
        let d_t = Vector3::new(cos_th * r * cos_t, -r * sin_t, -sin_th * r * cos_t);
        let d_theta = Vector3::new(-sin_th * rho, 0.0, -cos_th * rho);
        (d_t, d_theta)
    }

    fn normal_at(&self, t: f64, theta: f64) -> Vector3 {
        let (d_t, d_theta) = self.partials(t, theta);
        d_t.cross(d_theta).normalize_or_zero()
    }

    fn t_axis(&self) -> ParamAxis {
        ParamAxis::Periodic
    }
}

impl BoundingBox for RingSurface {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        let outer = self.major_radius + self.minor_radius;
        (
            Point3::new(-outer, -self.minor_radius, -outer),
            Point3::new(outer, self.minor_radius, outer),
        )
    }
}
