//! Placement of the repeated ring instances along the cylinder axis.

use sor_core::{Result, SorError};
use sor_geometry::RingSurface;
use sor_math::{lerp, Point3, Transform, Vector3};

/// Largest ring-instance count accepted by the layout.
pub const MAX_RINGS: usize = 10;

/// One copy of the ring surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingInstance {
    /// Offset from the cylinder axis, before the instance rotation.
    pub center: Point3,
    /// Fixed rotation about Y, in degrees.
    pub phase_degrees: f64,
}

impl RingInstance {
    /// `rotate_y(spin + phase) * translate(center)`.
    pub fn model(&self, spin_degrees: f64) -> Transform {
        Transform::from_translation(self.center)
            .then(&Transform::from_rotation_y_degrees(spin_degrees + self.phase_degrees))
    }
}

/// Lay out `count` rings evenly over the height of a cylinder scaled by `cylinder_scale`.
///
/// Each ring sits in the middle of its own horizontal band and is pushed out so its
/// inner edge meets the cylinder wall. Phases spread over `0..=180` degrees; a lone
/// ring takes the midpoint.
pub fn layout_rings(count: usize, ring: &RingSurface, cylinder_scale: Vector3) -> Result<Vec<RingInstance>> {
    if count == 0 || count > MAX_RINGS {
        return Err(SorError::config(format!(
            "ring count must be within 1..={}, got {}",
            MAX_RINGS, count
        )));
    }

    let radial = ring.major_radius - ring.minor_radius - cylinder_scale.x;
    let n = count as f64;
    let rings = (1..=count)
        .map(|i| {
            let i = i as f64;
            let y = lerp(-cylinder_scale.y, cylinder_scale.y, (i - 0.5) / n);
            let phase_degrees = if count == 1 {
                90.0
            } else {
                lerp(0.0, 180.0, (i - 1.0) / (n - 1.0))
            };
            RingInstance {
                center: Point3::new(radial, y, 0.0),
                phase_degrees,
            }
        })
        .collect();
    Ok(rings)
}
