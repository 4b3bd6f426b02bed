use std::f64::consts::{FRAC_PI_2, PI};

use sor_core::{Result, SorError, Validate};
use sor_math::{wrap_angle, Point3, Transform, Vector3};

/// Radians of orbit per pixel of drag, and radius change per pixel of zoom drag.
pub const DRAG_SENSITIVITY: f64 = 0.01;

/// Closest the eye may get to the target.
pub const MIN_RADIUS: f64 = 0.1;

/// Pointer buttons the camera reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbit drag.
    Primary,
    /// Zoom drag.
    Secondary,
}

/// Camera state handed to the renderer after each change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Point3,
    pub up: Vector3,
    pub view: Transform,
}

/// Perspective parameters; `fov_y_degrees` is the vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub fn transform(&self) -> Transform {
        Transform::perspective_degrees(self.fov_y_degrees, self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 15.0,
        }
    }
}

impl Validate for Projection {
    fn validate(&self) -> Result<()> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(SorError::config(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.fov_y_degrees
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(SorError::config(format!("aspect must be positive, got {}", self.aspect)));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(SorError::config(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DragState {
    primary: bool,
    secondary: bool,
    last_x: f64,
    last_y: f64,
}

/// Camera orbiting a target on a sphere, driven by pointer drags.
///
/// `theta` and `phi` are kept in `[0, 2π)`. Both are offset by `π/2` when
/// converted to a position so that `theta = phi = 0` puts the eye on +Z
/// looking at the target rather than at a pole.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    theta: f64,
    phi: f64,
    radius: f64,
    target: Point3,
    eye: Point3,
    up: Vector3,
    pub projection: Projection,
    drag: DragState,
}

impl OrbitCamera {
    /// Place the camera at `eye`, deriving the orbit angles and radius from it.
    pub fn new(eye: Point3, target: Point3, projection: Projection) -> Result<Self> {
        projection.validate()?;
        let offset = eye - target;
        let radius = offset.length();
        if !(radius.is_finite() && radius >= MIN_RADIUS) {
            return Err(SorError::config(format!(
                "eye must be at least {} from the target, got {}",
                MIN_RADIUS, radius
            )));
        }

        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.z.atan2(offset.x);

        let mut camera = Self {
            theta: wrap_angle(azimuth - FRAC_PI_2),
            phi: wrap_angle(polar - FRAC_PI_2),
            radius,
            target,
            eye,
            up: Vector3::Y,
            projection,
            drag: DragState::default(),
        };
        camera.update();
        Ok(camera)
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Recompute eye and up from the angles and radius.
    fn update(&mut self) {
        let polar = self.phi + FRAC_PI_2;
        let azimuth = self.theta + FRAC_PI_2;
        let ring = self.radius * polar.sin();
        self.eye = self.target
            + Vector3::new(ring * azimuth.cos(), self.radius * polar.cos(), ring * azimuth.sin());

        // Past a pole the true polar angle leaves [0, π]; flip up to keep the view's handedness.
        self.up = if is_inverted(self.phi) {
            Vector3::NEG_Y
        } else {
            Vector3::Y
        };
    }

    pub fn view_transform(&self) -> Transform {
        Transform::look_at(self.eye, self.target, self.up)
    }

    pub fn projection_transform(&self) -> Transform {
        self.projection.transform()
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.eye,
            up: self.up,
            view: self.view_transform(),
        }
    }

    pub fn set_fov(&mut self, degrees: f64) -> Result<()> {
        let projection = Projection {
            fov_y_degrees: degrees,
            ..self.projection
        };
        projection.validate()?;
        self.projection = projection;
        Ok(())
    }

    pub fn set_aspect(&mut self, aspect: f64) -> Result<()> {
        let projection = Projection {
            aspect,
            ..self.projection
        };
        projection.validate()?;
        self.projection = projection;
        Ok(())
    }

    /// Rotate by a pixel delta.
    pub fn orbit_by(&mut self, dx: f64, dy: f64) -> CameraView {
        if self.up.y > 0.0 {
            self.theta -= DRAG_SENSITIVITY * dx;
        } else {
            self.theta += DRAG_SENSITIVITY * dx;
        }
        self.phi -= DRAG_SENSITIVITY * dy;
        self.theta = wrap_angle(self.theta);
        self.phi = wrap_angle(self.phi);
        self.update();
        self.view()
    }

    /// Move towards or away from the target by a horizontal pixel delta.
    pub fn zoom_by(&mut self, dx: f64) -> CameraView {
        self.radius = (self.radius - DRAG_SENSITIVITY * dx).max(MIN_RADIUS);
        self.update();
        self.view()
    }

    pub fn begin_drag(&mut self, button: PointerButton, x: f64, y: f64) {
        let down = match button {
            PointerButton::Primary => &mut self.drag.primary,
            PointerButton::Secondary => &mut self.drag.secondary,
        };
        if !*down {
            *down = true;
            self.drag.last_x = x;
            self.drag.last_y = y;
        }
    }

    pub fn end_drag(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.drag.primary = false,
            PointerButton::Secondary => self.drag.secondary = false,
        }
    }

    /// Pointer left the surface; both buttons count as released.
    pub fn cancel_drag(&mut self) {
        self.drag.primary = false;
        self.drag.secondary = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.primary || self.drag.secondary
    }

    /// Feed an absolute pointer position. Returns the new view when a drag moved the camera.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<CameraView> {
        if !self.is_dragging() {
            return None;
        }
        let dx = x - self.drag.last_x;
        let dy = y - self.drag.last_y;
        self.drag.last_x = x;
        self.drag.last_y = y;

        // Primary takes precedence when both buttons are held.
        Some(if self.drag.primary {
            self.orbit_by(dx, dy)
        } else {
            self.zoom_by(dx)
        })
    }
}

/// True when `phi` has carried the eye over a pole.
pub fn is_inverted(phi: f64) -> bool {
    phi > FRAC_PI_2 && phi < PI + FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Point3::new(0.0, 0.0, 3.0), Point3::ZERO, Projection::default()).unwrap()
    }

    #[test]
    fn test_initial_angles_from_eye() {
        let cam = camera();
        assert_abs_diff_eq!(cam.theta(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.phi(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.radius(), 3.0, epsilon = 1e-12);
        assert!(cam.eye().abs_diff_eq(Point3::new(0.0, 0.0, 3.0), 1e-12));
        assert_eq!(cam.up(), Vector3::Y);
    }

    #[test]
    fn test_off_axis_eye_is_reproduced() {
        let eye = Point3::new(1.0, 2.0, -2.0);
        let target = Point3::new(0.5, 0.0, 0.0);
        let cam = OrbitCamera::new(eye, target, Projection::default()).unwrap();
        assert!(cam.eye().abs_diff_eq(eye, 1e-12));
    }

    #[test]
    fn test_orbit_drag_moves_eye_on_sphere() {
        let mut cam = camera();
        cam.begin_drag(PointerButton::Primary, 100.0, 100.0);
        let view = cam.drag_to(130.0, 90.0).unwrap();
        assert_abs_diff_eq!(cam.theta(), TAU - 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(cam.phi(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!((view.eye - cam.target()).length(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angles_stay_wrapped() {
        let mut cam = camera();
        for k in 0..500 {
            cam.orbit_by(977.0 * (k as f64).sin(), -1234.5);
            assert!((0.0..TAU).contains(&cam.theta()));
            assert!((0.0..TAU).contains(&cam.phi()));
        }
    }

    #[test]
    fn test_up_flips_over_pole() {
        let mut cam = camera();
        // phi -= 0.01 * dy, so dy = -200 pushes phi to 2 rad
        cam.orbit_by(0.0, -200.0);
        assert!(is_inverted(cam.phi()));
        assert_eq!(cam.up(), Vector3::NEG_Y);

        // theta now turns the other way for the same drag
        let before = cam.theta();
        cam.orbit_by(10.0, 0.0);
        assert_abs_diff_eq!(cam.theta(), before + 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = camera();
        cam.begin_drag(PointerButton::Secondary, 0.0, 0.0);
        cam.drag_to(100.0, 0.0);
        assert_abs_diff_eq!(cam.radius(), 2.0, epsilon = 1e-12);
        cam.drag_to(1.0e6, 0.0);
        assert_eq!(cam.radius(), MIN_RADIUS);
        cam.drag_to(-100.0, 0.0);
        assert!(cam.radius() > MIN_RADIUS);
    }

    #[test]
    fn test_no_motion_without_drag() {
        let mut cam = camera();
        assert!(cam.drag_to(50.0, 50.0).is_none());
        cam.begin_drag(PointerButton::Primary, 0.0, 0.0);
        cam.cancel_drag();
        assert!(cam.drag_to(50.0, 50.0).is_none());
        cam.begin_drag(PointerButton::Primary, 0.0, 0.0);
        cam.end_drag(PointerButton::Primary);
        assert!(!cam.is_dragging());
    }

    #[test]
    fn test_fov_validation() {
        let mut cam = camera();
        cam.set_fov(45.0).unwrap();
        assert_eq!(cam.projection.fov_y_degrees, 45.0);
        assert!(matches!(cam.set_fov(180.0), Err(SorError::Config(_))));
        assert_eq!(cam.projection.fov_y_degrees, 45.0);
        assert!(OrbitCamera::new(Point3::ZERO, Point3::ZERO, Projection::default()).is_err());
    }
}
