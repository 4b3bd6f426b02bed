//! Time-driven interpolators: light relocation, light orbit and ring spin.
//!
//! Each animation is advanced once per frame with the elapsed delta in
//! seconds. Durations are validated on construction so per-frame code never
//! divides by zero.

use std::f64::consts::TAU;

use sor_core::{Result, SorError};
use sor_math::{lerp, Point3};

fn check_duration(name: &str, secs: f64) -> Result<f64> {
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(SorError::config(format!(
            "{} duration must be positive, got {}",
            name, secs
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationState {
    Idle,
    Running,
}

/// Output of one relocation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelocationStep {
    pub position: Point3,
    /// Set on the frame that delivers the final position and returns to idle.
    pub finished: bool,
}

/// One-shot linear move of the light between two points.
#[derive(Debug, Clone)]
pub struct Relocation {
    total: f64,
    elapsed: f64,
    initial: Point3,
    target: Point3,
    state: RelocationState,
}

impl Relocation {
    pub fn new(total_secs: f64) -> Result<Self> {
        Ok(Self {
            total: check_duration("relocation", total_secs)?,
            elapsed: 0.0,
            initial: Point3::ZERO,
            target: Point3::ZERO,
            state: RelocationState::Idle,
        })
    }

    /// Start (or restart) a move; an in-flight move is overwritten.
    pub fn start(&mut self, from: Point3, to: Point3) {
        self.initial = from;
        self.target = to;
        self.elapsed = 0.0;
        self.state = RelocationState::Running;
    }

    pub fn state(&self) -> RelocationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RelocationState::Running
    }

    pub fn target(&self) -> Point3 {
        self.target
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Step the run by `dt` and report the light position.
    ///
    /// The run finishes on the frame where elapsed time reaches the total
    /// (`>=`), so that frame carries exactly the target and flips to idle.
    /// No extra frame is spent at the endpoint.
    pub fn advance(&mut self, dt: f64) -> Option<RelocationStep> {
        if self.state == RelocationState::Idle {
            return None;
        }
        self.elapsed += dt;
        let position = lerp(self.initial, self.target, self.elapsed / self.total);
        let finished = self.elapsed >= self.total;
        if finished {
            self.state = RelocationState::Idle;
        }
        Some(RelocationStep { position, finished })
    }
}

/// Continuous circular motion of the light in the XZ plane.
#[derive(Debug, Clone)]
pub struct Orbit {
    total: f64,
    elapsed: f64,
    radius: f64,
    active: bool,
}

impl Orbit {
    pub fn new(total_secs: f64, radius: f64) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SorError::config(format!(
                "orbit radius must be positive, got {}",
                radius
            )));
        }
        Ok(Self {
            total: check_duration("orbit", total_secs)?,
            elapsed: 0.0,
            radius,
            active: false,
        })
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Point where the orbit begins, `(radius, 0, 0)`.
    pub fn entry_point(&self) -> Point3 {
        Point3::new(self.radius, 0.0, 0.0)
    }

    pub fn angle(&self) -> f64 {
        self.elapsed / self.total * TAU
    }

    pub fn position(&self) -> Point3 {
        let (sin, cos) = self.angle().sin_cos();
        Point3::new(self.radius * cos, 0.0, self.radius * sin)
    }

    /// Advance the loop; `None` while inactive.
    pub fn advance(&mut self, dt: f64) -> Option<Point3> {
        if !self.active {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed > self.total {
            self.elapsed = 0.0;
        }
        Some(self.position())
    }
}

/// Always-running periodic spin shared by every ring instance.
#[derive(Debug, Clone)]
pub struct Spin {
    total: f64,
    elapsed: f64,
}

impl Spin {
    pub fn new(total_secs: f64) -> Result<Self> {
        Ok(Self {
            total: check_duration("spin", total_secs)?,
            elapsed: 0.0,
        })
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        if self.elapsed > self.total {
            self.elapsed = 0.0;
        }
    }

    /// Current spin in degrees, `0..=360`.
    pub fn angle_degrees(&self) -> f64 {
        lerp(0.0, 360.0, self.elapsed / self.total)
    }
}

/// Light position produced by one frame of the light animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightStep {
    pub position: Option<Point3>,
    pub relocation_finished: bool,
}

/// Relocation and orbit sharing the single light position.
///
/// While both are active the relocation drives the light; the orbit clock
/// only starts once the relocation has delivered the light to the orbit's
/// entry point, so the hand-over does not jump.
#[derive(Debug, Clone)]
pub struct LightAnimations {
    pub relocation: Relocation,
    pub orbit: Orbit,
}

impl LightAnimations {
    pub fn new(relocation: Relocation, orbit: Orbit) -> Self {
        Self { relocation, orbit }
    }

    /// Stop any orbit and move the light from `from` to `to`.
    pub fn relocate(&mut self, from: Point3, to: Point3) {
        self.orbit.stop();
        self.relocation.start(from, to);
    }

    /// Start orbiting, relocating from `from` onto the orbit's entry point first.
    pub fn start_orbit(&mut self, from: Point3) {
        let entry = self.orbit.entry_point();
        self.relocation.start(from, entry);
        self.orbit.start();
    }

    pub fn advance(&mut self, dt: f64) -> LightStep {
        let mut step = LightStep::default();
        if let Some(reloc) = self.relocation.advance(dt) {
            step.position = Some(reloc.position);
            step.relocation_finished = reloc.finished;
        }
        if self.orbit.is_active() && !self.relocation.is_running() {
            // Last writer wins: the orbit overrides the relocation output.
            step.position = if step.relocation_finished {
                Some(self.orbit.position())
            } else {
                self.orbit.advance(dt)
            };
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_relocation_halfway_then_done() {
        let mut reloc = Relocation::new(1.0).unwrap();
        reloc.start(Point3::ZERO, Point3::new(1.0, 0.0, 0.0));

        let step = reloc.advance(0.5).unwrap();
        assert_eq!(step.position, Point3::new(0.5, 0.0, 0.0));
        assert!(!step.finished);
        assert_eq!(reloc.state(), RelocationState::Running);

        let step = reloc.advance(0.7).unwrap();
        assert_eq!(step.position, Point3::new(1.0, 0.0, 0.0));
        assert!(step.finished);
        assert_eq!(reloc.state(), RelocationState::Idle);
        assert!(reloc.advance(0.1).is_none());
    }

    #[test]
    fn test_relocation_finishes_when_elapsed_reaches_total() {
        let mut reloc = Relocation::new(1.0).unwrap();
        reloc.start(Point3::ZERO, Point3::new(0.0, 0.0, 4.0));
        assert!(!reloc.advance(0.5).unwrap().finished);

        let step = reloc.advance(0.5).unwrap();
        assert_eq!(reloc.elapsed(), 1.0);
        assert!(step.finished);
        assert_eq!(step.position, Point3::new(0.0, 0.0, 4.0));
        assert_eq!(reloc.state(), RelocationState::Idle);
    }

    #[test]
    fn test_relocation_single_large_frame_does_not_overshoot() {
        let mut reloc = Relocation::new(1.0).unwrap();
        reloc.start(Point3::new(-2.0, 1.0, 0.0), Point3::new(3.0, 0.0, 0.0));
        let step = reloc.advance(10.0).unwrap();
        assert_eq!(step.position, Point3::new(3.0, 0.0, 0.0));
        assert!(step.finished);
    }

    #[test]
    fn test_orbit_loops() {
        let mut orbit = Orbit::new(2.0, 2.0).unwrap();
        assert!(orbit.advance(0.1).is_none());
        orbit.start();
        let p = orbit.advance(0.5).unwrap();
        assert_abs_diff_eq!(orbit.angle(), PI / 2.0, epsilon = 1e-12);
        assert!(p.abs_diff_eq(Point3::new(0.0, 0.0, 2.0), 1e-12));
        orbit.advance(1.6);
        // 2.1 s exceeds the 2 s period and wraps back to the start
        assert_eq!(orbit.angle(), 0.0);
    }

    #[test]
    fn test_spin_wraps() {
        let mut spin = Spin::new(2.0).unwrap();
        spin.advance(0.5);
        assert_abs_diff_eq!(spin.angle_degrees(), 90.0, epsilon = 1e-12);
        spin.advance(1.6);
        assert_eq!(spin.angle_degrees(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_durations() {
        assert!(matches!(Relocation::new(0.0), Err(SorError::Config(_))));
        assert!(Orbit::new(-1.0, 2.0).is_err());
        assert!(Orbit::new(2.0, 0.0).is_err());
        assert!(Spin::new(f64::NAN).is_err());
    }

    #[test]
    fn test_orbit_waits_for_relocation() {
        let mut lights = LightAnimations::new(Relocation::new(1.0).unwrap(), Orbit::new(2.0, 2.0).unwrap());
        lights.start_orbit(Point3::ZERO);

        let step = lights.advance(0.5);
        assert_eq!(step.position, Some(Point3::new(1.0, 0.0, 0.0)));

        let step = lights.advance(0.6);
        assert!(step.relocation_finished);
        assert_eq!(step.position, Some(Point3::new(2.0, 0.0, 0.0)));

        let step = lights.advance(0.5);
        assert!(step.position.unwrap().abs_diff_eq(Point3::new(0.0, 0.0, 2.0), 1e-12));
    }

    #[test]
    fn test_orbit_start_redirects_running_relocation() {
        let mut lights = LightAnimations::new(Relocation::new(1.0).unwrap(), Orbit::new(2.0, 2.0).unwrap());
        lights.relocate(Point3::ZERO, Point3::new(0.0, 5.0, 0.0));
        lights.advance(0.3);
        lights.start_orbit(Point3::new(0.0, 1.5, 0.0));
        assert_eq!(lights.relocation.target(), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(lights.relocation.elapsed(), 0.0);
        assert!(lights.orbit.is_active());
    }
}
