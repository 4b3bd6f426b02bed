//! Per-frame driver: clock, animation step and draw list.

use sor_core::Result;
use sor_math::{Point3, Transform, Vector3, Vector4};
use sor_mesh::{IndexRange, ObjectKind};

use crate::camera::{CameraView, PointerButton};
use crate::config::ViewerConfig;
use crate::light::LightFrame;
use crate::palette::Reflectance;
use crate::rings::RingInstance;
use crate::scene::{Command, SceneState};

/// Converts the host's millisecond timestamps into frame deltas in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_secs: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous tick; the first tick yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let now = now_ms * 0.001;
        let delta = match self.last_secs {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_secs = Some(now);
        delta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// "Draw this range with this transform and material."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub object: ObjectKind,
    pub primitive: Primitive,
    pub range: IndexRange,
    pub model_view: Transform,
    pub color: Reflectance,
    pub shininess: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectShading {
    pub object: ObjectKind,
    pub color: Reflectance,
    pub shininess: f64,
    pub visible: bool,
}

/// A ring instance with its model transform for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPlacement {
    pub instance: RingInstance,
    pub model: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub delta: f64,
    pub eye: Point3,
    pub up: Vector3,
    pub view: Transform,
    pub projection: Transform,
    /// Homogeneous light position in eye space, whatever frame the light is held in.
    pub light_position: Vector4,
    pub light_frame: LightFrame,
    pub shading: [ObjectShading; 2],
    pub rings: Vec<RingPlacement>,
    pub draws: Vec<DrawCommand>,
    pub relocation_finished: bool,
    pub controls_locked: bool,
}

impl FrameOutput {
    pub fn shading(&self, object: ObjectKind) -> &ObjectShading {
        match object {
            ObjectKind::Cylinder => &self.shading[0],
            ObjectKind::Ring => &self.shading[1],
        }
    }

    pub fn draws_of(&self, object: ObjectKind, primitive: Primitive) -> impl Iterator<Item = &DrawCommand> {
        self.draws
            .iter()
            .filter(move |d| d.object == object && d.primitive == primitive)
    }
}

/// Owns the scene and turns each animation-frame callback into a [`FrameOutput`].
#[derive(Debug, Clone)]
pub struct FrameDriver {
    clock: FrameClock,
    scene: SceneState,
}

impl FrameDriver {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        Ok(Self {
            clock: FrameClock::new(),
            scene: SceneState::new(config)?,
        })
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        self.scene.apply(command)
    }

    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        self.scene.pointer_down(button, x, y);
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        self.scene.pointer_up(button);
    }

    pub fn pointer_leave(&mut self) {
        self.scene.pointer_leave();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<CameraView> {
        self.scene.pointer_move(x, y)
    }

    /// Frame callback with the host timestamp in milliseconds.
    pub fn tick(&mut self, now_ms: f64) -> FrameOutput {
        let delta = self.clock.tick(now_ms);
        self.advance(delta)
    }

    /// Advance by an explicit delta in seconds and describe the frame.
    pub fn advance(&mut self, delta: f64) -> FrameOutput {
        let relocation_finished = self.scene.advance(delta);
        self.describe(delta.max(0.0), relocation_finished)
    }

    fn describe(&self, delta: f64, relocation_finished: bool) -> FrameOutput {
        let scene = &self.scene;
        let camera = scene.camera();
        let view = camera.view_transform();
        let light = scene.light();

        let shading = ObjectKind::ALL.map(|object| {
            let state = scene.object(object);
            ObjectShading {
                object,
                color: state.color,
                shininess: state.shininess,
                visible: state.visible,
            }
        });

        let spin = scene.spin_degrees();
        let rings: Vec<RingPlacement> = scene
            .rings()
            .iter()
            .map(|instance| RingPlacement {
                instance: *instance,
                model: instance.model(spin),
            })
            .collect();

        let mut draws = Vec::new();
        let mut emit = |object: ObjectKind, model: Transform| {
            let state = scene.object(object);
            let entry = scene.registry().entry(object);
            let model_view = model.then(&view);
            draws.push(DrawCommand {
                object,
                primitive: Primitive::Triangles,
                range: entry.body,
                model_view,
                color: state.color,
                shininess: state.shininess,
            });
            if scene.show_normals() {
                draws.push(DrawCommand {
                    object,
                    primitive: Primitive::Lines,
                    range: entry.normal_lines,
                    model_view,
                    color: state.color,
                    shininess: state.shininess,
                });
            }
        };

        if scene.object(ObjectKind::Cylinder).visible {
            emit(ObjectKind::Cylinder, Transform::from_scale(scene.cylinder_scale()));
        }
        if scene.object(ObjectKind::Ring).visible {
            for placement in &rings {
                emit(ObjectKind::Ring, placement.model);
            }
        }

        FrameOutput {
            delta,
            eye: camera.eye(),
            up: camera.up(),
            view,
            projection: camera.projection_transform(),
            light_position: light.eye_space(&view),
            light_frame: light.frame(),
            shading,
            rings,
            draws,
            relocation_finished,
            controls_locked: scene.controls_locked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_clock_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1000.0), 0.0);
        assert_abs_diff_eq!(clock.tick(1016.0), 0.016, epsilon = 1e-12);
        assert_abs_diff_eq!(clock.tick(1516.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_clock_drives_animations() {
        let mut driver = FrameDriver::new(&ViewerConfig::default()).unwrap();
        driver.tick(0.0);
        let frame = driver.tick(500.0);
        assert_abs_diff_eq!(frame.delta, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(driver.scene().spin_degrees(), 90.0, epsilon = 1e-9);
    }
}
