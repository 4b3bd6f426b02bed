//! Mutable scene state and the command messages that drive it.
//!
//! `SceneState` owns everything that changes after startup: camera, light,
//! per-object material, animations and ring placements. The geometry
//! registry it holds is frozen. UI layers talk to it through [`Command`]
//! values and the pointer handlers; the frame driver reads it once per frame.

use sor_core::{Result, SorError, Validate};
use sor_math::{Aabb3, Point3, Vector3};
use sor_mesh::{GeometryRegistry, ObjectKind};

use crate::animation::{LightAnimations, Orbit, Relocation, Spin};
use crate::camera::{CameraView, OrbitCamera, PointerButton};
use crate::config::{SurfaceLook, ViewerConfig};
use crate::light::{LightFrame, LightPosition};
use crate::palette::{Palette, Reflectance};
use crate::rings::{layout_rings, RingInstance};

/// Discrete UI events applied to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetMaterial { object: ObjectKind, key: String },
    SetShininess { object: ObjectKind, shininess: f64 },
    SetLightColor { key: String },
    /// Toggle the light between following the viewer and a fixed world position.
    /// `target` is used when switching back to the world frame.
    TriggerRelocation { target: Point3 },
    ToggleOrbit,
    SetFieldOfView { degrees: f64 },
    SetAspect { aspect: f64 },
    SetRingCount { count: usize },
    ToggleNormalLines,
    SetVisibility { object: ObjectKind, visible: bool },
}

/// Material, shininess and the colour derived from material and light.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    pub material_key: String,
    pub material: Reflectance,
    pub shininess: f64,
    /// Light × material, refreshed whenever either side changes.
    pub color: Reflectance,
    pub visible: bool,
}

impl ObjectState {
    fn from_look(look: &SurfaceLook, palette: &Palette, light: &Reflectance) -> Result<Self> {
        let material = palette.material(&look.material)?;
        Ok(Self {
            material_key: look.material.clone(),
            material,
            shininess: look.shininess,
            color: light.modulate(&material),
            visible: look.visible,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SceneState {
    registry: GeometryRegistry,
    camera: OrbitCamera,
    palette: Palette,
    light: LightPosition,
    light_color_key: String,
    light_color: Reflectance,
    cylinder: ObjectState,
    ring: ObjectState,
    animations: LightAnimations,
    spin: Spin,
    cylinder_scale: Vector3,
    rings: Vec<RingInstance>,
    show_normals: bool,
    target_bounds: Aabb3,
    controls_locked: bool,
}

impl SceneState {
    /// Validate `config`, build the shared geometry and set up the initial state.
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let registry = GeometryRegistry::build(&config.geometry_spec())?;
        let camera = OrbitCamera::new(config.camera.eye, config.camera.target, config.camera.projection())?;

        let palette = config.palette();
        let light_color = palette.light_color(&config.light.color)?;
        let cylinder = ObjectState::from_look(&config.cylinder.look, &palette, &light_color)?;
        let ring = ObjectState::from_look(&config.ring.look, &palette, &light_color)?;

        let anim = &config.animation;
        let animations = LightAnimations::new(
            Relocation::new(anim.relocation_secs)?,
            Orbit::new(anim.orbit_secs, anim.orbit_radius)?,
        );
        let spin = Spin::new(anim.spin_secs)?;
        let rings = layout_rings(config.ring.count, registry.ring_surface(), config.cylinder.scale)?;

        log::info!(
            "scene ready: light {:?} in {:?} frame, {} ring(s)",
            config.light.position,
            config.light.frame,
            rings.len()
        );

        Ok(Self {
            registry,
            camera,
            palette,
            light: LightPosition::new(config.light.frame, config.light.position),
            light_color_key: config.light.color.clone(),
            light_color,
            cylinder,
            ring,
            animations,
            spin,
            cylinder_scale: config.cylinder.scale,
            rings,
            show_normals: config.show_normals,
            target_bounds: config.light.target_bounds,
            controls_locked: false,
        })
    }

    pub fn registry(&self) -> &GeometryRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn light(&self) -> LightPosition {
        self.light
    }

    pub fn light_color(&self) -> (&str, &Reflectance) {
        (&self.light_color_key, &self.light_color)
    }

    pub fn object(&self, kind: ObjectKind) -> &ObjectState {
        match kind {
            ObjectKind::Cylinder => &self.cylinder,
            ObjectKind::Ring => &self.ring,
        }
    }

    fn object_mut(&mut self, kind: ObjectKind) -> &mut ObjectState {
        match kind {
            ObjectKind::Cylinder => &mut self.cylinder,
            ObjectKind::Ring => &mut self.ring,
        }
    }

    pub fn animations(&self) -> &LightAnimations {
        &self.animations
    }

    pub fn spin_degrees(&self) -> f64 {
        self.spin.angle_degrees()
    }

    pub fn cylinder_scale(&self) -> Vector3 {
        self.cylinder_scale
    }

    pub fn rings(&self) -> &[RingInstance] {
        &self.rings
    }

    pub fn show_normals(&self) -> bool {
        self.show_normals
    }

    /// True while a relocation runs; relocate and orbit controls should be disabled.
    pub fn controls_locked(&self) -> bool {
        self.controls_locked
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        log::debug!("apply {:?}", command);
        match command {
            Command::SetMaterial { object, key } => {
                let material = self.palette.material(&key)?;
                let light = self.light_color;
                let state = self.object_mut(object);
                state.material_key = key;
                state.material = material;
                state.color = light.modulate(&material);
            }
            Command::SetShininess { object, shininess } => {
                if !(shininess.is_finite() && shininess > 0.0) {
                    return Err(SorError::config(format!(
                        "shininess must be positive, got {}",
                        shininess
                    )));
                }
                self.object_mut(object).shininess = shininess;
            }
            Command::SetLightColor { key } => {
                self.light_color = self.palette.light_color(&key)?;
                self.light_color_key = key;
                self.recolor();
            }
            Command::TriggerRelocation { target } => self.trigger_relocation(target)?,
            Command::ToggleOrbit => self.toggle_orbit()?,
            Command::SetFieldOfView { degrees } => self.camera.set_fov(degrees)?,
            Command::SetAspect { aspect } => self.camera.set_aspect(aspect)?,
            Command::SetRingCount { count } => {
                self.rings = layout_rings(count, self.registry.ring_surface(), self.cylinder_scale)?;
            }
            Command::ToggleNormalLines => self.show_normals = !self.show_normals,
            Command::SetVisibility { object, visible } => self.object_mut(object).visible = visible,
        }
        Ok(())
    }

    fn recolor(&mut self) {
        let light = self.light_color;
        for state in [&mut self.cylinder, &mut self.ring] {
            state.color = light.modulate(&state.material);
        }
    }

    fn trigger_relocation(&mut self, target: Point3) -> Result<()> {
        let view = self.camera.view_transform();
        let (start, end) = match self.light {
            LightPosition::World(_) => {
                self.light = self.light.into_eye(&view);
                (self.light.coords(), Point3::ZERO)
            }
            LightPosition::Eye(_) => {
                self.light = self.light.into_world(&view)?;
                let clamped = self.target_bounds.clamp_point(target);
                if clamped != target {
                    log::warn!("light target {:?} clamped to {:?}", target, clamped);
                }
                (self.light.coords(), clamped)
            }
        };
        log::debug!("light now in {:?} frame, relocating {:?} -> {:?}", self.light.frame(), start, end);
        self.animations.relocate(start, end);
        self.controls_locked = true;
        Ok(())
    }

    fn toggle_orbit(&mut self) -> Result<()> {
        if self.animations.orbit.is_active() {
            self.animations.orbit.stop();
            log::debug!("orbit stopped");
            return Ok(());
        }
        if self.light.frame() == LightFrame::Eye {
            let view = self.camera.view_transform();
            self.light = self.light.into_world(&view)?;
        }
        self.animations.start_orbit(self.light.coords());
        self.controls_locked = true;
        log::debug!("orbit started from {:?}", self.light.coords());
        Ok(())
    }

    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        self.camera.begin_drag(button, x, y);
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        self.camera.end_drag(button);
    }

    pub fn pointer_leave(&mut self) {
        self.camera.cancel_drag();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<CameraView> {
        self.camera.drag_to(x, y)
    }

    /// Advance every animation by `dt` seconds. Returns true on the frame a
    /// relocation completes.
    pub fn advance(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring invalid frame delta {}", dt);
            0.0
        };

        let step = self.animations.advance(dt);
        if let Some(position) = step.position {
            self.light = self.light.with_coords(position);
        }
        if step.relocation_finished {
            self.controls_locked = false;
            log::debug!("relocation finished at {:?}", self.light.coords());
        }
        self.spin.advance(dt);
        step.relocation_finished
    }
}
