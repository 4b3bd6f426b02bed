//! Viewer configuration, loadable from JSON.
//!
//! Every section falls back to the stock viewer when omitted, so an empty
//! object `{}` is a complete configuration. Loaded configurations are
//! validated before they are returned.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sor_core::{Result, SorError, Validate};
use sor_geometry::{GridResolution, RingSurface};
use sor_math::{Aabb3, Point3, Vector3};
use sor_mesh::GeometrySpec;

use crate::camera::Projection;
use crate::light::LightFrame;
use crate::palette::{Palette, Reflectance};
use crate::rings::MAX_RINGS;

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SorError::config(format!("{} must be positive, got {}", what, value)))
    }
}

/// Material selection and visibility shared by both objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLook {
    pub material: String,
    pub shininess: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConfig {
    pub resolution: GridResolution,
    /// Non-uniform scale applied at draw time; the mesh itself is the unit cylinder.
    pub scale: Vector3,
    pub normal_length: f64,
    pub look: SurfaceLook,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            resolution: GridResolution::new(25, 25),
            scale: Vector3::new(0.15, 1.5, 0.15),
            normal_length: 0.1,
            look: SurfaceLook {
                material: "silver".into(),
                shininess: 30.0,
                visible: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub surface: RingSurface,
    pub resolution: GridResolution,
    pub normal_length: f64,
    /// Number of ring instances stacked along the cylinder.
    pub count: usize,
    pub look: SurfaceLook,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            surface: RingSurface::default(),
            resolution: GridResolution::new(25, 35),
            normal_length: 0.02,
            count: 1,
            look: SurfaceLook {
                material: "gold".into(),
                shininess: 30.0,
                visible: true,
            },
        }
    }
}

/// Durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub relocation_secs: f64,
    pub orbit_secs: f64,
    pub orbit_radius: f64,
    pub spin_secs: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            relocation_secs: 1.0,
            orbit_secs: 2.0,
            orbit_radius: 2.0,
            spin_secs: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Point3,
    pub target: Point3,
    pub fov_y_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraConfig {
    pub fn projection(&self) -> Projection {
        Projection {
            fov_y_degrees: self.fov_y_degrees,
            aspect: self.aspect,
            near: self.near,
            far: self.far,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let projection = Projection::default();
        Self {
            eye: Point3::new(0.0, 0.0, 3.0),
            target: Point3::ZERO,
            fov_y_degrees: projection.fov_y_degrees,
            aspect: projection.aspect,
            near: projection.near,
            far: projection.far,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: Point3,
    pub frame: LightFrame,
    pub color: String,
    /// World-space box relocation targets are clamped into.
    pub target_bounds: Aabb3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(1.0, 1.0, 1.0),
            frame: LightFrame::World,
            color: "white".into(),
            target_bounds: Aabb3::symmetric(Vector3::splat(5.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub cylinder: CylinderConfig,
    pub ring: RingConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    /// Extra materials, merged over the built-in presets.
    pub materials: BTreeMap<String, Reflectance>,
    /// Extra light colours, merged over the built-in presets.
    pub light_colors: BTreeMap<String, Reflectance>,
    pub show_normals: bool,
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded viewer configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn geometry_spec(&self) -> GeometrySpec {
        GeometrySpec {
            cylinder_resolution: self.cylinder.resolution,
            cylinder_normal_length: self.cylinder.normal_length,
            ring: self.ring.surface,
            ring_resolution: self.ring.resolution,
            ring_normal_length: self.ring.normal_length,
        }
    }

    /// Built-in presets with the configured extras layered on top.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        for (key, material) in &self.materials {
            palette.insert_material(key.clone(), *material);
        }
        for (key, color) in &self.light_colors {
            palette.insert_light_color(key.clone(), *color);
        }
        palette
    }
}

impl Validate for ViewerConfig {
    fn validate(&self) -> Result<()> {
        self.geometry_spec().validate()?;

        let scale = self.cylinder.scale;
        for (axis, value) in [("x", scale.x), ("y", scale.y), ("z", scale.z)] {
            check_positive(&format!("cylinder scale {}", axis), value)?;
        }
        if self.ring.count == 0 || self.ring.count > MAX_RINGS {
            return Err(SorError::config(format!(
                "ring count must be within 1..={}, got {}",
                MAX_RINGS, self.ring.count
            )));
        }

        let anim = &self.animation;
        check_positive("relocation duration", anim.relocation_secs)?;
        check_positive("orbit duration", anim.orbit_secs)?;
        check_positive("orbit radius", anim.orbit_radius)?;
        check_positive("spin duration", anim.spin_secs)?;

        self.camera.projection().validate()?;

        let bounds = &self.light.target_bounds;
        if !(bounds.min.cmple(bounds.max).all() && bounds.min.is_finite() && bounds.max.is_finite()) {
            return Err(SorError::config(format!(
                "light target box is inverted: {:?} .. {:?}",
                bounds.min, bounds.max
            )));
        }
        if !self.light.position.is_finite() {
            return Err(SorError::config("light position must be finite"));
        }

        let palette = self.palette();
        palette.light_color(&self.light.color)?;
        for look in [&self.cylinder.look, &self.ring.look] {
            palette.material(&look.material)?;
            check_positive("shininess", look.shininess)?;
        }
        Ok(())
    }
}
