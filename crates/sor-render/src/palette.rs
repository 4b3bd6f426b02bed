//! Named material and light-colour presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sor_core::{Result, SorError};
use sor_math::DVec3;

/// Linear RGB triple.
pub type Rgb = DVec3;

/// Ambient, diffuse and specular reflectance (or intensity, for lights).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflectance {
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
}

impl Reflectance {
    pub fn new(ambient: Rgb, diffuse: Rgb, specular: Rgb) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }

    /// Same colour for all three terms.
    pub fn uniform(color: Rgb) -> Self {
        Self::new(color, color, color)
    }

    /// Elementwise product of each term, e.g. light × material.
    pub fn modulate(&self, other: &Reflectance) -> Reflectance {
        Reflectance {
            ambient: self.ambient * other.ambient,
            diffuse: self.diffuse * other.diffuse,
            specular: self.specular * other.specular,
        }
    }
}

/// Lookup tables for the material and light-colour selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    materials: BTreeMap<String, Reflectance>,
    light_colors: BTreeMap<String, Reflectance>,
}

impl Palette {
    pub fn empty() -> Self {
        Self {
            materials: BTreeMap::new(),
            light_colors: BTreeMap::new(),
        }
    }

    pub fn material(&self, key: &str) -> Result<Reflectance> {
        self.materials
            .get(key)
            .copied()
            .ok_or_else(|| SorError::UnknownMaterial(key.to_string()))
    }

    pub fn light_color(&self, key: &str) -> Result<Reflectance> {
        self.light_colors
            .get(key)
            .copied()
            .ok_or_else(|| SorError::UnknownLightColor(key.to_string()))
    }

    pub fn insert_material(&mut self, key: impl Into<String>, material: Reflectance) {
        self.materials.insert(key.into(), material);
    }

    pub fn insert_light_color(&mut self, key: impl Into<String>, color: Reflectance) {
        self.light_colors.insert(key.into(), color);
    }

    pub fn material_keys(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn light_color_keys(&self) -> impl Iterator<Item = &str> {
        self.light_colors.keys().map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Self::empty();
        palette.insert_material("silver", Reflectance::uniform(DVec3::splat(0.753)));
        palette.insert_material("gold", Reflectance::uniform(DVec3::new(1.0, 0.8431, 0.0)));
        palette.insert_material("pthalo", Reflectance::uniform(DVec3::new(0.0706, 0.2078, 0.2078)));
        palette.insert_material("mauve", Reflectance::uniform(DVec3::new(0.8784, 0.6902, 1.0)));

        palette.insert_light_color(
            "white",
            Reflectance::new(DVec3::splat(0.2), DVec3::ONE, DVec3::ONE),
        );
        palette.insert_light_color(
            "skyBlue",
            Reflectance::new(
                DVec3::new(0.1059, 0.16156, 0.1843),
                DVec3::new(0.5294, 0.8078, 0.9215),
                DVec3::new(0.5294, 0.8078, 0.9215),
            ),
        );
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let palette = Palette::default();
        assert_eq!(
            palette.material_keys().collect::<Vec<_>>(),
            vec!["gold", "mauve", "pthalo", "silver"]
        );
        assert_eq!(palette.light_color_keys().count(), 2);
        assert_eq!(palette.material("gold").unwrap().diffuse.z, 0.0);
    }

    #[test]
    fn test_unknown_keys_fail() {
        let palette = Palette::default();
        assert!(matches!(palette.material("bronze"), Err(SorError::UnknownMaterial(k)) if k == "bronze"));
        assert!(matches!(palette.light_color("red"), Err(SorError::UnknownLightColor(_))));
    }

    #[test]
    fn test_modulate() {
        let light = Palette::default().light_color("white").unwrap();
        let silver = Palette::default().material("silver").unwrap();
        let color = light.modulate(&silver);
        assert!((color.ambient.x - 0.2 * 0.753).abs() < 1e-12);
        assert!((color.diffuse.y - 0.753).abs() < 1e-12);
    }
}
