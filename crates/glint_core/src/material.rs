//! Blinn-Phong surface material.

use glint_math::Vec3;
use serde::Deserialize;

/// Color type alias (linear RGB, typically 0-1 but never clamped here)
pub type Color = Vec3;

/// Surface reflectance parameters for Blinn-Phong shading.
///
/// The specular coefficient doubles as the mirror reflectance used by the
/// tracer's reflection bounces.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Material {
    /// Diffuse coefficient (k_d)
    pub diffuse: Color,
    /// Specular coefficient (k_s)
    #[serde(default)]
    pub specular: Color,
    /// Specular exponent, controls the highlight lobe width
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_shininess() -> f32 {
    32.0
}

impl Material {
    /// Create a new material.
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// A purely diffuse material with no highlight and no reflection.
    pub fn diffuse(diffuse: Color) -> Self {
        Self::new(diffuse, Color::ZERO, default_shininess())
    }

    /// True if reflection bounces off this surface can contribute anything.
    pub fn is_reflective(&self) -> bool {
        self.specular.max_element() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diffuse_material_is_not_reflective() {
        let mtl = Material::diffuse(Color::new(1.0, 0.0, 0.0));
        assert_eq!(mtl.specular, Color::ZERO);
        assert!(!mtl.is_reflective());
    }

    #[test]
    fn test_single_channel_specular_is_reflective() {
        let mtl = Material::new(Color::ZERO, Color::new(0.0, 0.0, 0.2), 10.0);
        assert!(mtl.is_reflective());
    }

    #[test]
    fn test_deserialize_defaults() {
        let mtl: Material = serde_json::from_str(r#"{ "diffuse": [0.1, 0.2, 0.3] }"#).unwrap();

        assert_eq!(mtl.diffuse, Color::new(0.1, 0.2, 0.3));
        assert_eq!(mtl.specular, Color::ZERO);
        assert_eq!(mtl.shininess, 32.0);
    }
}
