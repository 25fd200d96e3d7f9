//! JSON scene descriptions.
//!
//! A scene file lists spheres (in tie-breaking order), point lights and the
//! environment:
//!
//! ```json
//! {
//!   "spheres": [
//!     { "center": [0, 0, -5], "radius": 1,
//!       "material": { "diffuse": [1, 0, 0], "specular": [0.2, 0.2, 0.2], "shininess": 50 } }
//!   ],
//!   "lights": [ { "position": [0, 5, -5], "intensity": [1, 1, 1] } ],
//!   "environment": { "kind": "gradient", "horizon": [1, 1, 1], "zenith": [0.5, 0.7, 1] }
//! }
//! ```
//!
//! Numeric sanity is checked here, once, so the tracer never has to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::environment::{CubeMap, Environment, SkyGradient, SolidColor};
use crate::material::Color;
use crate::scene::{Light, Scene, Sphere};
use crate::texture::{Texture, TextureError};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Sphere {index}: radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Sphere {index}: shininess must be positive and finite, got {shininess}")]
    InvalidShininess { index: usize, shininess: f32 },

    #[error("Light {index}: intensity must be finite and non-negative, got {intensity}")]
    InvalidIntensity { index: usize, intensity: Color },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Environment section of a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum EnvironmentDescription {
    Solid {
        color: Color,
    },
    Gradient {
        horizon: Color,
        zenith: Color,
    },
    CubeMap {
        /// Face images in `+X -X +Y -Y +Z -Z` order
        faces: [PathBuf; 6],
        #[serde(default)]
        swap_yz: bool,
    },
}

impl Default for EnvironmentDescription {
    fn default() -> Self {
        Self::Solid {
            color: Color::ZERO,
        }
    }
}

impl EnvironmentDescription {
    /// Build the environment, loading cube map faces relative to `base_dir`.
    pub fn build(&self, base_dir: &Path) -> LoadResult<Arc<dyn Environment>> {
        let environment: Arc<dyn Environment> = match self {
            Self::Solid { color } => Arc::new(SolidColor::new(*color)),
            Self::Gradient { horizon, zenith } => Arc::new(SkyGradient::new(*horizon, *zenith)),
            Self::CubeMap { faces, swap_yz } => {
                let [px, nx, py, ny, pz, nz] = faces;
                let load = |face: &PathBuf| Texture::load(resolve_path(base_dir, face));
                let textures = [load(px)?, load(nx)?, load(py)?, load(ny)?, load(pz)?, load(nz)?];
                Arc::new(CubeMap::new(textures).with_swap_yz(*swap_yz))
            }
        };
        Ok(environment)
    }
}

/// A scene as written in a scene file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub environment: EnvironmentDescription,
}

impl SceneDescription {
    /// Check every sphere and light, reporting the first bad one.
    pub fn validate(&self) -> LoadResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(LoadError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let shininess = sphere.material.shininess;
            if !(shininess.is_finite() && shininess > 0.0) {
                return Err(LoadError::InvalidShininess { index, shininess });
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            let intensity = light.intensity;
            if !intensity.is_finite() || intensity.min_element() < 0.0 {
                return Err(LoadError::InvalidIntensity { index, intensity });
            }
        }

        Ok(())
    }

    /// Validate and turn the description into a renderable scene.
    pub fn build(&self, base_dir: &Path) -> LoadResult<Scene> {
        self.validate()?;

        let mut scene = Scene::with_shared_environment(self.environment.build(base_dir)?);
        for sphere in &self.spheres {
            scene.add_sphere(*sphere);
        }
        for light in &self.lights {
            scene.add_light(*light);
        }

        log::info!(
            "Built scene: {} spheres, {} lights",
            scene.spheres().len(),
            scene.lights().len()
        );

        Ok(scene)
    }
}

/// Parse a scene from JSON text.
///
/// Relative paths inside the description resolve against `base_dir`.
pub fn parse_scene(json: &str, base_dir: &Path) -> LoadResult<Scene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    description.build(base_dir)
}

/// Load a scene file.
///
/// Relative paths inside the file resolve against the file's directory.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loading scene from {}", path.display());

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_scene(&json, base_dir)
}

/// Resolve a path relative to the base directory.
fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    const SCENE_JSON: &str = r#"{
        "spheres": [
            { "center": [0, 0, -5], "radius": 1,
              "material": { "diffuse": [1, 0, 0], "specular": [0.5, 0.5, 0.5], "shininess": 20 } },
            { "center": [0, -101, -5], "radius": 100 }
        ],
        "lights": [ { "position": [0, 5, -5], "intensity": [1, 1, 1] } ],
        "environment": { "kind": "solid", "color": [0.1, 0.2, 0.3] }
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene = parse_scene(SCENE_JSON, Path::new("")).unwrap();

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.spheres()[0].center, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(scene.spheres()[0].material.shininess, 20.0);
        assert_eq!(scene.spheres()[1].radius, 100.0);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.environment(Vec3::Z), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_missing_sections_default() {
        let scene = parse_scene("{}", Path::new("")).unwrap();

        assert!(scene.is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.environment(Vec3::X), Color::ZERO);
    }

    #[test]
    fn test_gradient_environment() {
        let json = r#"{ "environment": { "kind": "gradient", "horizon": [0, 0, 0], "zenith": [1, 1, 1] } }"#;
        let scene = parse_scene(json, Path::new("")).unwrap();

        assert!((scene.environment(Vec3::Y) - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_rejects_zero_radius() {
        let json = r#"{ "spheres": [
            { "center": [0, 0, 0], "radius": 1 },
            { "center": [0, 0, 0], "radius": 0 }
        ] }"#;
        let err = parse_scene(json, Path::new("")).unwrap_err();

        assert!(matches!(err, LoadError::InvalidRadius { index: 1, .. }));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": -2 } ] }"#;
        let err = parse_scene(json, Path::new("")).unwrap_err();

        assert!(matches!(err, LoadError::InvalidRadius { index: 0, .. }));
    }

    #[test]
    fn test_rejects_bad_shininess() {
        let json = r#"{ "spheres": [
            { "center": [0, 0, 0], "radius": 1, "material": { "diffuse": [1, 1, 1], "shininess": 0 } }
        ] }"#;
        let err = parse_scene(json, Path::new("")).unwrap_err();

        assert!(matches!(err, LoadError::InvalidShininess { index: 0, .. }));
    }

    #[test]
    fn test_rejects_negative_intensity() {
        let json = r#"{ "lights": [ { "position": [0, 0, 0], "intensity": [1, -1, 1] } ] }"#;
        let err = parse_scene(json, Path::new("")).unwrap_err();

        assert!(matches!(err, LoadError::InvalidIntensity { index: 0, .. }));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{ "spheres": [ { "center": [0, 0, 0], "radius": 1, "colour": [1, 0, 0] } ] }"#;
        assert!(matches!(
            parse_scene(json, Path::new("")),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_missing_cube_map_face() {
        let json = r#"{ "environment": { "kind": "cube_map",
            "faces": ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"] } }"#;
        let err = parse_scene(json, Path::new("no/such/dir")).unwrap_err();

        assert!(matches!(err, LoadError::Texture(_)));
        assert!(err.to_string().contains("px.png"));
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("no/such/scene.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("scenes");

        assert_eq!(resolve_path(base, Path::new("sky/px.png")), PathBuf::from("scenes/sky/px.png"));
        assert_eq!(resolve_path(base, Path::new("/abs/px.png")), PathBuf::from("/abs/px.png"));
    }
}
