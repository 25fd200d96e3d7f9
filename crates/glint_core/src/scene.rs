//! Scene model for the tracer.
//!
//! A scene is an ordered list of spheres, an unordered list of point lights
//! and an environment lookup for rays that leave the scene. It is plain data:
//! nothing in here mutates during a render pass, so a `&Scene` can be shared
//! across worker threads.

use std::fmt;
use std::sync::Arc;

use glint_math::Vec3;
use serde::Deserialize;

use crate::environment::{Environment, SolidColor};
use crate::material::{Color, Material};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sphere {
    pub center: Vec3,
    /// Always positive
    pub radius: f32,
    #[serde(default)]
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be positive; the loader rejects anything else with an
    /// error, code building scenes by hand is expected to respect it.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Light {
    pub position: Vec3,
    /// RGB intensity, components >= 0
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// The complete scene: geometry, lights and environment.
#[derive(Clone)]
pub struct Scene {
    /// Iteration order decides equal-distance hits
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    environment: Arc<dyn Environment>,
}

impl Scene {
    /// Create an empty scene lit only by the given environment.
    pub fn new(environment: impl Environment + 'static) -> Self {
        Self::with_shared_environment(Arc::new(environment))
    }

    /// Create an empty scene around an environment that may be shared with
    /// other scenes.
    pub fn with_shared_environment(environment: Arc<dyn Environment>) -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            environment,
        }
    }

    /// Builder-style `add_sphere`.
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.add_sphere(sphere);
        self
    }

    /// Builder-style `add_light`.
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Append a sphere after all existing ones.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Replace the environment lookup.
    pub fn set_environment(&mut self, environment: impl Environment + 'static) {
        self.environment = Arc::new(environment);
    }

    /// Spheres in iteration order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Background color seen along `direction`.
    #[inline]
    pub fn environment(&self, direction: Vec3) -> Color {
        self.environment.sample(direction)
    }

    /// Check if the scene has no geometry.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SolidColor::new(Color::ZERO))
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("spheres", &self.spheres)
            .field("lights", &self.lights)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_preserves_sphere_order() {
        let scene = Scene::default()
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::default()))
            .with_sphere(Sphere::new(Vec3::new(0.0, 0.0, -9.0), 2.0, Material::default()));

        assert_eq!(scene.spheres().len(), 2);
        assert_eq!(scene.spheres()[0].radius, 1.0);
        assert_eq!(scene.spheres()[1].radius, 2.0);
    }

    #[test]
    fn test_default_scene_is_empty_and_black() {
        let scene = Scene::default();

        assert!(scene.is_empty());
        assert!(scene.lights().is_empty());
        assert_eq!(scene.environment(Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_closure_environment() {
        let scene = Scene::new(|dir: Vec3| dir.abs());
        assert_eq!(scene.environment(Vec3::new(0.0, -1.0, 0.0)), Vec3::Y);
    }

    #[test]
    fn test_set_environment() {
        let mut scene = Scene::default().with_light(Light::new(Vec3::Y, Color::ONE));
        scene.set_environment(SolidColor::new(Color::new(0.2, 0.3, 0.4)));

        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.environment(Vec3::X), Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_debug_lists_geometry() {
        let scene = Scene::default().with_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        let text = format!("{:?}", scene);
        assert!(text.contains("spheres"));
        assert!(text.contains("radius: 1.0"));
    }
}
