//! Direct lighting: Blinn-Phong with hard shadows from point lights.

use glint_core::{Color, Light, Material, Scene};
use glint_math::{Ray, Vec3};

use crate::hittable::intersect;

/// Direct illumination at a surface point.
///
/// Sums the Blinn-Phong contribution of every light that is not blocked.
/// `view` points from the surface towards the viewer and is expected to be
/// unit length. Returns black when nothing contributes.
pub fn shade(
    material: &Material,
    position: Vec3,
    normal: Vec3,
    view: Vec3,
    scene: &Scene,
    epsilon: f32,
) -> Color {
    let mut color = Color::ZERO;

    for light in scene.lights() {
        if is_lit(position, normal, light, scene, epsilon) {
            color += blinn_phong(material, normal, view, light, position);
        }
    }

    color
}

/// True unless some sphere sits between the surface point and the light.
///
/// The shadow ray starts `epsilon` off the surface along the normal. An
/// occluder counts only if it is no farther than the light itself.
pub fn is_lit(position: Vec3, normal: Vec3, light: &Light, scene: &Scene, epsilon: f32) -> bool {
    let to_light = light.position - position;
    let shadow_ray = Ray::offset(position, normal, epsilon, to_light.normalize());

    match intersect(&shadow_ray, scene, epsilon) {
        Some(blocker) => blocker.t > to_light.length(),
        None => true,
    }
}

/// Unshadowed diffuse plus specular contribution of one light.
fn blinn_phong(material: &Material, normal: Vec3, view: Vec3, light: &Light, position: Vec3) -> Color {
    let light_dir = (light.position - position).normalize();
    let half_dir = (light_dir + view).normalize();

    let diffuse = normal.dot(light_dir).max(0.0);
    let specular = normal.dot(half_dir).max(0.0).powf(material.shininess);

    material.diffuse * diffuse * light.intensity + material.specular * specular * light.intensity
}
