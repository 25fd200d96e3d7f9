//! Closest-hit intersection queries.

use glint_core::{Material, Scene, Sphere};
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Ray parameter of the hit, in units of the ray direction's length
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit normal pointing away from the sphere center
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: Material,
}

/// Trait for things that can be hit by rays.
pub trait Hittable {
    /// Nearest hit whose `t` lies strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo>;
}

impl Hittable for Sphere {
    /// Only the smaller root of the quadratic is considered. A ray starting
    /// inside the sphere therefore never sees it, and a tangent ray (zero
    /// discriminant) misses.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if !ray_t.surrounds(t) {
            return None;
        }

        let position = ray.at(t);
        Some(HitInfo {
            t,
            position,
            normal: (position - self.center).normalize(),
            material: self.material,
        })
    }
}

impl Hittable for [Sphere] {
    /// Linear scan keeping the minimum; on equal `t` the earlier sphere wins.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
        let mut closest: Option<HitInfo> = None;

        for sphere in self {
            let range = match closest {
                Some(hit) => ray_t.with_max(hit.t),
                None => ray_t,
            };
            if let Some(hit) = sphere.hit(ray, range) {
                closest = Some(hit);
            }
        }

        closest
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
        self.spheres().hit(ray, ray_t)
    }
}

/// Find the closest sphere hit by `ray` with `t > epsilon`.
///
/// Used alike for camera, reflection and shadow rays; callers offset the
/// origin of secondary rays themselves.
#[inline]
pub fn intersect(ray: &Ray, scene: &Scene, epsilon: f32) -> Option<HitInfo> {
    scene.hit(ray, Interval::above(epsilon))
}
