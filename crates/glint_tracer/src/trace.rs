//! Whitted-style trace driver.
//!
//! Traces one camera ray: direct lighting at the first surface, then a chain
//! of mirror bounces, each weighted by the product of the specular
//! coefficients seen so far. The chain runs as a loop over explicit state so
//! the bounce ceiling bounds the work structurally.

use glint_core::{Color, Scene};
use glint_math::{reflect, Ray, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::hittable::{intersect, HitInfo};
use crate::shade::shade;

/// Hard ceiling on reflection bounces, whatever the caller asks for.
pub const MAX_BOUNCES: u32 = 8;

/// Default self-intersection epsilon: minimum accepted hit distance and the
/// offset applied to shadow and reflection ray origins.
pub const DEFAULT_EPSILON: f32 = 1e-3;

/// Rejected camera or trace settings.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SettingsError {
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f32),

    #[error("image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("image size {width}x{height} has too many pixels")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("camera has no view direction: look_from and look_at must differ and vup must not be parallel to the view")]
    DegenerateView,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Per-render tracing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceSettings {
    /// Requested reflection bounces (0 = direct lighting only).
    /// Never more than `MAX_BOUNCES` are traced.
    pub bounce_limit: u32,
    pub epsilon: f32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            bounce_limit: 4,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl TraceSettings {
    /// Create settings with the default epsilon.
    pub fn with_bounce_limit(bounce_limit: u32) -> Self {
        Self {
            bounce_limit,
            ..Default::default()
        }
    }

    /// Number of bounces that will actually be traced.
    pub fn effective_bounces(&self) -> u32 {
        self.bounce_limit.min(MAX_BOUNCES)
    }

    /// Check that hits are only accepted in front of the ray origin.
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SettingsError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Color seen along a camera ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    pub color: Color,
    /// True if the camera ray itself hit a sphere
    pub hit: bool,
}

impl TraceResult {
    /// A ray that left the scene without touching anything.
    pub fn background(color: Color) -> Self {
        Self { color, hit: false }
    }

    /// A ray that landed on a surface, whatever happened after.
    pub fn surface(color: Color) -> Self {
        Self { color, hit: true }
    }

    /// Pixel coverage: 1 for surface pixels, 0 for background.
    pub fn alpha(&self) -> f32 {
        if self.hit {
            1.0
        } else {
            0.0
        }
    }
}

/// State carried from one bounce to the next.
#[derive(Debug, Clone, Copy)]
struct Bounce {
    /// Ray that produced `hit`
    ray: Ray,
    hit: HitInfo,
    /// Running product of specular coefficients along the path
    attenuation: Color,
    index: u32,
}

impl Bounce {
    fn can_continue(&self, settings: &TraceSettings) -> bool {
        self.index < settings.bounce_limit && self.index < MAX_BOUNCES
    }

    fn is_absorbed(&self) -> bool {
        self.attenuation.max_element() <= 0.0
    }

    /// Mirror ray leaving the current hit.
    fn reflected_ray(&self, epsilon: f32) -> Ray {
        let direction = reflect(self.ray.direction, self.hit.normal);
        Ray::offset(self.hit.position, self.hit.normal, epsilon, direction)
    }
}

/// Trace a camera ray through the scene.
///
/// The direction must not be zero.
pub fn trace_color(ray: &Ray, scene: &Scene, settings: &TraceSettings) -> TraceResult {
    debug_assert!(ray.direction != Vec3::ZERO, "camera ray with zero direction");

    let Some(hit) = intersect(ray, scene, settings.epsilon) else {
        return TraceResult::background(scene.environment(ray.direction));
    };

    let mut color = shade_hit(&hit, ray, scene, settings.epsilon);
    let mut bounce = Bounce {
        ray: *ray,
        hit,
        attenuation: hit.material.specular,
        index: 0,
    };

    while bounce.can_continue(settings) {
        if bounce.is_absorbed() {
            break;
        }

        let reflected = bounce.reflected_ray(settings.epsilon);
        match intersect(&reflected, scene, settings.epsilon) {
            Some(next) => {
                color += bounce.attenuation * shade_hit(&next, &reflected, scene, settings.epsilon);
                bounce = Bounce {
                    ray: reflected,
                    hit: next,
                    attenuation: bounce.attenuation * next.material.specular,
                    index: bounce.index + 1,
                };
            }
            None => {
                color += bounce.attenuation * scene.environment(reflected.direction);
                break;
            }
        }
    }

    TraceResult::surface(color)
}

/// Direct lighting at `hit`, viewed from where `ray` came from.
fn shade_hit(hit: &HitInfo, ray: &Ray, scene: &Scene, epsilon: f32) -> Color {
    let view = (-ray.direction).normalize();
    shade(&hit.material, hit.position, hit.normal, view, scene, epsilon)
}
