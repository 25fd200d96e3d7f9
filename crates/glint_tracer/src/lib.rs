//! Glint Tracer - Whitted-style recursive ray tracing of sphere scenes.
//!
//! For every camera ray the tracer finds the closest sphere, shades it with
//! Blinn-Phong lighting and hard shadows, then follows mirror reflections up
//! to a bounded depth. Rays that leave the scene pick up the environment.
//!
//! Each ray is a pure function of the ray, the scene and the settings, so
//! pixels render in parallel against a shared `&Scene`.

mod bucket;
mod camera;
mod hittable;
mod render;
mod shade;
mod trace;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSettings};
pub use hittable::{intersect, HitInfo, Hittable};
pub use render::{color_to_rgba, render, render_pixel, ImageBuffer};
pub use shade::{is_lit, shade};
pub use trace::{
    trace_color, SettingsError, SettingsResult, TraceResult, TraceSettings, DEFAULT_EPSILON,
    MAX_BOUNCES,
};

/// Re-export the scene model and math types
pub use glint_core::{Color, Light, Material, Scene, Sphere};
pub use glint_math::{Ray, Vec3};
