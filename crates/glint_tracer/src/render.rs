//! Render loop: one traced ray per pixel, buckets in parallel.

use glint_core::{Color, Scene};
use glint_math::{Interval, Vec4};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::trace::{trace_color, TraceResult, TraceSettings};

/// Trace the ray through the center of pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    settings: &TraceSettings,
) -> TraceResult {
    trace_color(&camera.get_ray(x, y), scene, settings)
}

/// Image buffer for render output.
///
/// Each pixel holds linear RGB in `xyz` (unclamped) and coverage in `w`.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Store a trace result at (x, y).
    pub fn set(&mut self, x: u32, y: u32, result: &TraceResult) {
        let index = self.index(x, y);
        self.pixels[index] = result.color.extend(result.alpha());
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fraction of pixels whose camera ray hit geometry.
    pub fn coverage(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        self.pixels.iter().map(|p| p.w).sum::<f32>() / self.pixels.len() as f32
    }

    /// Convert to 8-bit RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| color_to_rgba(p.truncate(), p.w))
            .collect()
    }
}

/// Convert a color and coverage to 8-bit RGBA.
///
/// Channels are clamped to [0, 1]; the tracer itself never clamps.
pub fn color_to_rgba(color: Color, alpha: f32) -> [u8; 4] {
    let to_byte = |v: f32| (255.0 * Interval::UNIT.clamp(v)).round() as u8;
    [
        to_byte(color.x),
        to_byte(color.y),
        to_byte(color.z),
        to_byte(alpha),
    ]
}

/// Render the entire scene.
///
/// Buckets are traced in parallel; the scene is only read.
pub fn render(camera: &Camera, scene: &Scene, settings: &TraceSettings) -> ImageBuffer {
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "Rendering {}x{} in {} buckets ({} bounces)",
        camera.image_width,
        camera.image_height,
        buckets.len(),
        settings.effective_bounces()
    );

    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, scene, settings);
            log::debug!("Finished bucket at ({}, {})", bucket.x, bucket.y);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        let bucket = &result.bucket;
        for (i, pixel) in result.pixels.iter().enumerate() {
            let i = i as u32;
            image.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, pixel);
        }
    }

    image
}
