//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are traced independently, so
//! a render pass can hand them to rayon workers.

use glint_core::Scene;

use crate::camera::Camera;
use crate::render::render_pixel;
use crate::trace::{TraceResult, TraceSettings};

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket's center to the point (cx, cy).
    fn distance_sq(&self, cx: f32, cy: f32) -> f32 {
        let dx = self.x as f32 + self.width as f32 / 2.0 - cx;
        let dy = self.y as f32 + self.height as f32 / 2.0 - cy;
        dx * dx + dy * dy
    }
}

/// Tile a `width` x `height` image, center buckets first.
///
/// Edge buckets are cropped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(bucket_size as usize)
        .flat_map(|y| {
            (0..width).step_by(bucket_size as usize).map(move |x| {
                Bucket::new(x, y, bucket_size.min(width - x), bucket_size.min(height - y))
            })
        })
        .collect();

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| a.distance_sq(cx, cy).total_cmp(&b.distance_sq(cx, cy)));

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Results in row-major order within the bucket
    pub pixels: Vec<TraceResult>,
}

/// Trace every pixel of one bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    settings: &TraceSettings,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(
                camera,
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                settings,
            ));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_cropped_edges() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.contains(&Bucket::new(64, 64, 36, 6)));
    }

    #[test]
    fn test_center_bucket_first() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);
        assert_eq!(buckets[0], Bucket::new(64, 64, 64, 64));
    }

    #[test]
    fn test_empty_image_has_no_buckets() {
        assert!(generate_buckets(0, 10, 64).is_empty());
        assert!(generate_buckets(10, 0, 64).is_empty());
    }

    #[test]
    fn test_render_bucket_row_major() {
        let mut camera = Camera::new().with_resolution(8, 8);
        camera.initialize();
        let scene = Scene::new(|dir: glint_math::Vec3| dir);
        let bucket = Bucket::new(2, 4, 3, 2);

        let result = render_bucket(&bucket, &camera, &scene, &TraceSettings::default());

        assert_eq!(result.pixels.len(), 6);
        // Second entry is one pixel to the right of the first
        assert_eq!(result.pixels[1].color, camera.get_ray(3, 4).direction);
        assert_eq!(result.pixels[3].color, camera.get_ray(2, 5).direction);
    }
}
