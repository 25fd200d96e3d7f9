//! Pinhole camera for primary ray generation.

use glint_math::{Ray, Vec3};
use serde::Deserialize;

use crate::trace::{SettingsError, SettingsResult};

/// Camera placement and image size, as written in a render job.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 60.0,
        }
    }
}

impl CameraSettings {
    /// Check that the settings produce a finite, non-empty pixel grid.
    pub fn validate(&self) -> SettingsResult<()> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(SettingsError::EmptyImage { width, height });
        }
        // Pixel indices are u32
        if width.checked_mul(height).is_none() {
            return Err(SettingsError::ImageTooLarge { width, height });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SettingsError::InvalidFov(self.vfov));
        }

        let view = self.look_from - self.look_at;
        let side = self.vup.cross(view);
        if !(view.is_finite() && side.is_finite())
            || view.length_squared() == 0.0
            || side.length_squared() == 0.0
        {
            return Err(SettingsError::DegenerateView);
        }
        Ok(())
    }
}

/// Camera for generating one ray per pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32,

    // Cached computed values (set by initialize())
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from_settings(&CameraSettings::default())
    }

    /// Build and initialize a camera from job settings.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            image_width: settings.width,
            image_height: settings.height,
            look_from: settings.look_from,
            look_at: settings.look_at,
            vup: settings.vup,
            vfov: settings.vfov,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Recompute the pixel grid. Must be called after any `with_*` change.
    pub fn initialize(&mut self) {
        // Viewport one unit in front of the eye
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        // Rows go down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left = self.look_from - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Ray through the center of pixel (i, j), (0, 0) being top-left.
    ///
    /// The direction is not normalized and never zero.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v;
        Ray::new(self.look_from, pixel_center - self.look_from)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
