//! Image textures backing cube map environments.
//!
//! Pixels are kept exactly as stored in the file (bytes scaled to 0-1, no
//! sRGB decode), the same values a GPU cube map sampler hands to a shader
//! without an sRGB internal format.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::material::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {path} has zero size")]
    Empty { path: String },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded RGB texture.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Row-major pixels, top row first
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// `pixels` must hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Load a texture from an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let img = image::open(path).map_err(|source| TextureError::Load {
            path: display.clone(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { path: display });
        }

        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", display, width, height);

        Ok(Self::new(width, height, pixels, display))
    }

    /// Nearest-texel lookup.
    ///
    /// `s` runs left to right and `t` top to bottom, both in [0, 1]; values
    /// outside are clamped to the border. An empty texture samples black.
    pub fn sample_nearest(&self, s: f32, t: f32) -> Color {
        let x = ((s * self.width as f32) as u32).min(self.width.saturating_sub(1));
        let y = ((t * self.height as f32) as u32).min(self.height.saturating_sub(1));
        self.get_pixel(x, y)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }
}
