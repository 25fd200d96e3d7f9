//! Environment lookups for rays that escape the scene.

use glint_math::Vec3;

use crate::material::Color;
use crate::texture::Texture;

/// Maps a ray direction to the background color seen along it.
///
/// Directions are not normalized by the caller.
pub trait Environment: Send + Sync {
    fn sample(&self, direction: Vec3) -> Color;
}

impl<F> Environment for F
where
    F: Fn(Vec3) -> Color + Send + Sync,
{
    fn sample(&self, direction: Vec3) -> Color {
        self(direction)
    }
}

/// The same color in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Environment for SolidColor {
    fn sample(&self, _direction: Vec3) -> Color {
        self.color
    }
}

/// Vertical blend from `horizon` (looking straight down) to `zenith`
/// (looking straight up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    horizon: Color,
    zenith: Color,
}

impl SkyGradient {
    pub fn new(horizon: Color, zenith: Color) -> Self {
        Self { horizon, zenith }
    }
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self::new(Color::ONE, Color::new(0.5, 0.7, 1.0))
    }
}

impl Environment for SkyGradient {
    fn sample(&self, direction: Vec3) -> Color {
        let unit_direction = direction.normalize_or_zero();
        let a = 0.5 * (unit_direction.y + 1.0);
        self.horizon * (1.0 - a) + self.zenith * a
    }
}

/// Cube map face order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
}

/// Six-face environment map using the usual GPU cube map conventions.
///
/// Faces are stored in `+X -X +Y -Y +Z -Z` order.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Texture; 6],
    swap_yz: bool,
}

impl CubeMap {
    pub fn new(faces: [Texture; 6]) -> Self {
        Self {
            faces,
            swap_yz: false,
        }
    }

    /// Look the map up with `direction.xzy` instead of `direction`.
    ///
    /// For maps authored Z-up but rendered in a Y-up scene.
    pub fn with_swap_yz(mut self, swap_yz: bool) -> Self {
        self.swap_yz = swap_yz;
        self
    }

    /// Pick the face hit by `direction` and the (s, t) coordinates on it.
    pub fn face_coords(direction: Vec3) -> Option<(CubeFace, f32, f32)> {
        let abs = direction.abs();
        let (face, sc, tc, ma) = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x > 0.0 {
                (CubeFace::PositiveX, -direction.z, -direction.y, abs.x)
            } else {
                (CubeFace::NegativeX, direction.z, -direction.y, abs.x)
            }
        } else if abs.y >= abs.z {
            if direction.y > 0.0 {
                (CubeFace::PositiveY, direction.x, direction.z, abs.y)
            } else {
                (CubeFace::NegativeY, direction.x, -direction.z, abs.y)
            }
        } else if direction.z > 0.0 {
            (CubeFace::PositiveZ, direction.x, -direction.y, abs.z)
        } else {
            (CubeFace::NegativeZ, -direction.x, -direction.y, abs.z)
        };

        if ma.is_nan() || ma <= 0.0 {
            return None;
        }

        let s = 0.5 * (sc / ma + 1.0);
        let t = 0.5 * (tc / ma + 1.0);
        Some((face, s, t))
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        let direction = if self.swap_yz {
            Vec3::new(direction.x, direction.z, direction.y)
        } else {
            direction
        };

        match Self::face_coords(direction) {
            Some((face, s, t)) => self.faces[face as usize].sample_nearest(s, t),
            None => Color::ZERO,
        }
    }
}
