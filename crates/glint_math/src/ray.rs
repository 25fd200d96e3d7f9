use crate::Vec3;

/// A ray in 3D space: a half-line starting at `origin` and heading along
/// `direction`.
///
/// The direction is not required to be normalized; intersection distances are
/// expressed in units of its length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is pushed `epsilon` along `normal` so the ray does not
    /// immediately hit the surface it starts on.
    #[inline]
    pub fn offset(position: Vec3, normal: Vec3, epsilon: f32, direction: Vec3) -> Self {
        Self::new(position + normal * epsilon, direction)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
