// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Mirror `v` about the normal `n`.
///
/// Matches GLSL `reflect`: `v - 2 * dot(v, n) * n`. `n` must be unit length,
/// `v` may have any length and the result keeps it.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_head_on() {
        let r = reflect(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        assert_eq!(r, Vec3::Z);
    }

    #[test]
    fn test_reflect_keeps_tangent_component() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_preserves_length() {
        let v = Vec3::new(3.0, -4.0, 2.0);
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }
}
