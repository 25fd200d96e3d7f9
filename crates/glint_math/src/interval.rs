/// A range of real values, used for ray parameter acceptance tests and for
/// clamping color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The closed unit range [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Everything strictly greater than `min`.
    pub fn above(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Returns true if x is strictly within (min, max).
    ///
    /// NaN is never surrounded.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same range with the upper bound pulled in to `max`.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Clamps x to be within [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_above_excludes_threshold() {
        let accept = Interval::above(0.001);

        assert!(!accept.surrounds(0.0));
        assert!(!accept.surrounds(0.001));
        assert!(accept.surrounds(0.0011));
        assert!(accept.surrounds(1e30));
        assert!(!accept.surrounds(f32::INFINITY));
    }

    #[test]
    fn test_surrounds_rejects_nan() {
        assert!(!Interval::above(0.0).surrounds(f32::NAN));
    }

    #[test]
    fn test_with_max_narrows() {
        let narrowed = Interval::above(0.001).with_max(4.0);

        assert_eq!(narrowed.min, 0.001);
        assert!(narrowed.surrounds(3.9));
        // Equal distance is not closer
        assert!(!narrowed.surrounds(4.0));
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(Interval::UNIT.clamp(-0.5), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.25), 0.25);
        assert_eq!(Interval::UNIT.clamp(3.0), 1.0);
    }
}
