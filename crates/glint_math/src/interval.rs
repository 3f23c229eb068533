/// A closed range `[min, max]` along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if the interval contains no values.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Midpoint of the interval.
    ///
    /// Computed as `max - size / 2` so both halves share the exact same
    /// boundary value.
    pub fn midpoint(&self) -> f32 {
        self.max - self.size() / 2.0
    }

    /// Split at the midpoint into a lower and an upper half.
    ///
    /// The halves share the midpoint, so a value lying on it is contained by
    /// both.
    pub fn halves(&self) -> (Interval, Interval) {
        let mid = self.midpoint();
        (Interval::new(self.min, mid), Interval::new(mid, self.max))
    }

    /// Grow the interval so that it contains `x`.
    pub fn include(&self, x: f32) -> Interval {
        Interval::new(self.min.min(x), self.max.max(x))
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_size() {
        let interval = Interval::new(2.0, 7.0);
        assert_eq!(interval.size(), 5.0);

        let negative = Interval::new(-5.0, 5.0);
        assert_eq!(negative.size(), 10.0);
    }

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = Interval::new(0.0, 10.0);

        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_halves_share_midpoint() {
        let interval = Interval::new(-2.0, 6.0);
        let (low, high) = interval.halves();

        assert_eq!(low, Interval::new(-2.0, 2.0));
        assert_eq!(high, Interval::new(2.0, 6.0));
        assert!(low.contains(2.0));
        assert!(high.contains(2.0));
    }

    #[test]
    fn test_interval_include() {
        let interval = Interval::EMPTY.include(3.0);
        assert_eq!(interval, Interval::new(3.0, 3.0));

        let interval = interval.include(-1.0).include(2.0);
        assert_eq!(interval, Interval::new(-1.0, 3.0));
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::EMPTY;

        assert!(empty.is_empty());
        assert!(!empty.contains(0.0));
        assert!(!empty.contains(f32::INFINITY));
    }
}
