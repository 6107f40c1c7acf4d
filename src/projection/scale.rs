/// Linear map from a value domain onto a pixel range.
///
/// `domain` and `range` may each be decreasing (the declination axis maps
/// `[-90, 90]` onto `[height, 0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) * 0.5;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Map a range value back to the domain.
    #[inline]
    pub fn invert(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return (d0 + d1) * 0.5;
        }
        d0 + (value - r0) / span * (d1 - d0)
    }

    /// Whether `value` lies between the two range endpoints (inclusive).
    pub fn range_contains(&self, value: f64) -> bool {
        let [r0, r1] = self.range;
        value >= r0.min(r1) && value <= r0.max(r1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increasing_scale() {
        let s = LinearScale::new([0.0, 24.0], [0.0, 480.0]);
        assert_eq!(s.apply(12.0), 240.0);
        assert_eq!(s.invert(120.0), 6.0);
        assert!(s.range_contains(0.0));
        assert!(!s.range_contains(480.5));
    }

    #[test]
    fn decreasing_range() {
        let s = LinearScale::new([-90.0, 90.0], [570.0, 0.0]);
        assert_eq!(s.apply(90.0), 0.0);
        assert_eq!(s.apply(-90.0), 570.0);
        assert_eq!(s.invert(285.0), 0.0);
        assert!(s.range_contains(300.0));
    }

    #[test]
    fn degenerate_spans_do_not_produce_nan() {
        let s = LinearScale::new([1.0, 1.0], [0.0, 10.0]);
        assert_eq!(s.apply(5.0), 5.0);
        let s = LinearScale::new([0.0, 24.0], [3.0, 3.0]);
        assert_eq!(s.invert(3.0), 12.0);
    }
}
