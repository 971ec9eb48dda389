// ---------------------------------------------------------------------------
// Domain → range mapping for chart encodings
// ---------------------------------------------------------------------------

/// How a numeric domain value is transformed before the linear range mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Linear,
    Log10,
    Sqrt,
}

impl Transform {
    fn apply(self, v: f64) -> f64 {
        match self {
            Transform::Linear => v,
            // Guard the transform input, not the domain: out-of-domain values
            // still map (possibly off-canvas) instead of clamping.
            Transform::Log10 => v.max(f64::MIN_POSITIVE).log10(),
            Transform::Sqrt => v.max(0.0).sqrt(),
        }
    }
}

/// A continuous scale: fixed domain, fixed range, no clamping.
#[derive(Debug, Clone, Copy)]
pub struct NumericScale {
    transform: Transform,
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl NumericScale {
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(Transform::Linear, domain, range)
    }

    pub fn log10(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(Transform::Log10, domain, range)
    }

    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(Transform::Sqrt, domain, range)
    }

    fn new(transform: Transform, domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut s = Self {
            transform,
            d0: transform.apply(domain.0),
            d1: transform.apply(domain.1),
            r0: range.0,
            r1: range.1,
        };
        if (s.d1 - s.d0).abs() < 1e-12 {
            s.d1 = s.d0 + 1.0;
        }
        s
    }

    /// Map a domain value into the range. Inputs outside the domain map
    /// outside the range.
    pub fn map(&self, v: f64) -> f64 {
        let t = (self.transform.apply(v) - self.d0) / (self.d1 - self.d0);
        self.r0 + t * (self.r1 - self.r0)
    }
}

/// Categorical placement along an axis with padding between bands.
#[derive(Debug, Clone)]
pub struct BandScale {
    keys: Vec<String>,
    r0: f64,
    r1: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(keys: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        Self {
            keys,
            r0: range.0,
            r1: range.1,
            padding: padding.clamp(0.0, 0.9),
        }
    }

    fn step(&self) -> f64 {
        if self.keys.is_empty() {
            return 0.0;
        }
        (self.r1 - self.r0) / self.keys.len() as f64
    }

    /// Width of one band, after padding.
    pub fn bandwidth(&self) -> f64 {
        self.step().abs() * (1.0 - self.padding)
    }

    /// Center of the band for `key`, or `None` for an unknown key.
    pub fn center(&self, key: &str) -> Option<f64> {
        let idx = self.keys.iter().position(|k| k == key)?;
        Some(self.center_at(idx))
    }

    /// Center of the band at position `idx`.
    pub fn center_at(&self, idx: usize) -> f64 {
        self.r0 + self.step() * (idx as f64 + 0.5)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Inverse lookup: which band contains the coordinate `v`.
    pub fn key_at(&self, v: f64) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let t = (v - self.r0) / (self.r1 - self.r0);
        if !(0.0..1.0).contains(&t) {
            return None;
        }
        let idx = (t * self.keys.len() as f64) as usize;
        self.keys.get(idx.min(self.keys.len() - 1)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints_and_midpoint() {
        let s = NumericScale::linear((0.0, 10.0), (0.0, 100.0));
        assert!((s.map(0.0)).abs() < 1e-12);
        assert!((s.map(10.0) - 100.0).abs() < 1e-12);
        assert!((s.map(5.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_domain_is_not_clamped() {
        let s = NumericScale::linear((0.0, 10.0), (0.0, 100.0));
        assert!(s.map(20.0) > 100.0);
        assert!(s.map(-5.0) < 0.0);
    }

    #[test]
    fn monotone_within_domain() {
        let scales = [
            NumericScale::linear((1.0, 1000.0), (0.0, 500.0)),
            NumericScale::log10((1.0, 1000.0), (0.0, 500.0)),
            NumericScale::sqrt((1.0, 1000.0), (0.0, 500.0)),
        ];
        for s in scales {
            let mut prev = s.map(1.0);
            let mut v: f64 = 1.0;
            while v < 1000.0 {
                v *= 1.7;
                let cur = s.map(v.min(1000.0));
                assert!(cur >= prev, "scale must be non-decreasing");
                prev = cur;
            }
        }
    }

    #[test]
    fn log_scale_spaces_decades_evenly() {
        let s = NumericScale::log10((10.0, 1000.0), (0.0, 2.0));
        assert!((s.map(100.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sqrt_scale_compresses_large_values() {
        let s = NumericScale::sqrt((0.0, 100.0), (0.0, 10.0));
        assert!((s.map(25.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn band_positions_and_inverse() {
        let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let s = BandScale::new(keys, (0.0, 30.0), 0.1);
        assert!((s.center("a").unwrap() - 5.0).abs() < 1e-9);
        assert!((s.center("c").unwrap() - 25.0).abs() < 1e-9);
        assert_eq!(s.center("missing"), None);
        assert_eq!(s.key_at(12.0), Some("b"));
        assert_eq!(s.key_at(-1.0), None);
        assert!((s.bandwidth() - 9.0).abs() < 1e-9);
    }
}
