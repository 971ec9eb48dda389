// ---------------------------------------------------------------------------
// Animated line transition for the country selector
// ---------------------------------------------------------------------------

/// Fixed animation duration in seconds.
pub const DURATION_SECS: f32 = 1.0;

/// Interpolates the drawn polyline from one series to another over the fixed
/// duration. The intermediate shapes are never observable beyond the
/// animation; at completion the drawn series is exactly the target.
#[derive(Debug, Clone)]
pub struct LineTransition {
    from: Vec<[f64; 2]>,
    to: Vec<[f64; 2]>,
    progress: f32,
}

impl LineTransition {
    pub fn new(from: Vec<[f64; 2]>, to: Vec<[f64; 2]>) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.progress = (self.progress + dt / DURATION_SECS).min(1.0);
    }

    pub fn finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// The polyline to draw for the current progress.
    pub fn current(&self) -> Vec<[f64; 2]> {
        if self.finished() || self.from.is_empty() {
            return self.to.clone();
        }
        if self.to.is_empty() {
            return Vec::new();
        }

        let n = self.from.len().max(self.to.len());
        let from = resample(&self.from, n);
        let to = resample(&self.to, n);
        let t = ease_cubic(self.progress) as f64;

        from.iter()
            .zip(&to)
            .map(|(a, b)| [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t])
            .collect()
    }
}

/// Linear resampling by index fraction so two polylines of different lengths
/// can be interpolated pointwise.
fn resample(points: &[[f64; 2]], n: usize) -> Vec<[f64; 2]> {
    if points.len() == n {
        return points.to_vec();
    }
    if points.len() == 1 || n == 1 {
        return vec![points[0]; n];
    }
    (0..n)
        .map(|i| {
            let pos = i as f64 / (n - 1) as f64 * (points.len() - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(points.len() - 1);
            let frac = pos - lo as f64;
            let (a, b) = (points[lo], points[hi]);
            [a[0] + (b[0] - a[0]) * frac, a[1] + (b[1] - a[1]) * frac]
        })
        .collect()
}

fn ease_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(ys: &[f64]) -> Vec<[f64; 2]> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect()
    }

    #[test]
    fn completion_yields_exactly_the_target() {
        let mut tr = LineTransition::new(series(&[0.0, 1.0]), series(&[5.0, 6.0, 7.0]));
        tr.advance(DURATION_SECS);
        assert!(tr.finished());
        assert_eq!(tr.current(), series(&[5.0, 6.0, 7.0]));
    }

    #[test]
    fn start_matches_the_source_shape() {
        let from = series(&[0.0, 2.0, 4.0]);
        let tr = LineTransition::new(from.clone(), series(&[10.0, 10.0, 10.0]));
        assert_eq!(tr.current(), from);
    }

    #[test]
    fn midway_lies_between_source_and_target() {
        let mut tr = LineTransition::new(series(&[0.0, 0.0]), series(&[10.0, 10.0]));
        tr.advance(DURATION_SECS / 2.0);
        for point in tr.current() {
            assert!(point[1] > 0.0 && point[1] < 10.0);
        }
    }

    #[test]
    fn resample_preserves_endpoints() {
        let r = resample(&series(&[1.0, 3.0, 5.0]), 5);
        assert_eq!(r.len(), 5);
        assert_eq!(r[0], [0.0, 1.0]);
        assert_eq!(r[4], [2.0, 5.0]);
        assert_eq!(r[2], [1.0, 3.0]);
    }
}
