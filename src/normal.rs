use std::f64::consts::TAU;

use crate::engine::Engine;
use crate::error::{RandomError, Result};

/// Parameters for a (possibly truncated) normal distribution.
///
/// Fields are only reachable through the constructors, which refuse any
/// combination that rejection sampling could never satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    stdev: f64,
    min: f64,
    max: f64,
}

impl Normal {
    /// Mean 0, standard deviation 1, unbounded.
    pub const fn standard() -> Self {
        Self {
            mean: 0.0,
            stdev: 1.0,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Unbounded normal. `mean` and `stdev` must be finite.
    pub fn new(mean: f64, stdev: f64) -> Result<Self> {
        if !mean.is_finite() || !stdev.is_finite() {
            return Err(RandomError::InvalidArgument(format!(
                "normal parameters must be finite: mean {mean}, stdev {stdev}"
            )));
        }
        Ok(Self {
            mean,
            stdev,
            ..Self::standard()
        })
    }

    /// Restrict samples to `[min, max]` by rejection.
    ///
    /// Ranges no sample can land in are rejected here: NaN bounds,
    /// `min > max`, a range made only of infinities, and a zero-spread
    /// distribution whose mean lies outside the range. A very narrow range
    /// is accepted and may take arbitrarily many draws.
    pub fn with_bounds(self, min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(RandomError::InvalidArgument(
                "normal bounds must not be NaN".to_string(),
            ));
        }
        if min > max {
            return Err(RandomError::InvalidArgument(format!(
                "normal bounds are empty: min {min} > max {max}"
            )));
        }
        if min == f64::INFINITY || max == f64::NEG_INFINITY {
            return Err(RandomError::InvalidArgument(format!(
                "normal bounds [{min}, {max}] contain no finite value"
            )));
        }
        let bounded = Self { min, max, ..self };
        if bounded.stdev == 0.0 && !bounded.contains(bounded.mean) {
            return Err(RandomError::InvalidArgument(format!(
                "mean {} lies outside [{min}, {max}] with zero stdev",
                bounded.mean
            )));
        }
        Ok(bounded)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self::standard()
    }
}

impl Engine {
    /// Standard normal deviate.
    pub fn next_normal(&mut self) -> f64 {
        self.sample_normal(&Normal::standard())
    }

    /// Normal deviate with the given parameters.
    ///
    /// Uses the trigonometric Box-Muller transform: each pair of uniform
    /// draws yields two deviates, the cosine one is returned and the sine one
    /// is cached for the next call. Out-of-range values are discarded and the
    /// step repeats (through the cache first), so the loop is unbounded but
    /// terminates almost surely for a non-empty range.
    pub fn sample_normal(&mut self, params: &Normal) -> f64 {
        loop {
            let z = match self.cached_normal.take() {
                Some(z) => z,
                None => {
                    let r = (-2.0 * self.draw().ln()).sqrt();
                    let theta = TAU * self.draw();
                    self.cached_normal = Some(r * theta.sin());
                    r * theta.cos()
                }
            };
            let x = params.mean + z * params.stdev;
            if params.contains(x) {
                return x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_golden_normals() {
        let mut rng = Engine::new(7);
        let expected = [
            0.9633848761904947,
            -0.8122615104010598,
            -1.2445282340922703,
            -0.8621771837886382,
        ];
        for want in expected {
            let got = rng.next_normal();
            assert!(close(got, want), "got {got}, want {want}");
        }
    }

    #[test]
    fn test_scaled_and_bounded() {
        let mut rng = Engine::new(11);
        let scaled = Normal::new(10.0, 2.0).unwrap();
        assert!(close(rng.sample_normal(&scaled), 13.689058475681483));
        assert!(close(rng.sample_normal(&scaled), 8.528206242419454));

        let positive = Normal::standard().with_bounds(0.0, f64::INFINITY).unwrap();
        assert!(close(rng.sample_normal(&positive), 0.2115493047213345));
    }

    #[test]
    fn test_cache_consumed_once() {
        let mut rng = Engine::new(42);
        assert!(rng.cached_normal.is_none());

        rng.next_normal();
        let cached = rng.cached_normal.expect("second deviate cached");

        let snapshot = rng.clone();
        let second = rng.next_normal();
        assert_eq!(second, cached);
        assert!(rng.cached_normal.is_none());

        // Consuming the cache must not touch the uniform stream.
        let mut untouched = snapshot;
        untouched.cached_normal = None;
        assert_eq!(rng, untouched);
    }

    #[test]
    fn test_bounds_respected() {
        let mut rng = Engine::new(7);
        let unit = Normal::standard().with_bounds(-1.0, 1.0).unwrap();
        for _ in 0..10_000 {
            let x = rng.sample_normal(&unit);
            assert!((-1.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(Normal::standard().with_bounds(1.0, -1.0).is_err());
        assert!(Normal::standard().with_bounds(f64::NAN, 1.0).is_err());
        assert!(Normal::standard().with_bounds(0.0, 0.0).is_ok());

        // Zero spread collapses onto the mean, so a point range still terminates.
        let mut rng = Engine::new(3);
        let point = Normal::new(5.0, 0.0).unwrap().with_bounds(5.0, 5.0).unwrap();
        assert_eq!(rng.sample_normal(&point), 5.0);
    }

    #[test]
    fn test_unsatisfiable_parameters_rejected() {
        for (mean, stdev) in [
            (f64::NAN, 1.0),
            (0.0, f64::NAN),
            (f64::INFINITY, 1.0),
            (0.0, f64::NEG_INFINITY),
        ] {
            assert!(matches!(
                Normal::new(mean, stdev),
                Err(RandomError::InvalidArgument(_))
            ));
        }

        let standard = Normal::standard();
        assert!(standard.with_bounds(1.0, -1.0).is_err());
        assert!(standard.with_bounds(f64::INFINITY, f64::INFINITY).is_err());
        assert!(standard.with_bounds(f64::NEG_INFINITY, f64::NEG_INFINITY).is_err());

        let flat = Normal::new(2.0, 0.0).unwrap();
        assert!(flat.with_bounds(3.0, 4.0).is_err());
        assert!(flat.with_bounds(1.0, 3.0).is_ok());
    }

    #[test]
    fn test_accessors() {
        let params = Normal::new(3.0, 0.5).unwrap().with_bounds(2.0, 4.0).unwrap();
        assert_eq!(params.mean(), 3.0);
        assert_eq!(params.stdev(), 0.5);
        assert_eq!(params.min(), 2.0);
        assert_eq!(params.max(), 4.0);

        let standard = Normal::default();
        assert_eq!(standard.mean(), 0.0);
        assert_eq!(standard.stdev(), 1.0);
        assert_eq!(standard.min(), f64::NEG_INFINITY);
        assert_eq!(standard.max(), f64::INFINITY);
    }
}
