//! Elevation weighting policies for height-dependent entrainment.
//!
//! Weights are evaluated on elevation relative to the lowest eligible particle in the
//! subregion, so every policy sees values `>= 0`. Policies must be non-negative and
//! non-decreasing; equal elevations then always yield equal weights, which the draw
//! treats as a uniform draw. The built-in policies enforce this at construction.
use crate::error::{Error, Result};

/// Maps relative elevation to an unnormalized selection weight.
pub trait ElevationWeighting: Send + Sync {
    fn weight(&self, relative_elevation: f64) -> f64;
}

/// `1 + slope * relative_elevation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearElevation {
    slope: f64,
}

impl LinearElevation {
    /// Rejects negative or non-finite slopes.
    pub fn new(slope: f64) -> Result<Self> {
        if !slope.is_finite() || slope < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "linear elevation slope must be finite and >= 0, got {slope}"
            )));
        }
        Ok(Self { slope })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }
}

impl Default for LinearElevation {
    fn default() -> Self {
        Self { slope: 1.0 }
    }
}

impl ElevationWeighting for LinearElevation {
    #[inline]
    fn weight(&self, relative_elevation: f64) -> f64 {
        (1.0 + self.slope * relative_elevation).max(0.0)
    }
}

/// `exp(rate * relative_elevation)`.
///
/// Large products overflow to `+inf`; the weighted draw treats such particles as
/// outranking every finite weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialElevation {
    rate: f64,
}

impl ExponentialElevation {
    /// Rejects negative or non-finite rates.
    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "exponential elevation rate must be finite and >= 0, got {rate}"
            )));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ElevationWeighting for ExponentialElevation {
    #[inline]
    fn weight(&self, relative_elevation: f64) -> f64 {
        (self.rate * relative_elevation).exp()
    }
}

/// Weights for a set of elevations, relative to their minimum.
pub fn elevation_weights(weighting: &dyn ElevationWeighting, elevations: &[f64]) -> Vec<f64> {
    let floor = elevations
        .iter()
        .copied()
        .filter(|e| e.is_finite())
        .fold(f64::INFINITY, f64::min);
    let floor = if floor.is_finite() { floor } else { 0.0 };
    elevations
        .iter()
        .map(|&e| {
            let rel = (e - floor).max(0.0);
            let w = weighting.weight(rel);
            if w.is_nan() || w < 0.0 {
                0.0
            } else {
                w
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_one_at_floor_and_grows() {
        let w = LinearElevation::default();
        assert_eq!(w.weight(0.0), 1.0);
        assert!(w.weight(2.0) > w.weight(1.0));
    }

    #[test]
    fn exponential_is_one_at_floor_and_grows() {
        let w = ExponentialElevation::new(0.5).unwrap();
        assert_eq!(w.weight(0.0), 1.0);
        assert!(w.weight(3.0) > w.weight(1.0));
    }

    #[test]
    fn equal_elevations_give_equal_weights() {
        let weights = elevation_weights(&LinearElevation::new(4.0).unwrap(), &[2.0, 2.0, 2.0]);
        assert_eq!(weights, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn weights_are_relative_to_lowest() {
        let weights = elevation_weights(&LinearElevation::default(), &[-1.0, 0.0, 2.0]);
        assert_eq!(weights, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn negative_policy_output_is_clamped() {
        struct Negative;
        impl ElevationWeighting for Negative {
            fn weight(&self, _relative_elevation: f64) -> f64 {
                -3.0
            }
        }
        assert_eq!(elevation_weights(&Negative, &[0.0, 1.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn decreasing_policies_are_rejected() {
        for slope in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(LinearElevation::new(slope), Err(Error::InvalidConfig(_))));
        }
        for rate in [-0.5, f64::NAN, f64::NEG_INFINITY] {
            assert!(matches!(
                ExponentialElevation::new(rate),
                Err(Error::InvalidConfig(_))
            ));
        }
        assert_eq!(LinearElevation::new(0.0).unwrap().slope(), 0.0);
        assert_eq!(ExponentialElevation::new(2.0).unwrap().rate(), 2.0);
    }

    #[test]
    fn exponential_overflow_stays_infinite() {
        let weighting = ExponentialElevation::new(1.0).unwrap();
        let weights = elevation_weights(&weighting, &[0.0, 0.0, 800.0]);
        assert_eq!(&weights[..2], &[1.0, 1.0]);
        assert_eq!(weights[2], f64::INFINITY);
    }
}
