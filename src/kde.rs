//! Gaussian kernel density estimation.
//!
//! The density is evaluated on a regular grid that extends three bandwidths
//! past the data, then clipped to `[min, max]` of the sample with both ends
//! evaluated exactly at the extremes. The resulting curve never shows mass
//! outside the observed range.
//!
//! # References
//!
//! - Silverman, B. W. (1986). *Density Estimation for Statistics and Data
//!   Analysis*. Chapman & Hall.
//! - Hintze, J. L., & Nelson, R. D. (1998). "Violin Plots: A Box
//!   Plot-Density Trace Synergism." *The American Statistician*, 52(2).

use tracing::debug;

use crate::error::{Error, Result};
use crate::stats::{filter_nan, quantile};

/// Default number of grid points used before clipping.
pub const DEFAULT_GRID_POINTS: usize = 100;

/// `1 / sqrt(2 * pi)`.
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Grid extension past the data, in bandwidths.
const GRID_PADDING: f64 = 3.0;

/// A density curve over the observed value range.
///
/// `values` is strictly increasing, starts at the sample minimum and ends at
/// the sample maximum. A constant sample yields the single point
/// `(value, 1.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    values: Vec<f64>,
    densities: Vec<f64>,
    bandwidth: Option<f64>,
}

impl DensityCurve {
    /// Evaluation points.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Density at each evaluation point.
    #[must_use]
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Bandwidth used, `None` for the degenerate single-point curve.
    #[must_use]
    pub fn bandwidth(&self) -> Option<f64> {
        self.bandwidth
    }

    /// Number of points on the curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the curve has no points. Never true for an estimated curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the curve collapsed to a single point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.values.len() == 1
    }

    /// Largest density on the curve.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }

    /// Linearly interpolated density at `x`.
    ///
    /// Values outside the curve take the density of the nearest end; a
    /// degenerate curve returns its single density everywhere. A NaN `x`
    /// yields NaN.
    #[must_use]
    pub fn interpolate(&self, x: f64) -> f64 {
        let (values, densities) = (&self.values, &self.densities);
        match values.len() {
            0 => 0.0,
            _ if x.is_nan() => f64::NAN,
            1 => densities[0],
            n => {
                if x <= values[0] {
                    return densities[0];
                }
                if x >= values[n - 1] {
                    return densities[n - 1];
                }
                // first index with values[i] > x, kept in 1..n for curves
                // built from non-finite samples
                let i = values.partition_point(|&v| v <= x).clamp(1, n - 1);
                let (x0, x1) = (values[i - 1], values[i]);
                let (d0, d1) = (densities[i - 1], densities[i]);
                let t = (x - x0) / (x1 - x0);
                d0 + t * (d1 - d0)
            }
        }
    }
}

/// Silverman's rule-of-thumb bandwidth.
///
/// `h = 0.9 * min(sd, IQR / 1.34) * n^(-1/5)`, falling back to the standard
/// deviation alone when the IQR is zero. Returns `None` when the sample has
/// fewer than two values or no spread at all.
#[must_use]
pub fn silverman_bandwidth(sample: &[f64]) -> Option<f64> {
    let n = sample.len();
    if n < 2 {
        return None;
    }
    let mean = sample.iter().sum::<f64>() / n as f64;
    let var = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = var.sqrt();

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = quantile(&sorted, 0.75)? - quantile(&sorted, 0.25)?;

    let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
    let h = 0.9 * spread * (n as f64).powf(-0.2);
    (h > 0.0 && h.is_finite()).then_some(h)
}

/// Gaussian kernel density of `sample` at `x` with bandwidth `h`.
#[must_use]
pub fn gaussian_kde(sample: &[f64], h: f64, x: f64) -> f64 {
    let sum: f64 = sample
        .iter()
        .map(|&xi| {
            let u = (x - xi) / h;
            (-0.5 * u * u).exp()
        })
        .sum();
    sum * INV_SQRT_2PI / (sample.len() as f64 * h)
}

/// Kernel density estimator with optional fixed bandwidth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityEstimator {
    bandwidth: Option<f64>,
    grid_points: usize,
}

impl Default for DensityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl DensityEstimator {
    /// Estimator with automatic (Silverman) bandwidth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bandwidth: None,
            grid_points: DEFAULT_GRID_POINTS,
        }
    }

    /// Fix the bandwidth; `None` restores automatic selection.
    #[must_use]
    pub fn bandwidth(mut self, bandwidth: Option<f64>) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Set the number of grid points evaluated before clipping (minimum 2).
    #[must_use]
    pub fn grid_points(mut self, n: usize) -> Self {
        self.grid_points = n.max(2);
        self
    }

    /// Estimate the density curve of a sample. NaN values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a non-positive or non-finite
    /// bandwidth and [`Error::EmptySample`] when no values remain.
    pub fn estimate(&self, data: &[f64]) -> Result<DensityCurve> {
        if let Some(h) = self.bandwidth {
            if !(h > 0.0 && h.is_finite()) {
                return Err(Error::config(format!("Bandwidth must be positive, got {h}")));
            }
        }

        let sample = filter_nan(data);
        if sample.is_empty() {
            return Err(Error::EmptySample {
                label: String::new(),
            });
        }

        let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min >= max {
            return Ok(DensityCurve {
                values: vec![min],
                densities: vec![1.0],
                bandwidth: None,
            });
        }

        // min < max guarantees positive spread, so Silverman always yields Some
        let h = match self.bandwidth {
            Some(h) => h,
            None => silverman_bandwidth(&sample).unwrap_or((max - min) / 10.0),
        };
        debug!(n = sample.len(), bandwidth = h, "estimating density");

        let lo = min - GRID_PADDING * h;
        let hi = max + GRID_PADDING * h;
        let step = (hi - lo) / (self.grid_points - 1) as f64;

        let mut values = Vec::with_capacity(self.grid_points + 2);
        values.push(min);
        values.extend(
            (0..self.grid_points)
                .map(|i| lo + i as f64 * step)
                .filter(|&x| x > min && x < max),
        );
        values.push(max);

        let densities = values.iter().map(|&x| gaussian_kde(&sample, h, x)).collect();

        Ok(DensityCurve {
            values,
            densities,
            bandwidth: Some(h),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Vec<f64> {
        vec![1.0, 2.0, 2.5, 3.0, 3.2, 3.5, 4.0, 5.0, 6.5, 9.0]
    }

    #[test]
    fn test_endpoints_snap_to_extremes() {
        let curve = DensityEstimator::new().estimate(&sample()).unwrap();
        assert_eq!(curve.values()[0], 1.0);
        assert_eq!(*curve.values().last().unwrap(), 9.0);
        assert_eq!(curve.values().len(), curve.densities().len());
    }

    #[test]
    fn test_values_strictly_increasing() {
        let curve = DensityEstimator::new().estimate(&sample()).unwrap();
        assert!(curve.values().windows(2).all(|w| w[0] < w[1]));
        assert!(curve.densities().iter().all(|&d| d > 0.0));
    }

    #[test]
    fn test_constant_sample_is_unit_point() {
        let curve = DensityEstimator::new().estimate(&[4.0; 5]).unwrap();
        assert!(curve.is_degenerate());
        assert_eq!(curve.values(), &[4.0]);
        assert_eq!(curve.densities(), &[1.0]);
        assert_eq!(curve.bandwidth(), None);
        assert_eq!(curve.interpolate(100.0), 1.0);
    }

    #[test]
    fn test_single_value_is_unit_point() {
        let curve = DensityEstimator::new().estimate(&[2.5]).unwrap();
        assert_eq!(curve.densities(), &[1.0]);
    }

    #[test]
    fn test_non_positive_bandwidth_rejected() {
        for bw in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = DensityEstimator::new()
                .bandwidth(Some(bw))
                .estimate(&sample())
                .unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
        }
    }

    #[test]
    fn test_empty_sample_rejected() {
        assert!(matches!(
            DensityEstimator::new().estimate(&[]),
            Err(Error::EmptySample { .. })
        ));
        assert!(DensityEstimator::new().estimate(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_fixed_bandwidth_used() {
        let curve = DensityEstimator::new()
            .bandwidth(Some(0.8))
            .estimate(&sample())
            .unwrap();
        assert_eq!(curve.bandwidth(), Some(0.8));
        assert_relative_eq!(
            curve.densities()[0],
            gaussian_kde(&sample(), 0.8, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_silverman_reference_value() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        // sd = sqrt(2.5), IQR/1.34 = 2/1.34
        let expected = 0.9 * (2.0 / 1.34f64).min(2.5f64.sqrt()) * 5f64.powf(-0.2);
        assert_relative_eq!(silverman_bandwidth(&data).unwrap(), expected, epsilon = 1e-12);
        assert_eq!(silverman_bandwidth(&[1.0]), None);
        assert_eq!(silverman_bandwidth(&[2.0, 2.0]), None);
    }

    #[test]
    fn test_gaussian_kde_single_point_peak() {
        let d = gaussian_kde(&[0.0], 1.0, 0.0);
        assert_relative_eq!(d, INV_SQRT_2PI, epsilon = 1e-15);
    }

    #[test]
    fn test_interpolate_between_points() {
        let curve = DensityCurve {
            values: vec![0.0, 1.0, 2.0],
            densities: vec![0.0, 1.0, 0.5],
            bandwidth: Some(1.0),
        };
        assert_relative_eq!(curve.interpolate(0.5), 0.5);
        assert_relative_eq!(curve.interpolate(1.5), 0.75);
        assert_relative_eq!(curve.interpolate(1.0), 1.0);
        assert_relative_eq!(curve.interpolate(-3.0), 0.0);
        assert_relative_eq!(curve.interpolate(9.0), 0.5);
        assert_relative_eq!(curve.max_density(), 1.0);
    }

    #[test]
    fn test_interpolate_nan_is_nan() {
        let curve = DensityEstimator::new().estimate(&[1.0, 2.0, 4.0]).unwrap();
        assert!(curve.interpolate(f64::NAN).is_nan());
        let point = DensityEstimator::new().estimate(&[2.0]).unwrap();
        assert!(point.interpolate(f64::NAN).is_nan());
    }

    #[test]
    fn test_interpolate_on_non_finite_curve() {
        let curve = DensityEstimator::new()
            .estimate(&[f64::NEG_INFINITY, 0.0, 1.0, 2.0, f64::INFINITY])
            .unwrap();
        assert_eq!(curve.values()[0], f64::NEG_INFINITY);
        for x in [f64::NEG_INFINITY, 0.5, f64::INFINITY, f64::NAN] {
            let _ = curve.interpolate(x);
        }
    }

    #[test]
    fn test_grid_points_minimum() {
        let curve = DensityEstimator::new()
            .grid_points(0)
            .estimate(&[1.0, 2.0, 3.0])
            .unwrap();
        assert!(curve.len() >= 2);
    }
}
