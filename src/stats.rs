//! Robust summary statistics for box plots.
//!
//! Quartiles use linear interpolation between order statistics (the R-7
//! method): for probability `p` over `n` sorted values the position is
//! `h = (n - 1) * p` and the estimate is `x[floor(h)] + (h - floor(h)) *
//! (x[floor(h) + 1] - x[floor(h)])`.
//!
//! # References
//!
//! - Hyndman, R. J., & Fan, Y. (1996). "Sample Quantiles in Statistical
//!   Packages." *The American Statistician*, 50(4), 361-365.
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box
//!   Plots." *The American Statistician*, 32(1), 12-16.

use crate::error::{Error, Result};

/// Whisker fence multiplier applied to the interquartile range.
pub const WHISKER_FACTOR: f64 = 1.5;

/// Notch half-height multiplier: `1.57 * IQR / sqrt(n)`.
pub const NOTCH_FACTOR: f64 = 1.57;

/// Drop NaN values, keeping order.
#[must_use]
pub fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Linear-interpolation quantile of already sorted data.
///
/// `p` is clamped to `[0, 1]`. Returns `None` for empty input.
#[must_use]
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = h - lo as f64;
            // exact order statistics stay exact next to infinite neighbors
            if frac <= 0.0 {
                return Some(sorted[lo]);
            }
            Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
        }
    }
}

/// First, second and third quartile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Whisker end points.
///
/// Each side is the most extreme sample value strictly inside its fence
/// (`Q1 - 1.5 IQR` or `Q3 + 1.5 IQR`); a value on a fence is an outlier and
/// a side with no such value is `None`. With zero IQR both ends collapse
/// onto the quartile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whiskers {
    /// Lower whisker end.
    pub low: Option<f64>,
    /// Upper whisker end.
    pub high: Option<f64>,
}

impl Whiskers {
    /// Both ends, if both exist.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.low.zip(self.high)
    }
}

/// Median confidence notch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notch {
    /// `Q2 - 1.57 IQR / sqrt(n)`.
    pub low: f64,
    /// `Q2 + 1.57 IQR / sqrt(n)`.
    pub high: f64,
}

/// Box plot statistics of one sample.
///
/// For a single-value sample only `mean` and `median` are meaningful; the
/// quartile-derived fields are `None` and `outliers` is empty, which tells
/// builders to draw a lone point instead of a box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Sample size after NaN filtering.
    pub n: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (equals `quartiles.q2` when present).
    pub median: f64,
    /// Quartiles, absent for single-value samples.
    pub quartiles: Option<Quartiles>,
    /// Whisker end points, absent for single-value samples.
    pub whiskers: Option<Whiskers>,
    /// Notch bounds, absent for single-value samples.
    pub notch: Option<Notch>,
    /// Values strictly outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Compute statistics for a sample. NaN values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] if nothing is left after filtering.
    pub fn compute(data: &[f64]) -> Result<Self> {
        let mut sorted = filter_nan(data);
        if sorted.is_empty() {
            return Err(Error::EmptySample {
                label: String::new(),
            });
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let min = sorted[0];
        let max = sorted[n - 1];
        let mean = sorted.iter().sum::<f64>() / n as f64;

        if n == 1 {
            return Ok(Self {
                n,
                min,
                max,
                mean: min,
                median: min,
                quartiles: None,
                whiskers: None,
                notch: None,
                outliers: Vec::new(),
            });
        }

        // n >= 2 so every quantile exists
        let q = |p| quantile(&sorted, p).unwrap_or(min);
        let quartiles = Quartiles {
            q1: q(0.25),
            q2: q(0.5),
            q3: q(0.75),
        };
        let iqr = quartiles.iqr();

        let low_fence = quartiles.q1 - WHISKER_FACTOR * iqr;
        let high_fence = quartiles.q3 + WHISKER_FACTOR * iqr;
        // zero spread: the box and whiskers collapse onto the shared quartile
        let whiskers = if iqr > 0.0 {
            Whiskers {
                low: sorted.iter().copied().find(|&x| x > low_fence),
                high: sorted.iter().rev().copied().find(|&x| x < high_fence),
            }
        } else {
            Whiskers {
                low: Some(quartiles.q1),
                high: Some(quartiles.q3),
            }
        };

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| {
                whiskers.low.is_some_and(|lo| x < lo) || whiskers.high.is_some_and(|hi| x > hi)
            })
            .collect();

        let half_notch = NOTCH_FACTOR * iqr / (n as f64).sqrt();
        let notch = Notch {
            low: quartiles.q2 - half_notch,
            high: quartiles.q2 + half_notch,
        };

        Ok(Self {
            n,
            min,
            max,
            mean,
            median: quartiles.q2,
            quartiles: Some(quartiles),
            whiskers: Some(whiskers),
            notch: Some(notch),
            outliers,
        })
    }

    /// Interquartile range, absent for single-value samples.
    #[must_use]
    pub fn iqr(&self) -> Option<f64> {
        self.quartiles.map(|q| q.iqr())
    }

    /// Whether this sample reduces to a single point.
    #[must_use]
    pub fn is_single_point(&self) -> bool {
        self.quartiles.is_none()
    }
}
