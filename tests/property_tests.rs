//! Property-based tests for statistics, density estimation and geometry.
//!
//! Run: cargo test --test property_tests

#![allow(clippy::unwrap_used, clippy::float_cmp, missing_docs)]

use proptest::prelude::*;

use violin_viz::jitter::{FixedJitter, RandomJitter};
use violin_viz::kde::DensityEstimator;
use violin_viz::plots::{BoxGeometryBuilder, ViolinGeometryBuilder};
use violin_viz::stats::BoxStats;

fn sample(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3f64..1.0e3, min_len..200)
}

// ============================================================================
// Box statistics
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Quartiles are ordered
    #[test]
    fn prop_quartiles_ordered(data in sample(2)) {
        let stats = BoxStats::compute(&data).unwrap();
        let q = stats.quartiles.unwrap();
        prop_assert!(q.q1 <= q.q2 && q.q2 <= q.q3, "{q:?}");
        prop_assert!(stats.min <= q.q1 && q.q3 <= stats.max);
    }

    /// Whisker ends are sample values inside [min, max]
    #[test]
    fn prop_whiskers_within_range(data in sample(2)) {
        let stats = BoxStats::compute(&data).unwrap();
        let (low, high) = stats.whiskers.unwrap().bounds().unwrap();
        prop_assert!(stats.min <= low && low <= high && high <= stats.max);
        prop_assert!(data.contains(&low) && data.contains(&high));
    }

    /// Outliers are exactly the values on or beyond the Tukey fences
    #[test]
    fn prop_outliers_outside_whiskers(data in sample(2)) {
        let stats = BoxStats::compute(&data).unwrap();
        let q = stats.quartiles.unwrap();
        let iqr = q.iqr();
        let is_outlier = |x: f64| {
            if iqr > 0.0 {
                x <= q.q1 - 1.5 * iqr || x >= q.q3 + 1.5 * iqr
            } else {
                x != q.q1
            }
        };
        let mut expected: Vec<f64> = data.iter().copied().filter(|&x| is_outlier(x)).collect();
        expected.sort_by(f64::total_cmp);
        let mut actual = stats.outliers.clone();
        actual.sort_by(f64::total_cmp);
        prop_assert_eq!(actual, expected);

        let (low, high) = stats.whiskers.unwrap().bounds().unwrap();
        prop_assert!(stats.outliers.iter().all(|&x| x < low || x > high));
    }

    /// Notch is symmetric around the median
    #[test]
    fn prop_notch_symmetric(data in sample(2)) {
        let stats = BoxStats::compute(&data).unwrap();
        let notch = stats.notch.unwrap();
        let lower = stats.median - notch.low;
        let upper = notch.high - stats.median;
        prop_assert!((lower - upper).abs() <= 1e-9 * (1.0 + lower.abs()));
        prop_assert!(lower >= 0.0);
    }

    /// NaN values never change the statistics
    #[test]
    fn prop_nan_filtered(data in sample(2), at in 0usize..200) {
        let mut with_nan = data.clone();
        with_nan.insert(at.min(data.len()), f64::NAN);
        prop_assert_eq!(
            BoxStats::compute(&data).unwrap(),
            BoxStats::compute(&with_nan).unwrap()
        );
    }
}

// ============================================================================
// Density estimation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Values ascend and the ends equal the sample extremes
    #[test]
    fn prop_density_ends_are_extremes(data in sample(1)) {
        let curve = DensityEstimator::new().estimate(&data).unwrap();
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let values = curve.values();
        prop_assert_eq!(values[0], min);
        prop_assert_eq!(values[values.len() - 1], max);
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(curve.densities().iter().all(|d| d.is_finite() && *d >= 0.0));
    }

    /// Constant samples collapse to a unit density point
    #[test]
    fn prop_constant_sample_degenerate(v in -1.0e3f64..1.0e3, n in 1usize..50) {
        let curve = DensityEstimator::new().estimate(&vec![v; n]).unwrap();
        prop_assert_eq!(curve.values(), &[v][..]);
        prop_assert_eq!(curve.densities(), &[1.0][..]);
    }
}

// ============================================================================
// Geometry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Constant samples still produce a visible violin
    #[test]
    fn prop_constant_violin_has_width(
        v in -1.0e3f64..1.0e3,
        n in 2usize..50,
        width in 0.05f64..1.0,
    ) {
        let layout = ViolinGeometryBuilder::new(1.0)
            .width(width)
            .build(&vec![v; n], &mut FixedJitter(0.0))
            .unwrap();
        let silhouette = layout.geometry.silhouette.unwrap();
        prop_assert!(silhouette.width() > 0.0);
        prop_assert!(silhouette.vertices.iter().all(|p| p.x.is_finite()));
    }

    /// The silhouette never exceeds the requested half-width
    #[test]
    fn prop_silhouette_bounded(data in sample(2), width in 0.05f64..1.0, seed in any::<u64>()) {
        let layout = ViolinGeometryBuilder::new(3.0)
            .width(width)
            .build(&data, &mut RandomJitter::seeded(seed))
            .unwrap();
        let silhouette = layout.geometry.silhouette.unwrap();
        for p in &silhouette.vertices {
            prop_assert!((p.x - 3.0).abs() <= width * (1.0 + 1e-9));
        }
        for p in &layout.geometry.scatter.unwrap().points {
            prop_assert!((p.x - 3.0).abs() <= width * (1.0 + 1e-9));
        }
    }

    /// A single value is drawn as one point by both builders
    #[test]
    fn prop_single_value_point_only(v in -1.0e3f64..1.0e3) {
        let boxed = BoxGeometryBuilder::new(1.0)
            .build_sample(&[v], &mut FixedJitter(0.0))
            .unwrap();
        prop_assert!(boxed.is_single_point());
        prop_assert_eq!(boxed.primitives().len(), 1);

        let violin = ViolinGeometryBuilder::new(1.0)
            .build(&[v], &mut FixedJitter(0.0))
            .unwrap();
        prop_assert!(violin.geometry.silhouette.is_none());
        prop_assert!(violin.geometry.boxplot.box_patch.is_none());
        prop_assert!(violin.geometry.boxplot.whisker.is_none());
        prop_assert!(violin.geometry.boxplot.notches.is_none());
        prop_assert_eq!(violin.geometry.primitives().len(), 1);
    }

    /// Outlier jitter stays within the width
    #[test]
    fn prop_outlier_jitter_bounded(
        data in sample(5),
        width in 0.05f64..1.0,
        seed in any::<u64>(),
    ) {
        let stats = BoxStats::compute(&data).unwrap();
        let geometry = BoxGeometryBuilder::new(2.0)
            .width(width)
            .build(&stats, &mut RandomJitter::seeded(seed));
        let outliers = geometry.outliers.unwrap();
        prop_assert_eq!(outliers.points.len(), stats.outliers.len());
        for p in &outliers.points {
            prop_assert!((p.x - 2.0).abs() <= width);
        }
    }
}
