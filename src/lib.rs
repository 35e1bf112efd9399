//! # Violin-Viz
//!
//! Violin plots and compact box plots for grouped numeric data.
//!
//! Each group of samples is summarized by quartiles, Tukey whiskers, a
//! median notch and a Gaussian kernel density estimate, then laid out as
//! backend-neutral primitives (filled polygons, marker sets, line segments)
//! that a [`Renderer`](render::Renderer) draws. Drawn plots keep their
//! renderer handles, so colors, opacity and visibility can be changed later
//! without recomputing any statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use violin_viz::prelude::*;
//!
//! let mut canvas = Canvas::new();
//! let input = PlotInput::categorical(
//!     &[1.0, 2.0, 2.5, 3.0, 6.0, 7.0, 7.5, 9.0],
//!     &["a", "a", "a", "a", "b", "b", "b", "b"],
//! );
//! let mut violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(7))?;
//!
//! violins[0].set_box_color(&mut canvas, Rgb::BLACK)?;
//! assert_eq!(canvas.tick_labels(), &["a".to_string(), "b".to_string()]);
//! # Ok::<(), violin_viz::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for options and colors
//!
//! ## References
//!
//! - Silverman, B. W. (1986). *Density Estimation for Statistics and Data Analysis*.
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box Plots."
//! - Hintze, J. L., & Nelson, R. D. (1998). "Violin Plots: A Box Plot-Density Trace Synergism."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Colors and the default palette cycle.
pub mod color;

/// Geometric primitives (points, patches, markers, strokes).
pub mod geometry;

/// Input shapes and group extraction.
pub mod data;

/// Plot options and name/value parsing.
pub mod options;

// ============================================================================
// Statistics Modules
// ============================================================================

/// Quantiles, whiskers, notches and outliers.
pub mod stats;

/// Gaussian kernel density estimation.
pub mod kde;

/// Injectable horizontal jitter.
pub mod jitter;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Violin and mini box plots.
pub mod plots;

/// Renderer contract and the in-memory canvas.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for violin-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use violin_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{ColorCycle, Rgb};
    pub use crate::data::{Category, Matrix, PlotInput, Table};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{MarkerShape, Markers, Patch, Point, Primitive, Segment, Stroke};
    pub use crate::jitter::{FixedJitter, JitterSource, RandomJitter};
    pub use crate::kde::{DensityCurve, DensityEstimator};
    pub use crate::options::{parse_options, BoxOptions, ViolinOptions};
    pub use crate::plots::{
        boxplot, violinplot, BoxGeometryBuilder, MiniBoxPlot, Violin, ViolinGeometryBuilder,
    };
    pub use crate::render::{Canvas, Handle, Renderer};
    pub use crate::stats::BoxStats;
}
