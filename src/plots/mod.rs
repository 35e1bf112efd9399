//! Violin and mini box plots.
//!
//! [`violinplot`] and [`boxplot`] are the grouped entry points. The
//! geometry builders lay out a single group and can be used directly when
//! positions and colors are managed by the caller.

mod boxplot;
mod grouped;
mod violin;

pub use boxplot::{BoxGeometry, BoxGeometryBuilder, BoxStyle, MiniBoxPlot};
pub use grouped::{boxplot, violinplot};
pub use violin::{Violin, ViolinGeometry, ViolinGeometryBuilder, ViolinLayout, ViolinStyle};
