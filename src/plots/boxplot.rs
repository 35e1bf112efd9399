//! Compact box plot geometry.
//!
//! A mini box plot is a thin box from Q1 to Q3, a single whisker line, a
//! median dot, optional notch triangles and jittered outlier crosses. A
//! single-value sample collapses to one point.

use crate::color::Rgb;
use crate::error::Result;
use crate::geometry::{MarkerShape, Markers, Patch, Point, Primitive, Segment, Stroke};
use crate::jitter::JitterSource;
use crate::options::{BoxOptions, DEFAULT_BOX_WIDTH, DEFAULT_WIDTH};
use crate::render::{Handle, Renderer};
use crate::stats::BoxStats;

/// Whisker line width in points.
const WHISKER_LINE_WIDTH: f64 = 1.0;

/// Resolved colors and visibility flags of a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    /// Box face and edge, whisker, outlier edge, notch face.
    pub box_color: Rgb,
    /// Median face, notch edge.
    pub median_color: Rgb,
    /// Outlier visibility.
    pub show_outliers: bool,
    /// Notch visibility.
    pub show_notches: bool,
    /// Box visibility.
    pub show_box: bool,
    /// Median visibility.
    pub show_median: bool,
    /// Whisker visibility.
    pub show_whiskers: bool,
    /// Outlier marker area.
    pub marker_size: f64,
    /// Median and notch marker area.
    pub median_marker_size: f64,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::from(&BoxOptions::default())
    }
}

impl From<&BoxOptions> for BoxStyle {
    fn from(opts: &BoxOptions) -> Self {
        Self {
            box_color: opts.box_color,
            median_color: opts.median_color,
            show_outliers: opts.show_outliers,
            show_notches: opts.show_notches,
            show_box: opts.show_box,
            show_median: opts.show_median,
            show_whiskers: opts.show_whiskers,
            marker_size: opts.marker_size,
            median_marker_size: opts.median_marker_size,
        }
    }
}

/// Geometry of one box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGeometry {
    /// Horizontal center.
    pub position: f64,
    /// Lone point for single-value samples; every other part is then absent.
    pub single_point: Option<Markers>,
    /// Q1..Q3 rectangle.
    pub box_patch: Option<Patch>,
    /// Whisker line from the low to the high whisker end.
    pub whisker: Option<Stroke>,
    /// Jittered outlier crosses.
    pub outliers: Option<Markers>,
    /// Median dot.
    pub median: Option<Markers>,
    /// Lower (upward triangle) and upper (downward triangle) notch markers.
    pub notches: Option<(Markers, Markers)>,
    style: BoxStyle,
}

impl BoxGeometry {
    /// Style the geometry was built or last restyled with.
    #[must_use]
    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    /// Whether the sample collapsed to a single point.
    #[must_use]
    pub fn is_single_point(&self) -> bool {
        self.single_point.is_some()
    }

    /// All present parts in draw order.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut parts = Vec::new();
        if let Some(p) = &self.single_point {
            parts.push(p.clone().into());
        }
        if let Some(w) = &self.whisker {
            parts.push(w.clone().into());
        }
        if let Some(b) = &self.box_patch {
            parts.push(b.clone().into());
        }
        if let Some(o) = &self.outliers {
            parts.push(o.clone().into());
        }
        if let Some(m) = &self.median {
            parts.push(m.clone().into());
        }
        if let Some((lo, hi)) = &self.notches {
            parts.push(lo.clone().into());
            parts.push(hi.clone().into());
        }
        parts
    }

    /// Recolor every box-colored part.
    pub fn set_box_color(&mut self, color: Rgb) {
        self.style.box_color = color;
        if let Some(p) = &mut self.single_point {
            p.face = Some(color);
            p.edge = Some(color);
        }
        if let Some(b) = &mut self.box_patch {
            b.face = color;
            b.edge = color;
        }
        if let Some(w) = &mut self.whisker {
            w.color = color;
        }
        if let Some(o) = &mut self.outliers {
            o.edge = Some(color);
        }
        if let Some((lo, hi)) = &mut self.notches {
            lo.face = Some(color);
            hi.face = Some(color);
        }
    }

    /// Recolor the median face and notch edges.
    pub fn set_median_color(&mut self, color: Rgb) {
        self.style.median_color = color;
        if let Some(m) = &mut self.median {
            m.face = Some(color);
        }
        if let Some((lo, hi)) = &mut self.notches {
            lo.edge = Some(color);
            hi.edge = Some(color);
        }
    }

    /// Toggle outlier visibility.
    pub fn set_show_outliers(&mut self, show: bool) {
        self.style.show_outliers = show;
        if let Some(o) = &mut self.outliers {
            o.visible = show;
        }
    }

    /// Toggle notch visibility.
    pub fn set_show_notches(&mut self, show: bool) {
        self.style.show_notches = show;
        if let Some((lo, hi)) = &mut self.notches {
            lo.visible = show;
            hi.visible = show;
        }
    }

    /// Toggle box visibility.
    pub fn set_show_box(&mut self, show: bool) {
        self.style.show_box = show;
        if let Some(b) = &mut self.box_patch {
            b.visible = show;
        }
    }

    /// Toggle median visibility.
    pub fn set_show_median(&mut self, show: bool) {
        self.style.show_median = show;
        if let Some(m) = &mut self.median {
            m.visible = show;
        }
    }

    /// Toggle whisker visibility.
    pub fn set_show_whiskers(&mut self, show: bool) {
        self.style.show_whiskers = show;
        if let Some(w) = &mut self.whisker {
            w.visible = show;
        }
    }
}

/// Builds [`BoxGeometry`] from [`BoxStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGeometryBuilder {
    position: f64,
    width: f64,
    box_width: f64,
    outliers: bool,
    style: BoxStyle,
}

impl BoxGeometryBuilder {
    /// Builder for a box centered at `position` with default sizes.
    #[must_use]
    pub fn new(position: f64) -> Self {
        Self {
            position,
            width: DEFAULT_WIDTH,
            box_width: DEFAULT_BOX_WIDTH,
            outliers: true,
            style: BoxStyle::default(),
        }
    }

    /// Outlier jitter amplitude.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Full width of the box.
    #[must_use]
    pub fn box_width(mut self, box_width: f64) -> Self {
        self.box_width = box_width;
        self
    }

    /// Colors and flags.
    #[must_use]
    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Omit outlier geometry entirely (used inside violins).
    #[must_use]
    pub fn without_outliers(mut self) -> Self {
        self.outliers = false;
        self
    }

    /// Lay out the box for precomputed statistics.
    pub fn build<J: JitterSource + ?Sized>(&self, stats: &BoxStats, jitter: &mut J) -> BoxGeometry {
        let pos = self.position;
        let style = self.style;

        let mut geometry = BoxGeometry {
            position: pos,
            single_point: None,
            box_patch: None,
            whisker: None,
            outliers: None,
            median: None,
            notches: None,
            style,
        };

        let (Some(q), Some(whiskers), Some(notch)) =
            (stats.quartiles, stats.whiskers, stats.notch)
        else {
            geometry.single_point = Some(Markers::single(
                Point::new(pos, stats.median),
                MarkerShape::Circle,
                Some(style.box_color),
                Some(style.box_color),
                style.median_marker_size,
            ));
            return geometry;
        };

        let half = self.box_width / 2.0;
        let mut box_patch = Patch::rectangle(
            pos - half,
            pos + half,
            q.q1,
            q.q3,
            style.box_color,
            style.box_color,
        );
        box_patch.visible = style.show_box;
        geometry.box_patch = Some(box_patch);

        geometry.whisker = whiskers.bounds().map(|(low, high)| {
            let mut stroke = Stroke::new(
                Segment::from_coords(pos, low, pos, high),
                style.box_color,
                WHISKER_LINE_WIDTH,
            );
            stroke.visible = style.show_whiskers;
            stroke
        });

        if self.outliers {
            let amplitudes = vec![self.width; stats.outliers.len()];
            let offsets = jitter.offsets(&amplitudes);
            geometry.outliers = Some(Markers {
                points: stats
                    .outliers
                    .iter()
                    .zip(offsets)
                    .map(|(&y, dx)| Point::new(pos + dx, y))
                    .collect(),
                shape: MarkerShape::Plus,
                face: None,
                edge: Some(style.box_color),
                alpha: 1.0,
                size: style.marker_size,
                visible: style.show_outliers,
            });
        }

        let mut median = Markers::single(
            Point::new(pos, q.q2),
            MarkerShape::Circle,
            Some(style.median_color),
            None,
            style.median_marker_size,
        );
        median.visible = style.show_median;
        geometry.median = Some(median);

        let notch_marker = |y, shape| {
            let mut m = Markers::single(
                Point::new(pos, y),
                shape,
                Some(style.box_color),
                Some(style.median_color),
                style.median_marker_size,
            );
            m.visible = style.show_notches;
            m
        };
        geometry.notches = Some((
            notch_marker(notch.low, MarkerShape::TriangleUp),
            notch_marker(notch.high, MarkerShape::TriangleDown),
        ));

        geometry
    }

    /// Compute statistics for `sample` and lay out the box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`](crate::Error::EmptySample) if the
    /// sample has no non-NaN values.
    pub fn build_sample<J: JitterSource + ?Sized>(
        &self,
        sample: &[f64],
        jitter: &mut J,
    ) -> Result<BoxGeometry> {
        let stats = BoxStats::compute(sample)?;
        Ok(self.build(&stats, jitter))
    }
}

/// A drawn box plot for one group.
///
/// Holds its statistics, its geometry and the renderer handles of every
/// drawn part. Style setters update the stored geometry and push the
/// restyled parts to the renderer; statistics are never recomputed.
#[derive(Debug, Clone)]
pub struct MiniBoxPlot {
    label: String,
    stats: BoxStats,
    geometry: BoxGeometry,
    handles: Vec<Handle>,
}

impl MiniBoxPlot {
    /// Draw `geometry` on `renderer`.
    pub fn draw<R: Renderer + ?Sized>(
        renderer: &mut R,
        label: impl Into<String>,
        stats: BoxStats,
        geometry: BoxGeometry,
    ) -> Self {
        let handles = geometry
            .primitives()
            .into_iter()
            .map(|p| renderer.draw(p))
            .collect();
        Self {
            label: label.into(),
            stats,
            geometry,
            handles,
        }
    }

    /// Group label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Computed statistics.
    #[must_use]
    pub fn stats(&self) -> &BoxStats {
        &self.stats
    }

    /// Current geometry.
    #[must_use]
    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    /// Renderer handles in draw order.
    #[must_use]
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Box color, read back from the box fill.
    #[must_use]
    pub fn box_color(&self) -> Rgb {
        self.geometry
            .box_patch
            .as_ref()
            .map_or(self.geometry.style.box_color, |b| b.face)
    }

    /// Median color, read back from the median face.
    #[must_use]
    pub fn median_color(&self) -> Rgb {
        self.geometry
            .median
            .as_ref()
            .and_then(|m| m.face)
            .unwrap_or(self.geometry.style.median_color)
    }

    /// Whether outliers are shown.
    #[must_use]
    pub fn show_outliers(&self) -> bool {
        self.geometry.style.show_outliers
    }

    /// Whether notches are shown.
    #[must_use]
    pub fn show_notches(&self) -> bool {
        self.geometry.style.show_notches
    }

    /// Set the box color.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color or a renderer failure.
    pub fn set_box_color<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        color: Rgb,
    ) -> Result<()> {
        color.validate()?;
        self.geometry.set_box_color(color);
        self.sync(renderer)
    }

    /// Set the median color.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color or a renderer failure.
    pub fn set_median_color<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        color: Rgb,
    ) -> Result<()> {
        color.validate()?;
        self.geometry.set_median_color(color);
        self.sync(renderer)
    }

    /// Show or hide outliers.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_outliers<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_outliers(show);
        self.sync(renderer)
    }

    /// Show or hide notches.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_notches<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_notches(show);
        self.sync(renderer)
    }

    /// Show or hide the box.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_box<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_box(show);
        self.sync(renderer)
    }

    /// Show or hide the median.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_median<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_median(show);
        self.sync(renderer)
    }

    /// Show or hide the whisker.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_whiskers<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_whiskers(show);
        self.sync(renderer)
    }

    fn sync<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        for (handle, primitive) in self.handles.iter().zip(self.geometry.primitives()) {
            renderer.update(*handle, primitive)?;
        }
        Ok(())
    }
}
