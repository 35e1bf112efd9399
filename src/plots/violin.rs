//! Violin geometry.
//!
//! A violin is a density silhouette mirrored around the group position,
//! a jittered scatter of the raw data inside it, an optional mean line and
//! an embedded mini box plot without outliers.

use crate::color::Rgb;
use crate::error::Result;
use crate::geometry::{MarkerShape, Markers, Patch, Point, Primitive, Segment, Stroke};
use crate::jitter::JitterSource;
use crate::kde::{DensityCurve, DensityEstimator};
use crate::options::{ViolinOptions, DEFAULT_WIDTH};
use crate::plots::boxplot::{BoxGeometry, BoxGeometryBuilder, BoxStyle};
use crate::render::{Handle, Renderer};
use crate::stats::BoxStats;

/// Mean line width in points.
const MEAN_LINE_WIDTH: f64 = 1.0;

/// Resolved violin colors and flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViolinStyle {
    /// Fill, scatter and mean line color.
    pub violin_color: Rgb,
    /// Silhouette outline.
    pub edge_color: Rgb,
    /// Fill and scatter opacity.
    pub violin_alpha: f64,
    /// Scatter visibility.
    pub show_data: bool,
    /// Mean line visibility.
    pub show_mean: bool,
    /// Scatter marker area.
    pub marker_size: f64,
}

impl ViolinStyle {
    /// Style from options with a resolved fill color.
    #[must_use]
    pub fn from_options(opts: &ViolinOptions, violin_color: Rgb) -> Self {
        Self {
            violin_color,
            edge_color: opts.edge_color,
            violin_alpha: opts.violin_alpha,
            show_data: opts.show_data,
            show_mean: opts.show_mean,
            marker_size: opts.marker_size,
        }
    }
}

/// Geometry of one violin.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinGeometry {
    /// Horizontal center.
    pub position: f64,
    /// Density-to-axis scale, `width / max density`; absent for single values.
    pub scale: Option<f64>,
    /// Mirrored density outline.
    pub silhouette: Option<Patch>,
    /// Jittered raw data.
    pub scatter: Option<Markers>,
    /// Horizontal line at the mean.
    pub mean: Option<Stroke>,
    /// Embedded box plot.
    pub boxplot: BoxGeometry,
    style: ViolinStyle,
}

impl ViolinGeometry {
    /// Current style.
    #[must_use]
    pub fn style(&self) -> &ViolinStyle {
        &self.style
    }

    /// All present parts in draw order.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut parts = Vec::new();
        if let Some(s) = &self.silhouette {
            parts.push(s.clone().into());
        }
        if let Some(s) = &self.scatter {
            parts.push(s.clone().into());
        }
        parts.extend(self.boxplot.primitives());
        if let Some(m) = &self.mean {
            parts.push(m.clone().into());
        }
        parts
    }

    /// Recolor fill, scatter and mean line.
    pub fn set_violin_color(&mut self, color: Rgb) {
        self.style.violin_color = color;
        if let Some(s) = &mut self.silhouette {
            s.face = color;
        }
        if let Some(s) = &mut self.scatter {
            s.face = Some(color);
        }
        if let Some(m) = &mut self.mean {
            m.color = color;
        }
    }

    /// Recolor the outline.
    pub fn set_edge_color(&mut self, color: Rgb) {
        self.style.edge_color = color;
        if let Some(s) = &mut self.silhouette {
            s.edge = color;
        }
    }

    /// Change fill and scatter opacity.
    pub fn set_violin_alpha(&mut self, alpha: f64) {
        self.style.violin_alpha = alpha;
        if let Some(s) = &mut self.silhouette {
            s.alpha = alpha;
        }
        if let Some(s) = &mut self.scatter {
            s.alpha = alpha;
        }
    }

    /// Toggle the scatter.
    pub fn set_show_data(&mut self, show: bool) {
        self.style.show_data = show;
        if let Some(s) = &mut self.scatter {
            s.visible = show;
        }
    }

    /// Toggle the mean line.
    pub fn set_show_mean(&mut self, show: bool) {
        self.style.show_mean = show;
        if let Some(m) = &mut self.mean {
            m.visible = show;
        }
    }
}

/// Output of [`ViolinGeometryBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinLayout {
    /// Box statistics of the sample.
    pub stats: BoxStats,
    /// Density curve; absent for single-value samples.
    pub density: Option<DensityCurve>,
    /// Laid-out geometry.
    pub geometry: ViolinGeometry,
}

/// Builds [`ViolinGeometry`] for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinGeometryBuilder {
    position: f64,
    width: f64,
    box_width: Option<f64>,
    estimator: DensityEstimator,
    style: ViolinStyle,
    box_style: BoxStyle,
}

impl ViolinGeometryBuilder {
    /// Builder for a violin centered at `position`.
    #[must_use]
    pub fn new(position: f64) -> Self {
        let opts = ViolinOptions::default();
        Self {
            position,
            width: DEFAULT_WIDTH,
            box_width: None,
            estimator: DensityEstimator::new(),
            style: ViolinStyle::from_options(&opts, Rgb::GRAY),
            box_style: BoxStyle::from(&opts.box_options()),
        }
    }

    /// Builder configured from options, with a resolved fill color.
    #[must_use]
    pub fn from_options(position: f64, opts: &ViolinOptions, violin_color: Rgb) -> Self {
        Self {
            position,
            width: opts.width,
            box_width: opts.box_width,
            estimator: DensityEstimator::new().bandwidth(opts.bandwidth),
            style: ViolinStyle::from_options(opts, violin_color),
            box_style: BoxStyle::from(&opts.box_options()),
        }
    }

    /// Half-width at the density peak.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Fixed KDE bandwidth.
    #[must_use]
    pub fn bandwidth(mut self, bandwidth: Option<f64>) -> Self {
        self.estimator = self.estimator.bandwidth(bandwidth);
        self
    }

    /// Embedded box width.
    #[must_use]
    pub fn box_width(mut self, box_width: Option<f64>) -> Self {
        self.box_width = box_width;
        self
    }

    /// Violin colors and flags.
    #[must_use]
    pub fn style(mut self, style: ViolinStyle) -> Self {
        self.style = style;
        self
    }

    /// Embedded box colors and flags.
    #[must_use]
    pub fn box_style(mut self, style: BoxStyle) -> Self {
        self.box_style = style;
        self
    }

    /// Compute statistics and density. Fallible half of [`Self::build`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`](crate::Error::EmptySample) for a sample
    /// without values and [`Error::Configuration`](crate::Error::Configuration)
    /// for an invalid bandwidth.
    pub fn analyze(&self, sample: &[f64]) -> Result<(BoxStats, Option<DensityCurve>)> {
        let stats = BoxStats::compute(sample)?;
        let density = if stats.is_single_point() {
            None
        } else {
            Some(self.estimator.estimate(sample)?)
        };
        Ok((stats, density))
    }

    /// Lay out a violin from precomputed statistics and density.
    ///
    /// `sample` supplies the scatter points and should be the sample the
    /// statistics came from.
    pub fn layout<J: JitterSource + ?Sized>(
        &self,
        sample: &[f64],
        stats: &BoxStats,
        density: Option<&DensityCurve>,
        jitter: &mut J,
    ) -> ViolinGeometry {
        let pos = self.position;
        let style = self.style;

        let Some(density) = density.filter(|_| !stats.is_single_point()) else {
            return ViolinGeometry {
                position: pos,
                scale: None,
                silhouette: None,
                scatter: None,
                mean: None,
                boxplot: BoxGeometryBuilder::new(pos)
                    .width(self.width)
                    .style(self.box_style)
                    .without_outliers()
                    .build(stats, jitter),
                style,
            };
        };

        let scale = self.width / density.max_density();

        let silhouette = Patch {
            vertices: silhouette_outline(density, pos, scale, self.width),
            face: style.violin_color,
            edge: style.edge_color,
            alpha: style.violin_alpha,
            visible: true,
        };

        let points: Vec<f64> = sample.iter().copied().filter(|v| !v.is_nan()).collect();
        let amplitudes: Vec<f64> = points.iter().map(|&v| density.interpolate(v) * scale).collect();
        let offsets = jitter.offsets(&amplitudes);
        let scatter = Markers {
            points: points
                .iter()
                .zip(offsets)
                .map(|(&y, dx)| Point::new(pos + dx, y))
                .collect(),
            shape: MarkerShape::Circle,
            face: Some(style.violin_color),
            edge: None,
            alpha: style.violin_alpha,
            size: style.marker_size,
            visible: style.show_data,
        };

        let half = (density.interpolate(stats.mean) * scale).max(scale / 200.0);
        let mut mean = Stroke::new(
            Segment::from_coords(pos - half, stats.mean, pos + half, stats.mean),
            style.violin_color,
            MEAN_LINE_WIDTH,
        );
        mean.visible = style.show_mean;

        let boxplot = BoxGeometryBuilder::new(pos)
            .width(self.width)
            .box_width(self.box_width.unwrap_or(scale / 100.0))
            .style(self.box_style)
            .without_outliers()
            .build(stats, jitter);

        ViolinGeometry {
            position: pos,
            scale: Some(scale),
            silhouette: Some(silhouette),
            scatter: Some(scatter),
            mean: Some(mean),
            boxplot,
            style,
        }
    }

    /// Analyze `sample` and lay out its violin.
    ///
    /// # Errors
    ///
    /// See [`Self::analyze`].
    pub fn build<J: JitterSource + ?Sized>(
        &self,
        sample: &[f64],
        jitter: &mut J,
    ) -> Result<ViolinLayout> {
        let (stats, density) = self.analyze(sample)?;
        let geometry = self.layout(sample, &stats, density.as_ref(), jitter);
        Ok(ViolinLayout {
            stats,
            density,
            geometry,
        })
    }
}

/// Right side bottom to top, then left side top to bottom.
fn silhouette_outline(density: &DensityCurve, pos: f64, scale: f64, width: f64) -> Vec<Point> {
    if density.is_degenerate() {
        let v = density.values()[0];
        return vec![Point::new(pos + width, v), Point::new(pos - width, v)];
    }
    let right = density
        .values()
        .iter()
        .zip(density.densities())
        .map(|(&v, &d)| Point::new(pos + d * scale, v));
    let left = density
        .values()
        .iter()
        .zip(density.densities())
        .rev()
        .map(|(&v, &d)| Point::new(pos - d * scale, v));
    right.chain(left).collect()
}

/// A drawn violin for one group.
///
/// Style setters update the stored geometry and push every part back to the
/// renderer; statistics and density are never recomputed.
#[derive(Debug, Clone)]
pub struct Violin {
    label: String,
    stats: BoxStats,
    density: Option<DensityCurve>,
    geometry: ViolinGeometry,
    handles: Vec<Handle>,
}

impl Violin {
    /// Draw a laid-out violin on `renderer`.
    pub fn draw<R: Renderer + ?Sized>(
        renderer: &mut R,
        label: impl Into<String>,
        layout: ViolinLayout,
    ) -> Self {
        let handles = layout
            .geometry
            .primitives()
            .into_iter()
            .map(|p| renderer.draw(p))
            .collect();
        Self {
            label: label.into(),
            stats: layout.stats,
            density: layout.density,
            geometry: layout.geometry,
            handles,
        }
    }

    /// Group label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Box statistics.
    #[must_use]
    pub fn stats(&self) -> &BoxStats {
        &self.stats
    }

    /// Density curve, absent for single-value samples.
    #[must_use]
    pub fn density(&self) -> Option<&DensityCurve> {
        self.density.as_ref()
    }

    /// Current geometry.
    #[must_use]
    pub fn geometry(&self) -> &ViolinGeometry {
        &self.geometry
    }

    /// Renderer handles in draw order.
    #[must_use]
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Fill color, read back from the silhouette.
    #[must_use]
    pub fn violin_color(&self) -> Rgb {
        self.geometry
            .silhouette
            .as_ref()
            .map_or(self.geometry.style.violin_color, |s| s.face)
    }

    /// Outline color, read back from the silhouette.
    #[must_use]
    pub fn edge_color(&self) -> Rgb {
        self.geometry
            .silhouette
            .as_ref()
            .map_or(self.geometry.style.edge_color, |s| s.edge)
    }

    /// Fill opacity.
    #[must_use]
    pub fn violin_alpha(&self) -> f64 {
        self.geometry.style.violin_alpha
    }

    /// Box color of the embedded box plot, read back from the box (or the
    /// lone point of a single-value sample).
    #[must_use]
    pub fn box_color(&self) -> Rgb {
        let boxplot = &self.geometry.boxplot;
        boxplot
            .box_patch
            .as_ref()
            .map(|b| b.face)
            .or_else(|| boxplot.single_point.as_ref().and_then(|p| p.face))
            .unwrap_or(boxplot.style().box_color)
    }

    /// Median color of the embedded box plot, read back from the median dot.
    #[must_use]
    pub fn median_color(&self) -> Rgb {
        let boxplot = &self.geometry.boxplot;
        boxplot
            .median
            .as_ref()
            .and_then(|m| m.face)
            .unwrap_or(boxplot.style().median_color)
    }

    /// Set the fill, scatter and mean color.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color or a renderer failure.
    pub fn set_violin_color<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        color: Rgb,
    ) -> Result<()> {
        color.validate()?;
        self.geometry.set_violin_color(color);
        self.sync(renderer)
    }

    /// Set the outline color.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid color or a renderer failure.
    pub fn set_edge_color<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        color: Rgb,
    ) -> Result<()> {
        color.validate()?;
        self.geometry.set_edge_color(color);
        self.sync(renderer)
    }

    /// Set fill and scatter opacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when
    /// `alpha` is outside `[0, 1]`, or a renderer failure.
    pub fn set_violin_alpha<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        alpha: f64,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(crate::Error::config(format!("ViolinAlpha must be in [0, 1], got {alpha}")));
        }
        self.geometry.set_violin_alpha(alpha);
        self.sync(renderer)
    }

    /// Set the embedded box color.
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
        self.geometry.boxplot.set_box_color(color);
        self.sync(renderer)
    }

    /// Set the embedded median color.
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
        self.geometry.boxplot.set_median_color(color);
        self.sync(renderer)
    }

    /// Show or hide the scatter.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_data<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_data(show);
        self.sync(renderer)
    }

    /// Show or hide the mean line.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_mean<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.set_show_mean(show);
        self.sync(renderer)
    }

    /// Show or hide the notches.
    ///
    /// # Errors
    ///
    /// Returns an error on renderer failure.
    pub fn set_show_notches<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        show: bool,
    ) -> Result<()> {
        self.geometry.boxplot.set_show_notches(show);
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
        self.geometry.boxplot.set_show_box(show);
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
        self.geometry.boxplot.set_show_median(show);
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
        self.geometry.boxplot.set_show_whiskers(show);
        self.sync(renderer)
    }

    fn sync<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        for (handle, primitive) in self.handles.iter().zip(self.geometry.primitives()) {
            renderer.update(*handle, primitive)?;
        }
        Ok(())
    }
}
