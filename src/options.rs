//! Plot options and name/value option parsing.
//!
//! Options are plain builder structs with documented defaults. Validation is
//! explicit ([`ViolinOptions::validate`]) and always runs before any
//! statistics are computed.
//!
//! # Name/value syntax
//!
//! ```text
//! Width=0.4 Bandwidth=0.5 ViolinColor=[1,0,0] EdgeColor=black
//! ShowMean=true ShowNotches=false GroupOrder=[b,a,c]
//! ```
//!
//! Keys are case-insensitive; flags accept only `true` or `false`; colors are
//! `[r,g,b]` triples in `[0, 1]` or a named color.
//!
//! # Example
//!
//! ```rust
//! use violin_viz::options::parse_options;
//!
//! let opts = parse_options("Width=0.4 ShowMean=true").unwrap();
//! assert_eq!(opts.width, 0.4);
//! assert!(opts.show_mean);
//! ```

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Default violin half-width in axis units.
pub const DEFAULT_WIDTH: f64 = 0.3;
/// Default violin fill and scatter opacity.
pub const DEFAULT_ALPHA: f64 = 0.3;
/// Default box width for stand-alone box plots.
pub const DEFAULT_BOX_WIDTH: f64 = 0.03;
/// Default scatter and outlier marker area.
pub const DEFAULT_MARKER_SIZE: f64 = 36.0;
/// Default median and notch marker area.
pub const DEFAULT_MEDIAN_MARKER_SIZE: f64 = 48.0;

/// Options for [`violinplot`](crate::plots::violinplot).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViolinOptions {
    /// Violin half-width at the density peak.
    pub width: f64,
    /// Fixed KDE bandwidth; `None` selects one automatically.
    pub bandwidth: Option<f64>,
    /// Violin fill color; `None` takes the next palette color per group.
    pub violin_color: Option<Rgb>,
    /// Fill and scatter opacity.
    pub violin_alpha: f64,
    /// Violin outline color.
    pub edge_color: Rgb,
    /// Box, whisker, outlier edge and notch face color.
    pub box_color: Rgb,
    /// Median face and notch edge color.
    pub median_color: Rgb,
    /// Embedded box width; `None` uses one hundredth of the density scale.
    pub box_width: Option<f64>,
    /// Draw jittered data points.
    pub show_data: bool,
    /// Outlier visibility for box plots built from
    /// [`box_options`](Self::box_options). The box embedded in a violin never
    /// draws outliers, since the scatter already shows every value.
    pub show_outliers: bool,
    /// Draw the mean marker.
    pub show_mean: bool,
    /// Draw notch markers.
    pub show_notches: bool,
    /// Draw the box.
    pub show_box: bool,
    /// Draw the median marker.
    pub show_median: bool,
    /// Draw the whisker line.
    pub show_whiskers: bool,
    /// Scatter marker area.
    pub marker_size: f64,
    /// Median and notch marker area.
    pub median_marker_size: f64,
    /// Explicit group order by label.
    pub group_order: Option<Vec<String>>,
    /// Jitter seed for reproducible layouts.
    pub seed: Option<u64>,
}

impl Default for ViolinOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ViolinOptions {
    /// Options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            bandwidth: None,
            violin_color: None,
            violin_alpha: DEFAULT_ALPHA,
            edge_color: Rgb::GRAY,
            box_color: Rgb::GRAY,
            median_color: Rgb::WHITE,
            box_width: None,
            show_data: true,
            show_outliers: true,
            show_mean: false,
            show_notches: false,
            show_box: true,
            show_median: true,
            show_whiskers: true,
            marker_size: DEFAULT_MARKER_SIZE,
            median_marker_size: DEFAULT_MEDIAN_MARKER_SIZE,
            group_order: None,
            seed: None,
        }
    }

    /// Set the violin half-width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set a fixed bandwidth.
    #[must_use]
    pub fn bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = Some(bandwidth);
        self
    }

    /// Set the violin color for every group.
    #[must_use]
    pub fn violin_color(mut self, color: Rgb) -> Self {
        self.violin_color = Some(color);
        self
    }

    /// Set fill and scatter opacity.
    #[must_use]
    pub fn violin_alpha(mut self, alpha: f64) -> Self {
        self.violin_alpha = alpha;
        self
    }

    /// Set the violin outline color.
    #[must_use]
    pub fn edge_color(mut self, color: Rgb) -> Self {
        self.edge_color = color;
        self
    }

    /// Set the box color.
    #[must_use]
    pub fn box_color(mut self, color: Rgb) -> Self {
        self.box_color = color;
        self
    }

    /// Set the median color.
    #[must_use]
    pub fn median_color(mut self, color: Rgb) -> Self {
        self.median_color = color;
        self
    }

    /// Override the embedded box width.
    #[must_use]
    pub fn box_width(mut self, width: f64) -> Self {
        self.box_width = Some(width);
        self
    }

    /// Show or hide data points.
    #[must_use]
    pub fn show_data(mut self, show: bool) -> Self {
        self.show_data = show;
        self
    }

    /// Show or hide outliers.
    #[must_use]
    pub fn show_outliers(mut self, show: bool) -> Self {
        self.show_outliers = show;
        self
    }

    /// Show or hide the mean marker.
    #[must_use]
    pub fn show_mean(mut self, show: bool) -> Self {
        self.show_mean = show;
        self
    }

    /// Show or hide notches.
    #[must_use]
    pub fn show_notches(mut self, show: bool) -> Self {
        self.show_notches = show;
        self
    }

    /// Show or hide the box.
    #[must_use]
    pub fn show_box(mut self, show: bool) -> Self {
        self.show_box = show;
        self
    }

    /// Show or hide the median marker.
    #[must_use]
    pub fn show_median(mut self, show: bool) -> Self {
        self.show_median = show;
        self
    }

    /// Show or hide the whisker.
    #[must_use]
    pub fn show_whiskers(mut self, show: bool) -> Self {
        self.show_whiskers = show;
        self
    }

    /// Set the scatter marker area.
    #[must_use]
    pub fn marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    /// Set the median marker area.
    #[must_use]
    pub fn median_marker_size(mut self, size: f64) -> Self {
        self.median_marker_size = size;
        self
    }

    /// Set an explicit group order.
    #[must_use]
    pub fn group_order(mut self, order: &[&str]) -> Self {
        self.group_order = Some(order.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Seed the jitter generator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every option value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first invalid option.
    pub fn validate(&self) -> Result<()> {
        positive("Width", self.width)?;
        if let Some(bw) = self.bandwidth {
            positive("Bandwidth", bw)?;
        }
        if let Some(bw) = self.box_width {
            positive("BoxWidth", bw)?;
        }
        unit_interval("ViolinAlpha", self.violin_alpha)?;
        positive("MarkerSize", self.marker_size)?;
        positive("MedianMarkerSize", self.median_marker_size)?;
        if let Some(c) = &self.violin_color {
            c.validate()?;
        }
        self.edge_color.validate()?;
        self.box_color.validate()?;
        self.median_color.validate()
    }

    /// Box options matching this violin's box settings.
    #[must_use]
    pub fn box_options(&self) -> BoxOptions {
        BoxOptions {
            width: self.width,
            box_width: self.box_width.unwrap_or(DEFAULT_BOX_WIDTH),
            box_color: self.box_color,
            median_color: self.median_color,
            show_outliers: self.show_outliers,
            show_notches: self.show_notches,
            show_box: self.show_box,
            show_median: self.show_median,
            show_whiskers: self.show_whiskers,
            marker_size: self.marker_size,
            median_marker_size: self.median_marker_size,
            group_order: self.group_order.clone(),
            seed: self.seed,
        }
    }
}

/// Options for stand-alone box plots ([`boxplot`](crate::plots::boxplot)).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoxOptions {
    /// Outlier jitter amplitude.
    pub width: f64,
    /// Box width.
    pub box_width: f64,
    /// Box, whisker, outlier edge and notch face color.
    pub box_color: Rgb,
    /// Median face and notch edge color.
    pub median_color: Rgb,
    /// Draw outliers.
    pub show_outliers: bool,
    /// Draw notch markers.
    pub show_notches: bool,
    /// Draw the box.
    pub show_box: bool,
    /// Draw the median marker.
    pub show_median: bool,
    /// Draw the whisker line.
    pub show_whiskers: bool,
    /// Outlier marker area.
    pub marker_size: f64,
    /// Median and notch marker area.
    pub median_marker_size: f64,
    /// Explicit group order by label.
    pub group_order: Option<Vec<String>>,
    /// Jitter seed for reproducible layouts.
    pub seed: Option<u64>,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxOptions {
    /// Options with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            box_width: DEFAULT_BOX_WIDTH,
            box_color: Rgb::GRAY,
            median_color: Rgb::WHITE,
            show_outliers: true,
            show_notches: false,
            show_box: true,
            show_median: true,
            show_whiskers: true,
            marker_size: DEFAULT_MARKER_SIZE,
            median_marker_size: DEFAULT_MEDIAN_MARKER_SIZE,
            group_order: None,
            seed: None,
        }
    }

    /// Set the outlier jitter amplitude.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the box width.
    #[must_use]
    pub fn box_width(mut self, width: f64) -> Self {
        self.box_width = width;
        self
    }

    /// Set the box color.
    #[must_use]
    pub fn box_color(mut self, color: Rgb) -> Self {
        self.box_color = color;
        self
    }

    /// Set the median color.
    #[must_use]
    pub fn median_color(mut self, color: Rgb) -> Self {
        self.median_color = color;
        self
    }

    /// Show or hide outliers.
    #[must_use]
    pub fn show_outliers(mut self, show: bool) -> Self {
        self.show_outliers = show;
        self
    }

    /// Show or hide notches.
    #[must_use]
    pub fn show_notches(mut self, show: bool) -> Self {
        self.show_notches = show;
        self
    }

    /// Set an explicit group order.
    #[must_use]
    pub fn group_order(mut self, order: &[&str]) -> Self {
        self.group_order = Some(order.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Seed the jitter generator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every option value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first invalid option.
    pub fn validate(&self) -> Result<()> {
        positive("Width", self.width)?;
        positive("BoxWidth", self.box_width)?;
        positive("MarkerSize", self.marker_size)?;
        positive("MedianMarkerSize", self.median_marker_size)?;
        self.box_color.validate()?;
        self.median_color.validate()
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be positive, got {value}")))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be in [0, 1], got {value}")))
    }
}

/// Parse whitespace-separated `Name=value` pairs into violin options.
///
/// # Errors
///
/// Returns [`Error::Configuration`] for unknown names, malformed numbers,
/// non-boolean flags and malformed colors. The parsed options are validated
/// before they are returned.
pub fn parse_options(text: &str) -> Result<ViolinOptions> {
    let mut opts = ViolinOptions::new();

    for token in text.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| Error::config(format!("expected Name=value, got '{token}'")))?;
        match key.to_lowercase().as_str() {
            "width" => opts.width = parse_number(key, value)?,
            "bandwidth" => opts.bandwidth = Some(parse_number(key, value)?),
            "boxwidth" => opts.box_width = Some(parse_number(key, value)?),
            "violinalpha" => opts.violin_alpha = parse_number(key, value)?,
            "markersize" => opts.marker_size = parse_number(key, value)?,
            "medianmarkersize" => opts.median_marker_size = parse_number(key, value)?,
            "violincolor" => opts.violin_color = Some(parse_color(value)?),
            "edgecolor" => opts.edge_color = parse_color(value)?,
            "boxcolor" => opts.box_color = parse_color(value)?,
            "mediancolor" => opts.median_color = parse_color(value)?,
            "showdata" => opts.show_data = parse_flag(key, value)?,
            "showoutliers" => opts.show_outliers = parse_flag(key, value)?,
            "showmean" => opts.show_mean = parse_flag(key, value)?,
            "shownotches" => opts.show_notches = parse_flag(key, value)?,
            "showbox" => opts.show_box = parse_flag(key, value)?,
            "showmedian" => opts.show_median = parse_flag(key, value)?,
            "showwhiskers" => opts.show_whiskers = parse_flag(key, value)?,
            "grouporder" => opts.group_order = Some(parse_list(value)),
            "seed" => {
                opts.seed = Some(value.parse().map_err(|_| {
                    Error::config(format!("Seed must be a non-negative integer, got '{value}'"))
                })?);
            }
            _ => return Err(Error::config(format!("unknown option '{key}'"))),
        }
    }

    opts.validate()?;
    Ok(opts)
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| Error::config(format!("{key} expects a number, got '{value}'")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::config(format!("{key} expects true or false, got '{value}'"))),
    }
}

/// Parse `[a,b,c]` into trimmed items.
fn parse_list(s: &str) -> Vec<String> {
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    if inner.is_empty() {
        return Vec::new();
    }
    inner.split(',').map(|v| v.trim().to_string()).collect()
}

/// Parse `[r,g,b]` or a named color.
fn parse_color(s: &str) -> Result<Rgb> {
    if s.starts_with('[') {
        let channels = parse_list(s)
            .iter()
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| Error::config(format!("invalid color channel '{v}'")))
            })
            .collect::<Result<Vec<f64>>>()?;
        Rgb::from_slice(&channels)
    } else {
        Rgb::from_name(s).ok_or_else(|| Error::config(format!("unknown color '{s}'")))
    }
}
