//! Geometric primitives for plot composition.
//!
//! Points and segments live in axis (data) coordinates. The styled records
//! ([`Patch`], [`Markers`], [`Stroke`]) are what a renderer receives; they
//! carry resolved colors and visibility so a backend never has to consult
//! plot options.

use crate::color::Rgb;

/// A 2D point in axis coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate (group position axis).
    pub x: f64,
    /// Y coordinate (data value axis).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a segment from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Horizontal extent `|x1 - x0|`.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }
}

/// Marker glyph used for point sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    /// Filled circle (data points, median).
    #[default]
    Circle,
    /// Plus sign (outliers).
    Plus,
    /// Upward triangle (lower notch).
    TriangleUp,
    /// Downward triangle (upper notch).
    TriangleDown,
}

/// A filled closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Outline vertices in drawing order; the polygon closes implicitly.
    pub vertices: Vec<Point>,
    /// Fill color.
    pub face: Rgb,
    /// Outline color.
    pub edge: Rgb,
    /// Fill opacity in `[0, 1]`.
    pub alpha: f64,
    /// Whether the patch is drawn.
    pub visible: bool,
}

impl Patch {
    /// Axis-aligned rectangle spanning `[x0, x1] x [y0, y1]`.
    #[must_use]
    pub fn rectangle(x0: f64, x1: f64, y0: f64, y1: f64, face: Rgb, edge: Rgb) -> Self {
        Self {
            vertices: vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            face,
            edge,
            alpha: 1.0,
            visible: true,
        }
    }

    /// Horizontal extent of the outline.
    #[must_use]
    pub fn width(&self) -> f64 {
        let (lo, hi) = self
            .vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        if lo.is_finite() {
            hi - lo
        } else {
            0.0
        }
    }
}

/// A set of markers sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    /// Marker positions.
    pub points: Vec<Point>,
    /// Marker glyph.
    pub shape: MarkerShape,
    /// Face color, `None` for hollow markers.
    pub face: Option<Rgb>,
    /// Edge color, `None` for edgeless markers.
    pub edge: Option<Rgb>,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Marker area in points squared.
    pub size: f64,
    /// Whether the markers are drawn.
    pub visible: bool,
}

impl Markers {
    /// A single opaque marker.
    #[must_use]
    pub fn single(
        point: Point,
        shape: MarkerShape,
        face: Option<Rgb>,
        edge: Option<Rgb>,
        size: f64,
    ) -> Self {
        Self {
            points: vec![point],
            shape,
            face,
            edge,
            alpha: 1.0,
            size,
            visible: true,
        }
    }
}

/// A styled line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Segment endpoints.
    pub segment: Segment,
    /// Line color.
    pub color: Rgb,
    /// Line width in points.
    pub line_width: f64,
    /// Whether the line is drawn.
    pub visible: bool,
}

impl Stroke {
    /// Create a visible stroke.
    #[must_use]
    pub fn new(segment: Segment, color: Rgb, line_width: f64) -> Self {
        Self {
            segment,
            color,
            line_width,
            visible: true,
        }
    }
}

/// Any drawable record handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled polygon.
    Patch(Patch),
    /// Point markers.
    Markers(Markers),
    /// Line segment.
    Stroke(Stroke),
}

impl Primitive {
    /// Whether the primitive is currently visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Patch(p) => p.visible,
            Self::Markers(m) => m.visible,
            Self::Stroke(s) => s.visible,
        }
    }

    /// Short name of the primitive kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Patch(_) => "patch",
            Self::Markers(_) => "markers",
            Self::Stroke(_) => "stroke",
        }
    }
}

impl From<Patch> for Primitive {
    fn from(p: Patch) -> Self {
        Self::Patch(p)
    }
}

impl From<Markers> for Primitive {
    fn from(m: Markers) -> Self {
        Self::Markers(m)
    }
}

impl From<Stroke> for Primitive {
    fn from(s: Stroke) -> Self {
        Self::Stroke(s)
    }
}
