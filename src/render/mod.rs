//! Renderer contract.
//!
//! Plots never draw pixels. They hand [`Primitive`] records to a
//! [`Renderer`], keep the returned [`Handle`]s, and push restyled records
//! back through [`Renderer::update`] when a style property changes. A
//! backend must therefore support mutating color, opacity and visibility of
//! primitives it has already drawn.
//!
//! [`Canvas`] is an in-memory implementation that records everything; it is
//! the reference surface for tests and for backends that render a finished
//! scene in one pass.

mod canvas;

pub use canvas::Canvas;

use crate::color::Rgb;
use crate::error::Result;
use crate::geometry::Primitive;

/// Identifies a primitive previously drawn on a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub usize);

/// A drawing surface (one set of axes).
///
/// Primitives are drawn in call order, which is also their z-order.
pub trait Renderer {
    /// Draw a primitive and return its handle.
    fn draw(&mut self, primitive: Primitive) -> Handle;

    /// Replace an already drawn primitive with a restyled version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`](crate::Error::Render) if the handle is
    /// unknown or refers to a different primitive kind.
    fn update(&mut self, handle: Handle, primitive: Primitive) -> Result<()>;

    /// Set x-axis tick positions and their labels.
    fn set_ticks(&mut self, positions: &[f64], labels: &[String]);

    /// Next color of the surface's palette cycle.
    fn next_color(&mut self) -> Rgb;
}
