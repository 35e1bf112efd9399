//! In-memory recording surface.

use crate::color::{ColorCycle, Rgb};
use crate::error::{Error, Result};
use crate::geometry::Primitive;
use crate::render::{Handle, Renderer};

/// Records primitives, ticks and palette state.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    primitives: Vec<Primitive>,
    tick_positions: Vec<f64>,
    tick_labels: Vec<String>,
    colors: ColorCycle,
}

impl Canvas {
    /// Create an empty canvas with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas with a custom color cycle.
    #[must_use]
    pub fn with_color_cycle(colors: ColorCycle) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    /// All primitives in draw order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Primitive behind a handle.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&Primitive> {
        self.primitives.get(handle.0)
    }

    /// Number of recorded primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Tick positions.
    #[must_use]
    pub fn tick_positions(&self) -> &[f64] {
        &self.tick_positions
    }

    /// Tick labels.
    #[must_use]
    pub fn tick_labels(&self) -> &[String] {
        &self.tick_labels
    }

    /// Remove all primitives and ticks and rewind the palette.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.tick_positions.clear();
        self.tick_labels.clear();
        self.colors.reset();
    }
}

impl Renderer for Canvas {
    fn draw(&mut self, primitive: Primitive) -> Handle {
        self.primitives.push(primitive);
        Handle(self.primitives.len() - 1)
    }

    fn update(&mut self, handle: Handle, primitive: Primitive) -> Result<()> {
        let slot = self
            .primitives
            .get_mut(handle.0)
            .ok_or_else(|| Error::Render(format!("unknown primitive handle {}", handle.0)))?;
        if std::mem::discriminant(slot) != std::mem::discriminant(&primitive) {
            return Err(Error::Render(format!(
                "handle {} refers to a {}, not a {}",
                handle.0,
                slot.kind(),
                primitive.kind()
            )));
        }
        *slot = primitive;
        Ok(())
    }

    fn set_ticks(&mut self, positions: &[f64], labels: &[String]) {
        self.tick_positions = positions.to_vec();
        self.tick_labels = labels.to_vec();
    }

    fn next_color(&mut self) -> Rgb {
        self.colors.next_color()
    }
}
