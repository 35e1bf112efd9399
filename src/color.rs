//! Color types and the default palette cycle.
//!
//! Plot options work with [`Rgb`] triples in the unit interval; backends that
//! need 8-bit channels convert through [`Rgb::to_rgba`].

use crate::error::{Error, Result};

/// RGB color with floating-point components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red component (0.0-1.0).
    pub r: f64,
    /// Green component (0.0-1.0).
    pub g: f64,
    /// Blue component (0.0-1.0).
    pub b: f64,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Mid gray, the default box and edge color.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5);
    /// Red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new color. Channels are not validated; see [`Rgb::validate`].
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a slice, which must hold exactly three channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the slice is not a valid RGB triple.
    pub fn from_slice(channels: &[f64]) -> Result<Self> {
        match channels {
            [r, g, b] => {
                let color = Self::new(*r, *g, *b);
                color.validate()?;
                Ok(color)
            }
            _ => Err(Error::config(format!(
                "color must be a 3-element RGB triple, got {} elements",
                channels.len()
            ))),
        }
    }

    /// Look up a named color.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "red" | "r" => Self::RED,
            "green" | "g" => Self::GREEN,
            "blue" | "b" => Self::BLUE,
            "black" | "k" => Self::BLACK,
            "white" | "w" => Self::WHITE,
            "yellow" | "y" => Self::new(1.0, 1.0, 0.0),
            "cyan" | "c" => Self::new(0.0, 1.0, 1.0),
            "magenta" | "m" => Self::new(1.0, 0.0, 1.0),
            "gray" | "grey" => Self::GRAY,
            _ => return None,
        };
        Some(color)
    }

    /// Check that every channel is finite and within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the offending channel.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("red", self.r), ("green", self.g), ("blue", self.b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "{name} channel {value} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to 8-bit RGBA with the given opacity in `[0, 1]`.
    #[must_use]
    pub fn to_rgba(self, alpha: f64) -> Rgba {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(alpha),
        )
    }
}

/// RGBA color with 8-bit components, the form most raster backends consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Default palette, cycled for groups without an explicit violin color.
pub const DEFAULT_PALETTE: [Rgb; 7] = [
    Rgb::new(0.0, 0.447, 0.741),
    Rgb::new(0.85, 0.325, 0.098),
    Rgb::new(0.929, 0.694, 0.125),
    Rgb::new(0.494, 0.184, 0.556),
    Rgb::new(0.466, 0.674, 0.188),
    Rgb::new(0.301, 0.745, 0.933),
    Rgb::new(0.635, 0.078, 0.184),
];

/// Deterministic color cycle.
///
/// A fresh cycle always starts at the first palette entry; drawing surfaces
/// own one so that consecutive plot calls continue the sequence.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    palette: Vec<Rgb>,
    next: usize,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCycle {
    /// Create a cycle over [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            next: 0,
        }
    }

    /// Create a cycle over a custom palette.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or holds an invalid color.
    pub fn with_palette(palette: Vec<Rgb>) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::config("palette must contain at least one color"));
        }
        for color in &palette {
            color.validate()?;
        }
        Ok(Self { palette, next: 0 })
    }

    /// Return the current color and advance.
    pub fn next_color(&mut self) -> Rgb {
        let color = self.palette[self.next % self.palette.len()];
        self.next = (self.next + 1) % self.palette.len();
        color
    }

    /// Rewind to the first palette entry.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
