//! RGBA color model for gradient color stops.

use std::fmt;
use std::str::FromStr;

use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};

use crate::error::{GradientError, Result};

/// A color with `r`, `g`, `b` in 0-255 and alpha in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black, used as the stand-in color when a gradient
    /// fades in from (or out to) `none`.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color (named, hex, `rgb()`, `hsl()`, ...) into RGBA.
    pub fn parse(input: &str) -> Result<Self> {
        let v = input.trim();
        let c = CssColor::from_str(v)
            .map_err(|e| GradientError::InvalidColor(format!("`{v}`: {e}")))?;
        Ok(Self {
            r: (c.r * 255.0).round().clamp(0.0, 255.0),
            g: (c.g * 255.0).round().clamp(0.0, 255.0),
            b: (c.b * 255.0).round().clamp(0.0, 255.0),
            a: (c.a.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0,
        })
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
