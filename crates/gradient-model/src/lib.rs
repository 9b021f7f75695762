//! Gradient data model for CSS `background-image` transitions.
//!
//! This crate parses a CSS gradient string into a normalized, typed
//! representation and serializes it back:
//! - **Colors**: RGBA channels (`rgb` 0-255, alpha 0-1)
//! - **Lengths**: `px` / `%` stop positions (`em` resolved at parse time)
//! - **Orientation**: linear angle or corner, radial shape/size/center
//! - **Gradients**: kind + orientation + ordered color stops
//!
//! # Usage
//!
//! ```
//! use gradient_model::{parse, stringify, ParseOptions};
//!
//! let options = ParseOptions::default();
//! let parsed = parse("linear-gradient(to right, red, blue 80%)", &options).unwrap();
//! let css = stringify(&parsed).unwrap();
//! assert!(css.starts_with("linear-gradient(1.5707963267948966rad"));
//! ```

pub mod color;
pub mod error;
pub mod gradient;
pub mod length;
pub mod orientation;

pub use color::Rgba;
pub use error::{GradientError, Result};
pub use gradient::{
    parse, stringify, ColorStop, Gradient, GradientKind, ParseOptions, ParsedGradient,
};
pub use length::{Length, LengthUnit};
pub use orientation::{
    Corner, ExtentKeyword, LinearOrientation, Orientation, Position, RadialOrientation,
    RadialSize, Shape,
};
