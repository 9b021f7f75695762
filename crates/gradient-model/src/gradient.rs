//! Gradient parsing and serialization.
//!
//! `parse` turns the first gradient function of a `background-image` value
//! into a [`ParsedGradient`]; `stringify` is its inverse. Stop positions that
//! the author left out are filled only at the ends (0% / 100%); interior gaps
//! stay `None` and are resolved by whoever consumes the stops.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::Rgba;
use crate::error::{GradientError, Result};
use crate::length::Length;
use crate::orientation::{LinearOrientation, Orientation, RadialOrientation};

/// Gradient function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientKind {
    #[serde(rename = "linear-gradient")]
    Linear,
    #[serde(rename = "repeating-linear-gradient")]
    RepeatingLinear,
    #[serde(rename = "radial-gradient")]
    Radial,
    #[serde(rename = "repeating-radial-gradient")]
    RepeatingRadial,
}

impl GradientKind {
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Linear => "linear-gradient",
            Self::RepeatingLinear => "repeating-linear-gradient",
            Self::Radial => "radial-gradient",
            Self::RepeatingRadial => "repeating-radial-gradient",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linear-gradient" => Some(Self::Linear),
            "repeating-linear-gradient" => Some(Self::RepeatingLinear),
            "radial-gradient" => Some(Self::Radial),
            "repeating-radial-gradient" => Some(Self::RepeatingRadial),
            _ => None,
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Linear | Self::RepeatingLinear)
    }
}

/// A color plus an optional position along the gradient line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Rgba,
    pub length: Option<Length>,
}

impl ColorStop {
    pub fn new(color: Rgba, length: Option<Length>) -> Self {
        Self { color, length }
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(length) => write!(f, "{} {}", self.color, length),
            None => write!(f, "{}", self.color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub orientation: Orientation,
    pub stops: Vec<ColorStop>,
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.kind.function_name(), self.orientation)?;
        for stop in &self.stops {
            write!(f, ", {stop}")?;
        }
        f.write_str(")")
    }
}

/// A parsed `background-image` value: either a gradient or `none`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedGradient {
    /// No gradient present.
    None,
    Gradient(Gradient),
}

impl ParsedGradient {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            Self::None => None,
            Self::Gradient(g) => Some(g),
        }
    }

    /// Color stops, empty for `none`.
    pub fn stops(&self) -> &[ColorStop] {
        self.as_gradient().map(|g| g.stops.as_slice()).unwrap_or(&[])
    }
}

impl FromStr for ParsedGradient {
    type Err = GradientError;

    /// Parse with the default 16px em size.
    fn from_str(s: &str) -> Result<Self> {
        parse(s, &ParseOptions::default())
    }
}

/// Inputs that come from the element rather than the gradient text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Computed font size in px, used to resolve `em` lengths.
    pub em_size: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { em_size: 16.0 }
    }
}

/// Parse the first gradient in `raw`.
pub fn parse(raw: &str, options: &ParseOptions) -> Result<ParsedGradient> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("none") {
        return Ok(ParsedGradient::None);
    }

    let (kind, inner) = first_gradient_function(s)?;
    let parts = split_top_level(inner, ',');
    if parts.iter().any(|p| p.is_empty()) {
        return Err(GradientError::malformed(raw, "empty argument"));
    }

    let (orientation, consumed) = match parts.first() {
        Some(first) if kind.is_linear() => match LinearOrientation::parse(first)? {
            Some(o) => (Orientation::Linear(o), 1),
            None => (Orientation::Linear(LinearOrientation::default()), 0),
        },
        Some(first) => match RadialOrientation::parse(first, options.em_size)? {
            Some(o) => (Orientation::Radial(o), 1),
            None => (Orientation::Radial(RadialOrientation::default()), 0),
        },
        None => return Err(GradientError::malformed(raw, "empty gradient")),
    };

    let stop_parts = &parts[consumed..];
    if stop_parts.is_empty() {
        return Err(GradientError::malformed(raw, "gradient has no color stops"));
    }

    let last = stop_parts.len() - 1;
    let mut stops = Vec::with_capacity(stop_parts.len());
    for (i, part) in stop_parts.iter().enumerate() {
        let (color, length) = parse_color_stop(part, options.em_size)?;
        let length = length.or(if i == last {
            Some(Length::percent(100.0))
        } else if i == 0 {
            Some(Length::percent(0.0))
        } else {
            None
        });
        stops.push(ColorStop { color, length });
    }

    Ok(ParsedGradient::Gradient(Gradient {
        kind,
        orientation,
        stops,
    }))
}

/// Serialize a gradient back to CSS. Fails for `none`.
pub fn stringify(gradient: &ParsedGradient) -> Result<String> {
    match gradient {
        ParsedGradient::None => Err(GradientError::StringifyNone),
        ParsedGradient::Gradient(g) => Ok(g.to_string()),
    }
}

/// Locate the first top-level gradient function and return its kind and the
/// text between its parentheses. Other functions (`url(...)`) are skipped.
fn first_gradient_function(s: &str) -> Result<(GradientKind, &str)> {
    let bytes = s.as_bytes();
    let mut ident_start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                let close = matching_paren(s, i)
                    .ok_or_else(|| GradientError::malformed(s, "unbalanced parentheses"))?;
                let name = s[ident_start..i].trim();
                if let Some(kind) = GradientKind::from_function_name(name) {
                    return Ok((kind, &s[i + 1..close]));
                }
                trace!(function = name, "skipping non-gradient layer");
                i = close + 1;
                ident_start = i;
                continue;
            }
            b')' => return Err(GradientError::malformed(s, "unbalanced parentheses")),
            b',' | b' ' | b'\t' | b'\n' => ident_start = i + 1,
            _ => {}
        }
        i += 1;
    }
    Err(GradientError::UnknownFunction(s.to_string()))
}

fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (i, ch) in s[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split by `sep`, ignoring separators nested in parentheses.
fn split_top_level(inner: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start_ix = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(inner[start_ix..i].trim());
                start_ix = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(inner[start_ix..].trim());
    parts
}

fn parse_color_stop(part: &str, em_size: f64) -> Result<(Rgba, Option<Length>)> {
    let t = part.trim();
    let mut depth = 0i32;
    let mut last_space = None;
    for (i, ch) in t.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c.is_whitespace() && depth == 0 => last_space = Some(i),
            _ => {}
        }
    }
    if let Some(ix) = last_space {
        let (color_part, pos_part) = (t[..ix].trim(), t[ix..].trim());
        if Length::looks_like_length(pos_part) {
            let length = Length::parse(pos_part, em_size)?;
            return Ok((Rgba::parse(color_part)?, Some(length)));
        }
    }
    Ok((Rgba::parse(t)?, None))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::orientation::{Corner, Position, Shape};

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    fn gradient(raw: &str) -> Gradient {
        match parse(raw, &opts()).unwrap() {
            ParsedGradient::Gradient(g) => g,
            ParsedGradient::None => panic!("expected a gradient for {raw}"),
        }
    }

    #[test]
    fn none_is_the_empty_sentinel() {
        assert_eq!(parse("none", &opts()).unwrap(), ParsedGradient::None);
        assert_eq!(parse("  NONE ", &opts()).unwrap(), ParsedGradient::None);
        assert!(ParsedGradient::None.stops().is_empty());
    }

    #[test]
    fn parses_linear_with_default_orientation() {
        let g = gradient("linear-gradient(red, blue)");
        assert_eq!(g.kind, GradientKind::Linear);
        assert_eq!(g.orientation, Orientation::Linear(LinearOrientation::Angle { rad: PI }));
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].color, Rgba::new(255.0, 0.0, 0.0, 1.0));
        assert_eq!(g.stops[0].length, Some(Length::percent(0.0)));
        assert_eq!(g.stops[1].length, Some(Length::percent(100.0)));
    }

    #[test]
    fn interior_stops_keep_missing_lengths() {
        let g = gradient("linear-gradient(to right, red, lime, blue 80%)");
        assert_eq!(g.orientation, Orientation::Linear(LinearOrientation::Angle { rad: FRAC_PI_2 }));
        assert_eq!(g.stops[0].length, Some(Length::percent(0.0)));
        assert_eq!(g.stops[1].length, None);
        assert_eq!(g.stops[2].length, Some(Length::percent(80.0)));
    }

    #[test]
    fn single_stop_defaults_to_the_end() {
        let g = gradient("linear-gradient(red)");
        assert_eq!(g.stops[0].length, Some(Length::percent(100.0)));
    }

    #[test]
    fn em_lengths_resolve_with_font_size() {
        let parsed = parse(
            "linear-gradient(45deg, red 1em, blue 3em)",
            &ParseOptions { em_size: 10.0 },
        )
        .unwrap();
        let stops = parsed.stops();
        assert_eq!(stops[0].length, Some(Length::px(10.0)));
        assert_eq!(stops[1].length, Some(Length::px(30.0)));
    }

    #[test]
    fn functional_colors_with_inner_commas() {
        let g = gradient(
            "repeating-linear-gradient(rgba(0, 0, 0, 0.5) 10px, rgb(255 255 255) 20px)",
        );
        assert_eq!(g.kind, GradientKind::RepeatingLinear);
        assert_eq!(g.stops[0].color, Rgba::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(g.stops[1].color, Rgba::new(255.0, 255.0, 255.0, 1.0));
        assert_eq!(g.stops[1].length, Some(Length::px(20.0)));
    }

    #[test]
    fn parses_radial_orientation() {
        let g = gradient("radial-gradient(circle at left center, #fff, #000)");
        match g.orientation {
            Orientation::Radial(r) => {
                assert_eq!(r.shape, Some(Shape::Circle));
                assert_eq!(r.at.x, Length::percent(0.0));
                assert_eq!(r.at.y, Length::percent(50.0));
            }
            other => panic!("expected radial orientation, got {other:?}"),
        }
    }

    #[test]
    fn radial_without_orientation_is_centered() {
        let g = gradient("repeating-radial-gradient(red, blue 20px)");
        assert_eq!(g.kind, GradientKind::RepeatingRadial);
        assert_eq!(
            g.orientation,
            Orientation::Radial(RadialOrientation {
                shape: None,
                size: None,
                at: Position::default()
            })
        );
    }

    #[test]
    fn takes_the_first_gradient_layer() {
        let g = gradient(
            "url(a.png), linear-gradient(to top left, red, blue), radial-gradient(red, blue)",
        );
        assert_eq!(g.kind, GradientKind::Linear);
        assert_eq!(
            g.orientation,
            Orientation::Linear(LinearOrientation::Corner {
                corner: Corner::TopLeft
            })
        );
    }

    #[test]
    fn malformed_input_is_recoverable() {
        for raw in [
            "linear-gradient(red, blue",
            "linear-gradient()",
            "linear-gradient(to right)",
            "linear-gradient(red,, blue)",
            "linear-gradient(0.5turn, red, blue)",
            "linear-gradient(red, notacolor)",
            "conic-gradient(red, blue)",
            "",
        ] {
            let err = parse(raw, &opts()).unwrap_err();
            assert!(err.is_recoverable(), "{raw}: {err}");
        }
    }

    #[test]
    fn stringify_rejects_none() {
        assert_eq!(stringify(&ParsedGradient::None), Err(GradientError::StringifyNone));
        assert!(!GradientError::StringifyNone.is_recoverable());
    }

    #[test]
    fn stringify_format() {
        let parsed = parse("linear-gradient(0rad, red, blue 50%)", &opts()).unwrap();
        assert_eq!(
            stringify(&parsed).unwrap(),
            "linear-gradient(0rad, rgba(255,0,0,1) 0%, rgba(0,0,255,1) 50%)"
        );
        let parsed = parse(
            "radial-gradient(ellipse closest-corner at 10px 20px, red, blue)",
            &opts(),
        )
        .unwrap();
        assert_eq!(
            stringify(&parsed).unwrap(),
            concat!(
                "radial-gradient(ellipse closest-corner at 10px 20px, ",
                "rgba(255,0,0,1) 0%, rgba(0,0,255,1) 100%)"
            )
        );
    }

    #[test]
    fn round_trips_across_all_kinds() {
        for raw in [
            "linear-gradient(to right, red, blue)",
            "linear-gradient(33deg, red 10px, green, blue 2em)",
            "repeating-linear-gradient(to bottom right, #123456 0px, #abcdef 15px)",
            "radial-gradient(circle farthest-side at 30% 70%, rgba(1,2,3,0.4), white)",
            "repeating-radial-gradient(ellipse 20px 40px at right bottom, red 0%, yellow 10%)",
        ] {
            let once = parse(raw, &opts()).unwrap();
            let twice = parse(&stringify(&once).unwrap(), &opts()).unwrap();
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn serializes_to_json() {
        let parsed = parse("linear-gradient(0rad, red, blue)", &opts()).unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "gradient");
        assert_eq!(json["kind"], "linear-gradient");
        let back: ParsedGradient = serde_json::from_value(json).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn from_str_uses_default_options() {
        let parsed: ParsedGradient = "linear-gradient(red 1em, blue)".parse().unwrap();
        assert_eq!(parsed.stops()[0].length, Some(Length::px(16.0)));
    }
}
