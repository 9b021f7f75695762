//! Gradient orientation: the angle of a linear gradient, or the shape, size
//! and center of a radial one.
//!
//! Angles are stored in radians with 0 pointing to the top, following CSS.
//! Side keywords (`to right`) resolve to angles; corner keywords
//! (`to top right`) depend on the box aspect ratio and stay symbolic.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GradientError, Result};
use crate::length::Length;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn from_keywords(a: &str, b: &str) -> Option<Self> {
        let (v, h) = match (a, b) {
            ("top" | "bottom", "left" | "right") => (a, b),
            ("left" | "right", "top" | "bottom") => (b, a),
            _ => return None,
        };
        Some(match (v, h) {
            ("top", "left") => Self::TopLeft,
            ("top", _) => Self::TopRight,
            (_, "left") => Self::BottomLeft,
            _ => Self::BottomRight,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top left",
            Self::TopRight => "top right",
            Self::BottomLeft => "bottom left",
            Self::BottomRight => "bottom right",
        }
    }
}

/// Orientation of a (repeating) linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinearOrientation {
    /// Explicit angle in radians.
    Angle { rad: f64 },
    /// `to <corner>`; cannot be converted to an angle without the box size.
    Corner { corner: Corner },
}

impl Default for LinearOrientation {
    /// `to bottom`.
    fn default() -> Self {
        Self::Angle { rad: PI }
    }
}

impl LinearOrientation {
    /// Parse the leading clause of a linear gradient.
    ///
    /// Returns `Ok(None)` when the clause is not an orientation (it is then
    /// the first color stop).
    pub fn parse(clause: &str) -> Result<Option<Self>> {
        let c = clause.trim().to_ascii_lowercase();
        if let Some(rest) = c.strip_prefix("to ") {
            return parse_direction(clause, rest).map(Some);
        }
        let Some(split) = c.find(|ch: char| ch.is_ascii_alphabetic()) else {
            return Ok(None);
        };
        let (num, unit) = c.split_at(split);
        let Ok(value) = num.trim().parse::<f64>() else {
            return Ok(None);
        };
        match unit {
            "deg" => Ok(Some(Self::Angle {
                rad: value.to_radians(),
            })),
            "rad" => Ok(Some(Self::Angle { rad: value })),
            "grad" | "turn" => Err(GradientError::UnsupportedAngleUnit(clause.trim().to_string())),
            _ => Ok(None),
        }
    }
}

fn parse_direction(clause: &str, keywords: &str) -> Result<LinearOrientation> {
    let words: Vec<&str> = keywords.split_whitespace().collect();
    match words.as_slice() {
        [side] => {
            let rad = match *side {
                "top" => 0.0,
                "right" => FRAC_PI_2,
                "bottom" => PI,
                "left" => -FRAC_PI_2,
                _ => return Err(GradientError::malformed(clause, "unknown direction keyword")),
            };
            Ok(LinearOrientation::Angle { rad })
        }
        [a, b] => Corner::from_keywords(a, b)
            .map(|corner| LinearOrientation::Corner { corner })
            .ok_or_else(|| GradientError::malformed(clause, "invalid corner keywords")),
        _ => Err(GradientError::malformed(clause, "invalid direction")),
    }
}

impl fmt::Display for LinearOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Angle { rad } => write!(f, "{rad}rad"),
            Self::Corner { corner } => write!(f, "to {}", corner.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Ellipse,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

/// Radial size keywords. `contain` and `cover` are the legacy aliases of
/// `closest-side` and `farthest-corner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtentKeyword {
    ClosestSide,
    ClosestCorner,
    FarthestSide,
    FarthestCorner,
    Contain,
    Cover,
}

impl ExtentKeyword {
    fn from_keyword(s: &str) -> Option<Self> {
        Some(match s {
            "closest-side" => Self::ClosestSide,
            "closest-corner" => Self::ClosestCorner,
            "farthest-side" => Self::FarthestSide,
            "farthest-corner" => Self::FarthestCorner,
            "contain" => Self::Contain,
            "cover" => Self::Cover,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClosestSide => "closest-side",
            Self::ClosestCorner => "closest-corner",
            Self::FarthestSide => "farthest-side",
            Self::FarthestCorner => "farthest-corner",
            Self::Contain => "contain",
            Self::Cover => "cover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RadialSize {
    Extent { keyword: ExtentKeyword },
    /// One radius for circles, two for ellipses.
    Explicit { x: Length, y: Option<Length> },
}

impl fmt::Display for RadialSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extent { keyword } => f.write_str(keyword.as_str()),
            Self::Explicit { x, y: Some(y) } => write!(f, "{x} {y}"),
            Self::Explicit { x, y: None } => write!(f, "{x}"),
        }
    }
}

/// Center point of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Length,
    pub y: Length,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: Length::percent(50.0),
            y: Length::percent(50.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RadialOrientation {
    pub shape: Option<Shape>,
    pub size: Option<RadialSize>,
    pub at: Position,
}

impl RadialOrientation {
    /// Parse the leading clause of a radial gradient.
    ///
    /// Returns `Ok(None)` when the clause does not start with a shape, size or
    /// `at` (it is then the first color stop).
    pub fn parse(clause: &str, em_size: f64) -> Result<Option<Self>> {
        let lower = clause.trim().to_ascii_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Ok(None);
        };
        let opens_clause = matches!(*first, "circle" | "ellipse" | "at")
            || ExtentKeyword::from_keyword(first).is_some()
            || Length::looks_like_length(first);
        if !opens_clause {
            return Ok(None);
        }

        let mut out = Self::default();
        let mut radii: Vec<Length> = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            match *token {
                "circle" => out.shape = Some(Shape::Circle),
                "ellipse" => out.shape = Some(Shape::Ellipse),
                "at" => {
                    out.at = parse_position(clause, &tokens[i + 1..], em_size)?;
                    break;
                }
                kw => {
                    if let Some(keyword) = ExtentKeyword::from_keyword(kw) {
                        out.size = Some(RadialSize::Extent { keyword });
                    } else if radii.len() < 2 {
                        radii.push(Length::parse(kw, em_size)?);
                    } else {
                        return Err(GradientError::malformed(clause, "too many radial sizes"));
                    }
                }
            }
        }
        if let Some(x) = radii.first().copied() {
            out.size = Some(RadialSize::Explicit {
                x,
                y: radii.get(1).copied(),
            });
        }
        Ok(Some(out))
    }
}

fn position_keyword(token: &str) -> Option<f64> {
    match token {
        "left" | "top" => Some(0.0),
        "center" => Some(50.0),
        "right" | "bottom" => Some(100.0),
        _ => None,
    }
}

fn position_component(token: &str, em_size: f64) -> Result<Length> {
    match position_keyword(token) {
        Some(pct) => Ok(Length::percent(pct)),
        None => Length::parse(token, em_size),
    }
}

fn is_vertical(token: &str) -> bool {
    matches!(token, "top" | "bottom")
}

fn is_horizontal(token: &str) -> bool {
    matches!(token, "left" | "right")
}

fn parse_position(clause: &str, tokens: &[&str], em_size: f64) -> Result<Position> {
    match tokens {
        [only] => {
            let value = position_component(only, em_size)?;
            if is_vertical(only) {
                Ok(Position {
                    x: Length::percent(50.0),
                    y: value,
                })
            } else {
                Ok(Position {
                    x: value,
                    y: Length::percent(50.0),
                })
            }
        }
        [a, b] => {
            let (x, y) = if is_vertical(a) || is_horizontal(b) {
                (b, a)
            } else {
                (a, b)
            };
            Ok(Position {
                x: position_component(x, em_size)?,
                y: position_component(y, em_size)?,
            })
        }
        _ => Err(GradientError::malformed(
            clause,
            "expected one or two center coordinates after `at`",
        )),
    }
}

impl fmt::Display for RadialOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(shape) = self.shape {
            write!(f, "{} ", shape.as_str())?;
        }
        if let Some(size) = self.size {
            write!(f, "{size} ")?;
        }
        write!(f, "at {} {}", self.at.x, self.at.y)
    }
}

/// Orientation of any supported gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Orientation {
    Linear(LinearOrientation),
    Radial(RadialOrientation),
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Linear(LinearOrientation::default())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear(l) => l.fmt(f),
            Self::Radial(r) => r.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn angle(o: Option<LinearOrientation>) -> f64 {
        match o {
            Some(LinearOrientation::Angle { rad }) => rad,
            other => panic!("expected an angle, got {other:?}"),
        }
    }

    #[test]
    fn side_keywords_resolve_to_angles() {
        assert!((angle(LinearOrientation::parse("to top").unwrap()) - 0.0).abs() < EPSILON);
        assert!((angle(LinearOrientation::parse("to right").unwrap()) - FRAC_PI_2).abs() < EPSILON);
        assert!((angle(LinearOrientation::parse("to bottom").unwrap()) - PI).abs() < EPSILON);
        assert!((angle(LinearOrientation::parse("to left").unwrap()) + FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn corners_stay_symbolic() {
        assert_eq!(
            LinearOrientation::parse("to right top").unwrap(),
            Some(LinearOrientation::Corner {
                corner: Corner::TopRight
            })
        );
        assert_eq!(
            LinearOrientation::parse("to bottom left").unwrap().unwrap().to_string(),
            "to bottom left"
        );
    }

    #[test]
    fn explicit_angles_use_their_unit() {
        assert!((angle(LinearOrientation::parse("90deg").unwrap()) - FRAC_PI_2).abs() < EPSILON);
        assert!((angle(LinearOrientation::parse("1.5rad").unwrap()) - 1.5).abs() < EPSILON);
        assert!((angle(LinearOrientation::parse("-45deg").unwrap()) + PI / 4.0).abs() < EPSILON);
    }

    #[test]
    fn grad_and_turn_are_rejected() {
        assert!(matches!(
            LinearOrientation::parse("0.25turn"),
            Err(GradientError::UnsupportedAngleUnit(_))
        ));
        assert!(matches!(
            LinearOrientation::parse("100grad"),
            Err(GradientError::UnsupportedAngleUnit(_))
        ));
    }

    #[test]
    fn color_stops_are_not_orientations() {
        assert_eq!(LinearOrientation::parse("red").unwrap(), None);
        assert_eq!(LinearOrientation::parse("#fff 10%").unwrap(), None);
        assert_eq!(LinearOrientation::parse("rgb(1, 2, 3)").unwrap(), None);
        assert_eq!(RadialOrientation::parse("blue 20%", 16.0).unwrap(), None);
    }

    #[test]
    fn radial_shape_size_and_center() {
        let r = RadialOrientation::parse("circle closest-side at left top", 16.0)
            .unwrap()
            .unwrap();
        assert_eq!(r.shape, Some(Shape::Circle));
        assert_eq!(
            r.size,
            Some(RadialSize::Extent {
                keyword: ExtentKeyword::ClosestSide
            })
        );
        assert_eq!(r.at.x, Length::percent(0.0));
        assert_eq!(r.at.y, Length::percent(0.0));
    }

    #[test]
    fn radial_center_defaults_and_swaps() {
        let r = RadialOrientation::parse("ellipse", 16.0).unwrap().unwrap();
        assert_eq!(r.at, Position::default());

        let r = RadialOrientation::parse("at bottom", 16.0).unwrap().unwrap();
        assert_eq!(r.at.x, Length::percent(50.0));
        assert_eq!(r.at.y, Length::percent(100.0));

        let r = RadialOrientation::parse("at top right", 16.0).unwrap().unwrap();
        assert_eq!(r.at.x, Length::percent(100.0));
        assert_eq!(r.at.y, Length::percent(0.0));

        let r = RadialOrientation::parse("at 2em 30%", 10.0).unwrap().unwrap();
        assert_eq!(r.at.x, Length::px(20.0));
        assert_eq!(r.at.y, Length::percent(30.0));
    }

    #[test]
    fn radial_explicit_size() {
        let r = RadialOrientation::parse("circle 40px at center", 16.0).unwrap().unwrap();
        assert_eq!(
            r.size,
            Some(RadialSize::Explicit {
                x: Length::px(40.0),
                y: None
            })
        );
        assert_eq!(r.at, Position::default());
    }

    #[test]
    fn radial_display() {
        let r = RadialOrientation::parse("circle farthest-corner at 10px 20%", 16.0)
            .unwrap()
            .unwrap();
        assert_eq!(r.to_string(), "circle farthest-corner at 10px 20%");
        assert_eq!(RadialOrientation::default().to_string(), "at 50% 50%");
    }

    #[test]
    fn linear_display_uses_radians() {
        assert_eq!(LinearOrientation::Angle { rad: 0.5 }.to_string(), "0.5rad");
        assert_eq!(Orientation::default().to_string(), format!("{}rad", PI));
    }
}
