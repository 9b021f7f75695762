//! Blending between two gradients.
//!
//! Colours, stop lengths and orientations interpolate through the
//! [`Interpolate`] trait. Mismatched stop counts are paired by repeating the
//! shorter side's edge stop, and a `none` side fades in or out through a
//! transparent copy of the other gradient.

use std::borrow::Cow;

use gradient_config::StopDirection;
use gradient_model::{
    ColorStop, Gradient, GradientError, Length, LinearOrientation, Orientation, ParsedGradient,
    Position, RadialOrientation, Rgba,
};

/// Which end of the stop lists is paired when their lengths differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopAlignment {
    /// Pair from the first stop; the shorter list repeats its last stop.
    #[default]
    End,
    /// Pair from the last stop; the shorter list repeats its first stop.
    Start,
}

impl From<StopDirection> for StopAlignment {
    fn from(direction: StopDirection) -> Self {
        match direction {
            StopDirection::End => Self::End,
            StopDirection::Start => Self::Start,
        }
    }
}

/// Trait for values that can be blended between a start and an end state.
pub trait Interpolate {
    /// Blend from `self` to `to` at `t` (0.0 = self, 1.0 = to).
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

/// Linear interpolation between two f64 values.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Round to `digits` decimal places.
#[inline]
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

impl Interpolate for Rgba {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Rgba::new(
            round_to(lerp(self.r, to.r, t), 0),
            round_to(lerp(self.g, to.g, t), 0),
            round_to(lerp(self.b, to.b, t), 0),
            round_to(lerp(self.a, to.a, t), 4),
        )
    }
}

impl Interpolate for Length {
    /// Same units, or a zero on either side, blend in the non-zero side's
    /// unit. Anything else jumps straight to `to`.
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if self.unit != to.unit && !self.is_zero() && !to.is_zero() {
            return *to;
        }
        let unit = if to.is_zero() && !self.is_zero() {
            self.unit
        } else {
            to.unit
        };
        Length {
            unit,
            value: round_to(lerp(self.value, to.value, t), 4),
        }
    }
}

impl Interpolate for Position {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Position {
            x: self.x.interpolate(&to.x, t),
            y: self.y.interpolate(&to.y, t),
        }
    }
}

impl Interpolate for Orientation {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (
                Orientation::Linear(LinearOrientation::Angle { rad: from }),
                Orientation::Linear(LinearOrientation::Angle { rad: target }),
            ) => Orientation::Linear(LinearOrientation::Angle {
                rad: round_to(lerp(*from, *target, t), 4),
            }),
            (Orientation::Radial(from), Orientation::Radial(target)) => {
                Orientation::Radial(RadialOrientation {
                    shape: target.shape,
                    size: target.size,
                    at: from.at.interpolate(&target.at, t),
                })
            }
            _ => *to,
        }
    }
}

/// Blend `from` towards `to` at `progress` in [0, 1].
///
/// Fails only when neither side has any stops.
pub fn interpolate(
    from: &ParsedGradient,
    to: &ParsedGradient,
    progress: f64,
    alignment: StopAlignment,
) -> Result<ParsedGradient, GradientError> {
    let (a, b) = normalize(from, to)?;

    let a_lengths = fair_share_lengths(&a.stops);
    let b_lengths = fair_share_lengths(&b.stops);
    let (a_len, b_len) = (a.stops.len(), b.stops.len());
    let count = a_len.max(b_len);

    let mut stops = Vec::with_capacity(count);
    for i in 0..count {
        let (ia, ib) = match alignment {
            StopAlignment::End => (i.min(a_len - 1), i.min(b_len - 1)),
            StopAlignment::Start => (a_len.saturating_sub(i + 1), b_len.saturating_sub(i + 1)),
        };
        let color = a.stops[ia].color.interpolate(&b.stops[ib].color, progress);
        let length = match (a.stops[ia].length, b.stops[ib].length) {
            (None, None) => None,
            // An unpositioned source stop keeps its `None` at the start.
            (None, Some(_)) if progress <= 0.0 => None,
            _ => match (a_lengths[ia], b_lengths[ib]) {
                (Some(x), Some(y)) => Some(x.interpolate(&y, progress)),
                (_, y) => y,
            },
        };
        stops.push(ColorStop::new(color, length));
    }
    if alignment == StopAlignment::Start {
        stops.reverse();
    }

    Ok(ParsedGradient::Gradient(Gradient {
        kind: b.kind,
        orientation: a.orientation.interpolate(&b.orientation, progress),
        stops,
    }))
}

/// Replace an empty side with a transparent copy of the other.
fn normalize<'a>(
    from: &'a ParsedGradient,
    to: &'a ParsedGradient,
) -> Result<(Cow<'a, Gradient>, Cow<'a, Gradient>), GradientError> {
    let usable = |g: &'a ParsedGradient| g.as_gradient().filter(|g| !g.stops.is_empty());
    match (usable(from), usable(to)) {
        (Some(a), Some(b)) => Ok((Cow::Borrowed(a), Cow::Borrowed(b))),
        (Some(a), None) => Ok((Cow::Borrowed(a), Cow::Owned(transparent_copy(a)))),
        (None, Some(b)) => Ok((Cow::Owned(transparent_copy(b)), Cow::Borrowed(b))),
        (None, None) => Err(GradientError::NothingToInterpolate),
    }
}

fn transparent_copy(template: &Gradient) -> Gradient {
    Gradient {
        kind: template.kind,
        orientation: template.orientation,
        stops: template
            .stops
            .iter()
            .map(|stop| ColorStop::new(Rgba::TRANSPARENT, stop.length))
            .collect(),
    }
}

/// Stop positions with unset interior stops spread evenly between their
/// nearest positioned neighbours. Gaps bounded by different units stay unset.
fn fair_share_lengths(stops: &[ColorStop]) -> Vec<Option<Length>> {
    let mut lengths: Vec<Option<Length>> = stops.iter().map(|s| s.length).collect();
    let known: Vec<usize> = (0..stops.len()).filter(|&i| stops[i].length.is_some()).collect();

    for pair in known.windows(2) {
        let (l, r) = (pair[0], pair[1]);
        if r - l < 2 {
            continue;
        }
        let (Some(left), Some(right)) = (stops[l].length, stops[r].length) else {
            continue;
        };
        if left.unit != right.unit {
            continue;
        }
        let span = (r - l) as f64;
        for (k, slot) in lengths.iter_mut().enumerate().take(r).skip(l + 1) {
            let share = (k - l) as f64 / span;
            *slot = Some(Length {
                unit: left.unit,
                value: lerp(left.value, right.value, share),
            });
        }
    }
    lengths
}
