//! Transition timing read from computed `transition-*` properties.

use serde::{Deserialize, Serialize};

use crate::easing::BezierPoints;
use crate::error::TimingError;

/// Properties whose transition entry applies to `background-image`.
const TRANSITION_TARGETS: [&str; 2] = ["all", "background-image"];

/// Resolved timing for one transition: curve, duration and delay in ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeOptions {
    pub easing: BezierPoints,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            easing: BezierPoints::EASE,
            duration_ms: 0.0,
            delay_ms: 0.0,
        }
    }
}

/// The four computed `transition-*` longhands of an element, as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionStyle {
    pub property: String,
    pub duration: String,
    pub delay: String,
    pub timing_function: String,
}

impl TransitionStyle {
    pub fn new(
        property: impl Into<String>,
        duration: impl Into<String>,
        delay: impl Into<String>,
        timing_function: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            duration: duration.into(),
            delay: delay.into(),
            timing_function: timing_function.into(),
        }
    }
}

impl TimeOptions {
    pub fn new(duration_ms: f64, delay_ms: f64, easing: BezierPoints) -> Self {
        Self {
            easing,
            duration_ms,
            delay_ms,
        }
    }

    /// Build options from scalar config strings such as `"300ms"`, `"0s"`, `"ease"`.
    pub fn parse(duration: &str, delay: &str, timing_function: &str) -> Result<Self, TimingError> {
        let duration_ms = parse_time(duration)?;
        if duration_ms < 0.0 {
            return Err(TimingError::InvalidTime(duration.trim().to_string()));
        }
        Ok(Self {
            easing: BezierPoints::parse(timing_function)?,
            duration_ms,
            delay_ms: parse_time(delay)?,
        })
    }

    /// Pick the entry that governs `background-image` out of comma lists.
    ///
    /// The last `all` or `background-image` entry of `transition-property`
    /// wins. Shorter duration, delay and timing lists repeat to cover it.
    /// Without a matching property the transition is instant.
    pub fn from_transition_style(style: &TransitionStyle) -> Result<Self, TimingError> {
        let properties = split_list(&style.property);
        let Some(index) = properties
            .iter()
            .rposition(|p| TRANSITION_TARGETS.contains(p))
        else {
            return Ok(Self::default());
        };

        let duration = pick(&style.duration, index).unwrap_or("0s");
        let delay = pick(&style.delay, index).unwrap_or("0s");
        let timing = pick(&style.timing_function, index).unwrap_or("ease");
        Self::parse(duration, delay, timing)
    }
}

/// `<number>ms` or `<number>s` to milliseconds.
pub fn parse_time(value: &str) -> Result<f64, TimingError> {
    let v = value.trim();
    let invalid = || TimingError::InvalidTime(v.to_string());
    let (number, scale) = if let Some(n) = v.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = v.strip_suffix('s') {
        (n, 1000.0)
    } else {
        return Err(invalid());
    };
    let n: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !n.is_finite() {
        return Err(invalid());
    }
    Ok(n * scale)
}

fn pick(list: &str, index: usize) -> Option<&str> {
    let items = split_list(list);
    if items.is_empty() {
        return None;
    }
    Some(items[index % items.len()])
}

/// Split at commas outside parentheses, trimming each item.
fn split_list(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(list[start..].trim());
    items.retain(|item| !item.is_empty());
    items
}
