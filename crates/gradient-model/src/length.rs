//! Stop-position lengths.
//!
//! Only `px` and `%` survive parsing; `em` is multiplied out against the
//! element's font size so that later stages never see a font-relative unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GradientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%")]
    Percent,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

/// A unit-tagged length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub unit: LengthUnit,
    pub value: f64,
}

impl Length {
    pub const fn px(value: f64) -> Self {
        Self {
            unit: LengthUnit::Px,
            value,
        }
    }

    pub const fn percent(value: f64) -> Self {
        Self {
            unit: LengthUnit::Percent,
            value,
        }
    }

    /// A zero length carries no meaningful unit.
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Parse a `px`, `%` or `em` token. `em` resolves to px using `em_size`.
    pub fn parse(token: &str, em_size: f64) -> Result<Self> {
        let t = token.trim().to_ascii_lowercase();
        let (num, unit, scale) = if let Some(n) = t.strip_suffix('%') {
            (n, LengthUnit::Percent, 1.0)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, LengthUnit::Px, 1.0)
        } else if let Some(n) = t.strip_suffix("em") {
            if n.ends_with('r') {
                return Err(GradientError::InvalidLength(token.trim().to_string()));
            }
            (n, LengthUnit::Px, em_size)
        } else {
            return Err(GradientError::InvalidLength(token.trim().to_string()));
        };
        let value = num
            .trim()
            .parse::<f64>()
            .map_err(|_| GradientError::InvalidLength(token.trim().to_string()))?;
        Ok(Self {
            unit,
            value: value * scale,
        })
    }

    /// Returns true when the token has the shape of a length, without
    /// validating the number.
    pub fn looks_like_length(token: &str) -> bool {
        let t = token.trim();
        t.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}
