//! Error types for gradient parsing and serialization.

use thiserror::Error;

/// Result type for gradient model operations.
pub type Result<T> = std::result::Result<T, GradientError>;

/// Errors raised while parsing, serializing or blending gradients.
///
/// Parse errors describe bad external input and are recoverable: callers skip
/// the frame and keep their last good state. `StringifyNone` and
/// `NothingToInterpolate` indicate a logic bug in the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    /// The gradient text could not be parsed.
    #[error("malformed gradient `{input}`: {reason}")]
    Malformed { input: String, reason: String },

    /// The value does not contain a supported gradient function.
    #[error("no supported gradient function in `{0}`")]
    UnknownFunction(String),

    /// A color stop carried a color that could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A stop position or center coordinate was not a px/%/em length.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Angle units other than `deg` and `rad`.
    #[error("unsupported angle unit in `{0}` (only deg and rad are supported)")]
    UnsupportedAngleUnit(String),

    /// The `none` sentinel was passed where a displayable gradient is required.
    #[error("cannot stringify the `none` gradient")]
    StringifyNone,

    /// Both sides of an interpolation are empty.
    #[error("cannot interpolate two gradients without color stops")]
    NothingToInterpolate,
}

impl GradientError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by bad input text.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StringifyNone | Self::NothingToInterpolate)
    }
}
