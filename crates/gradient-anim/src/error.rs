//! Error types for timing parsing and the frame driver.

use gradient_model::GradientError;
use thiserror::Error;

/// Errors raised while reading CSS transition timing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimingError {
    /// A duration or delay that is not `<number>ms` or `<number>s`.
    #[error("invalid time value `{0}`")]
    InvalidTime(String),

    /// Timing functions other than the bezier presets and `cubic-bezier()`.
    #[error("unsupported timing function `{0}`")]
    UnsupportedTimingFunction(String),

    /// A `cubic-bezier()` with the wrong arity or out-of-range x values.
    #[error("invalid cubic-bezier `{input}`: {reason}")]
    InvalidBezier { input: String, reason: &'static str },
}

/// Errors surfaced by [`GradientAnimator`](crate::animator::GradientAnimator).
#[derive(Error, Debug)]
pub enum AnimError {
    /// The watched element has no inner element to render into.
    #[error("element `{0}` has no render target child; attach rejected")]
    MissingRenderTarget(String),

    /// A frame was requested for an element that is not attached.
    #[error("element `{0}` is not attached")]
    UnknownElement(String),

    #[error(transparent)]
    Gradient(#[from] GradientError),

    #[error(transparent)]
    Timing(#[from] TimingError),
}
