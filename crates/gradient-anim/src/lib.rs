//! Gradient transitions driven frame by frame.
//!
//! Browsers cannot transition `background-image` between gradients. This
//! crate does it by hand: a [`TransitionProvider`] tracks what an element is
//! animating from and to, [`interpolate`](interpolate::interpolate) blends the
//! two parsed gradients, and a [`GradientAnimator`] turns per-frame
//! observations into values for a custom property.
//!
//! # Example
//!
//! ```
//! use gradient_anim::{EasingCache, StopAlignment, TimeOptions, TransitionProvider};
//! use gradient_anim::easing::BezierPoints;
//! use gradient_model::ParseOptions;
//!
//! let mut cache = EasingCache::new();
//! let options = TimeOptions::new(1000.0, 0.0, BezierPoints::LINEAR);
//! let start = "linear-gradient(to right, red, blue)".parse().unwrap();
//! let mut provider = TransitionProvider::new("A", start, options, StopAlignment::End, &mut cache);
//!
//! provider
//!     .observe(
//!         0.0,
//!         "B",
//!         "linear-gradient(to right, blue, red)",
//!         &ParseOptions::default(),
//!         options,
//!         &mut cache,
//!     )
//!     .unwrap();
//! assert!(provider.is_active(500.0));
//! assert!(provider.current_css(500.0).unwrap().contains("rgba(128,0,128,1)"));
//! ```

pub mod animator;
pub mod easing;
pub mod error;
pub mod fingerprint;
pub mod interpolate;
pub mod timing;
pub mod transition;

pub use animator::{AttachOptions, ElementDescriptor, FrameInput, FrameOutput, GradientAnimator};
pub use easing::{BezierPoints, CubicBezier, EasingCache};
pub use error::{AnimError, TimingError};
pub use fingerprint::StyleFingerprint;
pub use interpolate::{interpolate, Interpolate, StopAlignment};
pub use timing::{TimeOptions, TransitionStyle};
pub use transition::{Endpoint, EndpointKey, Retarget, TransitionPhase, TransitionProvider};
