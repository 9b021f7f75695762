//! Frame driver for watched elements.
//!
//! The `GradientAnimator` keeps one [`TransitionProvider`] per attached
//! element. The host calls [`GradientAnimator::frame`] at least once per
//! visible frame with the element's current background value, its
//! fingerprint key and its timing. Each call returns what to write:
//! - [`FrameOutput::Render`]: set the custom property on the wrapper and hide
//!   the render target's own background.
//! - [`FrameOutput::Clear`]: remove both overrides.
//!
//! # Usage
//!
//! ```
//! use gradient_anim::animator::{
//!     AttachOptions, ElementDescriptor, FrameInput, FrameOutput, GradientAnimator,
//! };
//! use gradient_anim::timing::TimeOptions;
//!
//! let mut animator = GradientAnimator::new();
//! let card = ElementDescriptor::new("card")
//!     .with_class("gt-wrapper")
//!     .with_render_target("card-bg");
//! animator.attach(card, AttachOptions::default()).unwrap();
//!
//! let input = FrameInput {
//!     time_ms: 0.0,
//!     raw_value: "linear-gradient(red, blue)",
//!     key: "rest",
//!     em_size: 16.0,
//!     time_options: TimeOptions::default(),
//! };
//! let output = animator.frame("card", &input).unwrap();
//! assert!(matches!(output, FrameOutput::Clear { .. }));
//! ```

use std::collections::HashMap;

use gradient_config::{GradientConfig, RenderConfig, StopDirection};
use gradient_model::{parse, stringify, ParseOptions, ParsedGradient};
use serde::Serialize;
use tracing::{debug, warn};

use crate::easing::EasingCache;
use crate::error::AnimError;
use crate::interpolate::StopAlignment;
use crate::timing::TimeOptions;
use crate::transition::TransitionProvider;

/// What the host knows about an element it wants animated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDescriptor {
    pub id: String,
    pub classes: Vec<String>,
    /// Id of the inner element whose background is replaced.
    pub render_target: Option<String>,
}

impl ElementDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_render_target(mut self, target: impl Into<String>) -> Self {
        self.render_target = Some(target.into());
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachOptions {
    pub direction: StopDirection,
}

impl From<&GradientConfig> for AttachOptions {
    fn from(config: &GradientConfig) -> Self {
        Self {
            direction: config.attach.direction,
        }
    }
}

/// Per-frame observation of one element.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub time_ms: f64,
    /// Computed `background-image` of the render target.
    pub raw_value: &'a str,
    /// Changes whenever the value may have changed.
    pub key: &'a str,
    pub em_size: f64,
    pub time_options: TimeOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FrameOutput {
    Render { property: String, value: String },
    Clear { property: String },
}

#[derive(Debug)]
struct WatchedElement {
    descriptor: ElementDescriptor,
    options: AttachOptions,
    provider: Option<TransitionProvider>,
}

/// Owns every attached element's transition state and the shared easing cache.
#[derive(Debug)]
pub struct GradientAnimator {
    elements: HashMap<String, WatchedElement>,
    easing: EasingCache,
    render: RenderConfig,
}

impl Default for GradientAnimator {
    fn default() -> Self {
        Self::with_render_config(RenderConfig::default())
    }
}

impl GradientAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_config(render: RenderConfig) -> Self {
        Self {
            elements: HashMap::new(),
            easing: EasingCache::new(),
            render,
        }
    }

    pub fn from_config(config: &GradientConfig) -> Self {
        Self::with_render_config(config.render.clone())
    }

    /// Start watching an element. Re-attaching an id replaces its state.
    pub fn attach(
        &mut self,
        element: ElementDescriptor,
        options: AttachOptions,
    ) -> Result<(), AnimError> {
        self.check_attachable(&element)?;
        debug!(element = %element.id, direction = ?options.direction, "attached");
        self.elements.insert(
            element.id.clone(),
            WatchedElement {
                descriptor: element,
                options,
                provider: None,
            },
        );
        Ok(())
    }

    /// Attach several elements, or none of them if any is rejected.
    pub fn attach_all(
        &mut self,
        elements: Vec<ElementDescriptor>,
        options: AttachOptions,
    ) -> Result<usize, AnimError> {
        if let Some(missing) = elements.iter().find(|e| e.render_target.is_none()) {
            return Err(AnimError::MissingRenderTarget(missing.id.clone()));
        }
        let count = elements.len();
        for element in elements {
            self.attach(element, options)?;
        }
        Ok(count)
    }

    fn check_attachable(&self, element: &ElementDescriptor) -> Result<(), AnimError> {
        if element.render_target.is_none() {
            return Err(AnimError::MissingRenderTarget(element.id.clone()));
        }
        if !element.has_class(&self.render.wrapper_class) {
            warn!(
                element = %element.id,
                class = %self.render.wrapper_class,
                "watched element is missing the wrapper class"
            );
        }
        Ok(())
    }

    /// Stop watching an element. Returns false if it was not attached.
    pub fn detach(&mut self, id: &str) -> bool {
        let removed = self.elements.remove(id).is_some();
        if removed {
            debug!(element = id, "detached");
        }
        removed
    }

    /// Detach everything.
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    /// Advance one element to `input.time_ms`.
    pub fn frame(&mut self, id: &str, input: &FrameInput<'_>) -> Result<FrameOutput, AnimError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| AnimError::UnknownElement(id.to_string()))?;
        let parse_options = ParseOptions {
            em_size: input.em_size,
        };

        let is_new = element.provider.is_none();
        let easing = &mut self.easing;
        let alignment: StopAlignment = element.options.direction.into();
        let provider = element.provider.get_or_insert_with(|| {
            let value = parse(input.raw_value, &parse_options).unwrap_or_else(|err| {
                warn!(element = id, error = %err, "initial background is not a gradient");
                ParsedGradient::None
            });
            TransitionProvider::new(input.key, value, input.time_options, alignment, easing)
        });

        if !is_new {
            match provider.observe(
                input.time_ms,
                input.key,
                input.raw_value,
                &parse_options,
                input.time_options,
                easing,
            ) {
                Ok(_) => {}
                Err(err) if err.is_recoverable() => {
                    // Adopt the key as `none` so the same value is not parsed again.
                    warn!(
                        element = id,
                        error = %err,
                        "background is not a gradient, fading to none"
                    );
                    provider.observe_parsed(
                        input.time_ms,
                        input.key,
                        ParsedGradient::None,
                        input.time_options,
                        easing,
                    )?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        let property = self.render.custom_property.clone();
        if !provider.is_active(input.time_ms) {
            return Ok(FrameOutput::Clear { property });
        }
        match provider.current_value(input.time_ms)? {
            ParsedGradient::None => Ok(FrameOutput::Clear { property }),
            value => Ok(FrameOutput::Render {
                property,
                value: stringify(&value)?,
            }),
        }
    }

    /// Advance several elements, collecting each result.
    pub fn frame_all<'a, I>(&mut self, inputs: I) -> Vec<(String, Result<FrameOutput, AnimError>)>
    where
        I: IntoIterator<Item = (&'a str, FrameInput<'a>)>,
    {
        inputs
            .into_iter()
            .map(|(id, input)| (id.to_string(), self.frame(id, &input)))
            .collect()
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn descriptor(&self, id: &str) -> Option<&ElementDescriptor> {
        self.elements.get(id).map(|e| &e.descriptor)
    }

    pub fn provider(&self, id: &str) -> Option<&TransitionProvider> {
        self.elements.get(id).and_then(|e| e.provider.as_ref())
    }

    pub fn easing_cache(&self) -> &EasingCache {
        &self.easing
    }
}
