//! Per-element transition state.
//!
//! A [`TransitionProvider`] holds the endpoint being animated from and the one
//! being animated to. Every observation carries a key identifying the value
//! the host currently wants; a new key starts a transition from whatever is
//! on screen at that moment, so interrupting a transition never jumps.
//!
//! # Retargeting
//!
//! How an interrupted transition continues depends on where it is heading:
//!
//! - [`Retarget::Settled`]: the previous transition had finished.
//! - [`Retarget::Reversing`]: the new key is the one we were leaving. The
//!   reverse runs only for the time already spent, like CSS reversing.
//! - [`Retarget::Redirected`]: a third value interrupted. The captured blend
//!   gets an [`EndpointKey::Intermediate`] key that no observation can match.

use std::sync::Arc;

use gradient_model::{parse, stringify, GradientError, ParseOptions, ParsedGradient};
use serde::Serialize;
use tracing::{debug, trace};

use crate::easing::{CubicBezier, EasingCache};
use crate::interpolate::{interpolate, StopAlignment};
use crate::timing::TimeOptions;

/// Identity of a transition endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndpointKey {
    /// A value the host observed under this key.
    Settled { key: String },
    /// A blend captured mid-flight while leaving `from`.
    Intermediate { from: String, generation: u64 },
}

impl EndpointKey {
    pub fn settled(key: impl Into<String>) -> Self {
        Self::Settled { key: key.into() }
    }

    /// True only for a settled endpoint observed under `key`.
    pub fn matches(&self, key: &str) -> bool {
        matches!(self, Self::Settled { key: k } if k == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub key: EndpointKey,
    pub value: ParsedGradient,
}

/// How an observation with a new key relates to the running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Retarget {
    Settled,
    Reversing,
    Redirected,
}

/// Lifecycle of a provider at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// Nothing has been observed besides the initial value.
    Idle,
    /// A transition is scheduled but its delay has not elapsed.
    Pending,
    Transitioning,
    /// The last transition completed.
    AtRest,
}

/// Transition state for one element.
#[derive(Debug, Clone)]
pub struct TransitionProvider {
    prev: Option<Endpoint>,
    next: Endpoint,
    start_time: f64,
    duration_sub: f64,
    /// Progress reached 1; stays pinned until the next observation.
    settled: bool,
    time_options: TimeOptions,
    easing: Arc<CubicBezier>,
    alignment: StopAlignment,
    generation: u64,
}

impl TransitionProvider {
    /// Create a provider resting on `value`.
    pub fn new(
        key: impl Into<String>,
        value: ParsedGradient,
        time_options: TimeOptions,
        alignment: StopAlignment,
        cache: &mut EasingCache,
    ) -> Self {
        Self {
            prev: None,
            next: Endpoint {
                key: EndpointKey::settled(key),
                value,
            },
            start_time: 0.0,
            duration_sub: 0.0,
            settled: true,
            easing: cache.resolve(time_options.easing),
            time_options,
            alignment,
            generation: 0,
        }
    }

    /// Parse `raw` and observe it under `key`.
    ///
    /// Nothing is parsed while `key` matches the current target. A parse
    /// failure leaves the state untouched.
    pub fn observe(
        &mut self,
        time: f64,
        key: &str,
        raw: &str,
        options: &ParseOptions,
        time_options: TimeOptions,
        cache: &mut EasingCache,
    ) -> Result<Option<Retarget>, GradientError> {
        if self.next.key.matches(key) {
            return Ok(None);
        }
        let value = parse(raw, options)?;
        self.observe_parsed(time, key, value, time_options, cache)
    }

    /// Observe an already parsed value under `key`.
    pub fn observe_parsed(
        &mut self,
        time: f64,
        key: &str,
        value: ParsedGradient,
        time_options: TimeOptions,
        cache: &mut EasingCache,
    ) -> Result<Option<Retarget>, GradientError> {
        if self.next.key.matches(key) {
            return Ok(None);
        }

        let progress = self.progress(time);
        let retarget = if progress >= 1.0 {
            Retarget::Settled
        } else if self.prev.as_ref().is_none_or(|prev| prev.key.matches(key)) {
            Retarget::Reversing
        } else {
            Retarget::Redirected
        };

        let prev_value = match retarget {
            Retarget::Settled => self.next.value.clone(),
            _ => self.value_at(progress)?,
        };

        let elapsed = time - self.start_time;
        self.duration_sub = match retarget {
            Retarget::Reversing if elapsed >= 0.0 => {
                self.time_options.duration_ms - elapsed - self.duration_sub
            }
            _ => 0.0,
        };

        let leaving = std::mem::replace(
            &mut self.next,
            Endpoint {
                key: EndpointKey::settled(key),
                value,
            },
        );
        let prev_key = match (retarget, leaving.key) {
            (Retarget::Redirected, EndpointKey::Settled { key: from }) => {
                self.generation += 1;
                EndpointKey::Intermediate {
                    from,
                    generation: self.generation,
                }
            }
            (_, key) => key,
        };
        self.prev = Some(Endpoint {
            key: prev_key,
            value: prev_value,
        });

        self.time_options = time_options;
        self.easing = cache.resolve(time_options.easing);
        self.start_time = time + time_options.delay_ms;
        self.settled = false;

        debug!(
            key,
            ?retarget,
            progress,
            duration_ms = self.effective_duration(),
            "gradient transition started"
        );
        Ok(Some(retarget))
    }

    /// Linear progress in [0, 1] at `time`.
    pub fn progress(&mut self, time: f64) -> f64 {
        if self.settled {
            return 1.0;
        }
        let elapsed = time - self.start_time;
        let duration = self.effective_duration();
        let progress = if duration > 0.0 {
            elapsed / duration
        } else if elapsed >= 0.0 {
            1.0
        } else {
            0.0
        };

        if progress >= 1.0 {
            self.settled = true;
            trace!(key = ?self.next.key, "gradient transition settled");
            1.0
        } else {
            progress.max(0.0)
        }
    }

    /// The value to render at `time`.
    pub fn current_value(&mut self, time: f64) -> Result<ParsedGradient, GradientError> {
        let progress = self.progress(time);
        self.value_at(progress)
    }

    /// [`current_value`](Self::current_value) in CSS form.
    pub fn current_css(&mut self, time: f64) -> Result<String, GradientError> {
        stringify(&self.current_value(time)?)
    }

    pub fn is_active(&mut self, time: f64) -> bool {
        self.progress(time) < 1.0
    }

    pub fn phase(&mut self, time: f64) -> TransitionPhase {
        if self.prev.is_none() {
            TransitionPhase::Idle
        } else if self.progress(time) >= 1.0 {
            TransitionPhase::AtRest
        } else if time < self.start_time {
            TransitionPhase::Pending
        } else {
            TransitionPhase::Transitioning
        }
    }

    pub fn prev(&self) -> Option<&Endpoint> {
        self.prev.as_ref()
    }

    pub fn next(&self) -> &Endpoint {
        &self.next
    }

    pub fn time_options(&self) -> &TimeOptions {
        &self.time_options
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration_sub(&self) -> f64 {
        self.duration_sub
    }

    fn effective_duration(&self) -> f64 {
        self.time_options.duration_ms - self.duration_sub
    }

    fn value_at(&self, progress: f64) -> Result<ParsedGradient, GradientError> {
        let Some(prev) = &self.prev else {
            return Ok(self.next.value.clone());
        };
        if prev.value.is_none() && self.next.value.is_none() {
            return Ok(ParsedGradient::None);
        }
        interpolate(
            &prev.value,
            &self.next.value,
            self.easing.evaluate(progress),
            self.alignment,
        )
    }
}
