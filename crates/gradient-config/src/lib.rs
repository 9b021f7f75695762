//! Gradient transition configuration
//!
//! Settings are loaded from `gradient-transition.toml` and can be overridden
//! with environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "gradient-transition.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GradientConfig {
    /// Attach-time behavior
    pub attach: AttachConfig,
    /// Where blended values are written
    pub render: RenderConfig,
    /// Transition timing used when the host does not supply one
    pub timing: TimingConfig,
    /// Log filter settings
    pub logging: LoggingConfig,
}

/// Which end of the stop list is aligned when two gradients have a different
/// number of stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopDirection {
    /// Pair stops from the start; extra stops were appended at the end.
    #[default]
    End,
    /// Pair stops from the end; extra stops were inserted at the start.
    Start,
}

impl StopDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end" => Some(Self::End),
            "start" => Some(Self::Start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AttachConfig {
    pub direction: StopDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Custom property that receives the blended gradient on the wrapper
    pub custom_property: String,
    /// Marker class expected on watched wrapper elements
    pub wrapper_class: String,
    /// Class of the inner element whose background is animated
    pub render_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// CSS time value, e.g. `300ms` or `1s`
    pub duration: String,
    pub delay: String,
    /// CSS timing function, e.g. `ease` or `cubic-bezier(0.4, 0, 0.2, 1)`
    pub timing_function: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env filter directive
    pub filter: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            custom_property: "--gradient-transition".to_string(),
            wrapper_class: "gt-wrapper".to_string(),
            render_class: "gt-render".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: "300ms".to_string(),
            delay: "0s".to_string(),
            timing_function: "ease".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl GradientConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location or return default
    /// configuration if the file is missing or invalid
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("GRADIENT_DIRECTION") {
            if let Some(direction) = StopDirection::parse(&val) {
                self.attach.direction = direction;
            }
        }
        if let Ok(prop) = std::env::var("GRADIENT_CUSTOM_PROPERTY") {
            self.render.custom_property = prop;
        }
        if let Ok(class) = std::env::var("GRADIENT_WRAPPER_CLASS") {
            self.render.wrapper_class = class;
        }
        if let Ok(class) = std::env::var("GRADIENT_RENDER_CLASS") {
            self.render.render_class = class;
        }
        if let Ok(filter) = std::env::var("GRADIENT_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Load from `gradient-transition.toml` (or defaults), then apply
    /// environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
