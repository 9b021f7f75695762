//! Change-detection keys built from an element's style.
//!
//! The host rebuilds a fingerprint every frame; when the string differs from
//! the previous one the element's background may have changed and the
//! provider is asked to observe the new value.

use crate::timing::TimeOptions;

/// Always left out: toggled by the renderer itself.
const ALWAYS_EXCLUDED: &str = "display";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleFingerprint {
    excluded: Vec<String>,
    declared: Vec<String>,
    options: Vec<String>,
    rules: Vec<String>,
}

impl StyleFingerprint {
    /// Start a fingerprint that ignores `display` and `custom_property`.
    pub fn new(custom_property: &str) -> Self {
        Self {
            excluded: vec![ALWAYS_EXCLUDED.to_string(), custom_property.to_string()],
            ..Self::default()
        }
    }

    /// Record an inline declaration. Empty values and excluded properties
    /// are skipped.
    pub fn declared(mut self, property: &str, value: &str) -> Self {
        if !value.is_empty() && !self.excluded.iter().any(|p| p == property) {
            self.declared.push(value.to_string());
        }
        self
    }

    pub fn em_size(mut self, em_size: f64) -> Self {
        self.options.push(em_size.to_string());
        self
    }

    /// Record the easing signature, duration and delay.
    pub fn timing(mut self, options: &TimeOptions) -> Self {
        self.options.push(options.easing.signature());
        self.options.push(options.duration_ms.to_string());
        self.options.push(options.delay_ms.to_string());
        self
    }

    /// Record the text of a stylesheet rule matching the element.
    pub fn matched_rule(mut self, css_text: &str) -> Self {
        self.rules.push(css_text.to_string());
        self
    }

    /// Declared values, then options, then matched rules, as a JSON array.
    pub fn build(&self) -> String {
        let items: Vec<&str> = self
            .declared
            .iter()
            .chain(&self.options)
            .chain(&self.rules)
            .map(String::as_str)
            .collect();
        serde_json::Value::from(items).to_string()
    }
}
