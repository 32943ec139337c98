//! Viewer tuning: scale extent, fit padding, and timing.
//!
//! Values come from `VIEWER_*` keys (environment or any key lookup) or from a JSON
//! object; every field is optional and defaults to the constants in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_FIT_PADDING, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_SETTLE_MS,
    DEFAULT_WHEEL_SENSITIVITY,
};
use crate::transform::ScaleRange;

/// Error returned when a configuration is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid scale range: min {min} must be positive and below max {max}")]
    ScaleRange { min: f64, max: f64 },
    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("malformed viewer config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub fit_padding: f64,
    pub debounce_ms: f64,
    pub settle_ms: f64,
    pub wheel_sensitivity: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            fit_padding: DEFAULT_FIT_PADDING,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        }
    }
}

impl ViewerConfig {
    /// Build config from `VIEWER_*` keys resolved through `lookup`.
    ///
    /// Optional:
    /// - `VIEWER_MIN_SCALE`: default 0.1
    /// - `VIEWER_MAX_SCALE`: default 5.0
    /// - `VIEWER_FIT_PADDING`: default 10
    /// - `VIEWER_DEBOUNCE_MS`: default 600
    /// - `VIEWER_SETTLE_MS`: default 400
    /// - `VIEWER_WHEEL_SENSITIVITY`: default 0.002
    ///
    /// Unparseable values fall back to their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the resulting values are inconsistent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            min_scale: lookup_parse(&lookup, "VIEWER_MIN_SCALE", DEFAULT_MIN_SCALE),
            max_scale: lookup_parse(&lookup, "VIEWER_MAX_SCALE", DEFAULT_MAX_SCALE),
            fit_padding: lookup_parse(&lookup, "VIEWER_FIT_PADDING", DEFAULT_FIT_PADDING),
            debounce_ms: lookup_parse(&lookup, "VIEWER_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            settle_ms: lookup_parse(&lookup, "VIEWER_SETTLE_MS", DEFAULT_SETTLE_MS),
            wheel_sensitivity: lookup_parse(&lookup, "VIEWER_WHEEL_SENSITIVITY", DEFAULT_WHEEL_SENSITIVITY),
        };
        config.validate()
    }

    /// Build config from process environment variables.
    ///
    /// # Errors
    ///
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(v) => Some(v),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                log::warn!("config: ignoring {key}: {e}");
                None
            }
        })
    }

    /// Parse a JSON object such as `{"max_scale": 8, "debounce_ms": 300}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown fields, and the
    /// validation errors of [`Self::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let range_ok = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale < self.max_scale;
        if !range_ok {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if !(self.fit_padding.is_finite() && self.fit_padding >= 0.0) {
            return Err(ConfigError::Negative { field: "fit_padding", value: self.fit_padding });
        }
        for (field, value) in [
            ("debounce_ms", self.debounce_ms),
            ("settle_ms", self.settle_ms),
            ("wheel_sensitivity", self.wheel_sensitivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn scale_range(&self) -> ScaleRange {
        ScaleRange::new(self.min_scale, self.max_scale)
    }
}

fn lookup_parse<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            log::warn!("config: ignoring unparseable {key}={raw:?}: {e}");
            default
        }
    }
}
