#![forbid(unsafe_code)]

//! Gesture configuration.
//!
//! [`TouchpadConfig`] groups the tunables the gesture core consults. With the
//! `config` feature it can be loaded from TOML or JSON at startup:
//!
//! ```toml
//! scroll_method = "two_finger"
//!
//! [gesture]
//! switch_timeout_ms = 100
//! ```
//!
//! ```rust,ignore
//! let config = TouchpadConfig::from_toml_file("tpad.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `TouchpadConfig::default()` uses a 100 ms finger-count switch timeout and
//! two-finger scrolling.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::device::ScrollMethod;

// Import logging macros (no-op when tracing feature is disabled).
#[cfg(all(feature = "config", feature = "tracing"))]
use crate::logging::debug;
#[cfg(all(feature = "config", not(feature = "tracing")))]
use crate::debug;

/// Default debounce window for finger-count switches mid-gesture.
pub const DEFAULT_GESTURE_SWITCH_TIMEOUT: Duration = Duration::from_millis(100);

/// Upper bound accepted by [`GestureConfig::validate`].
pub const MAX_GESTURE_SWITCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Gesture state machine tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GestureConfig {
    /// How long a new finger count must persist mid-gesture before the mode
    /// switches (default: 100ms).
    #[cfg_attr(
        feature = "config",
        serde(rename = "switch_timeout_ms", with = "duration_ms")
    )]
    pub switch_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            switch_timeout: DEFAULT_GESTURE_SWITCH_TIMEOUT,
        }
    }
}

impl GestureConfig {
    /// Returns a list of validation errors. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.switch_timeout.is_zero() {
            errors.push("gesture.switch_timeout_ms must be > 0".into());
        } else if self.switch_timeout > MAX_GESTURE_SWITCH_TIMEOUT {
            errors.push(format!(
                "gesture.switch_timeout_ms must be <= {}, got {}",
                MAX_GESTURE_SWITCH_TIMEOUT.as_millis(),
                self.switch_timeout.as_millis()
            ));
        }
        errors
    }
}

/// Top-level touchpad configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TouchpadConfig {
    /// Gesture state machine parameters.
    pub gesture: GestureConfig,
    /// Scroll method applied to new devices.
    pub scroll_method: ScrollMethod,
}

impl TouchpadConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(target: "tpad.config", path = %path.display(), "loading TOML config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(target: "tpad.config", path = %path.display(), "loading JSON config");
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.gesture.validate()
    }

    /// Consume the config, returning it only if it validates.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(feature = "config")]
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
