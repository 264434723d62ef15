// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Session Configuration
//!
//! Settings fixed when a [`Session`](crate::Session) is built:
//! - whether wrapped functions are profiled
//! - the strftime pattern used to display calendar times
//!
//! Configuration can be assembled in code, read from a JSON settings payload,
//! or taken from the environment.
//!
//! ## Example
//!
//! ```rust
//! use script_time::SessionConfig;
//!
//! let config = SessionConfig::new(true).with_time_format("%H:%M:%S");
//! assert!(config.validate().is_ok());
//! ```

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use serde_json::Value;

/// Twelve-hour clock with AM/PM, e.g. `03:04:05 PM`
pub const DEFAULT_TIME_FORMAT: &str = "%I:%M:%S %p";

/// Environment variable enabling profiling
pub const PROFILE_ENV: &str = "SCRIPT_TIME_PROFILE";

/// Environment variable overriding the time format
pub const TIME_FORMAT_ENV: &str = "SCRIPT_TIME_FORMAT";

/// Key of the settings section read by [`SessionConfig::from_settings`]
const SETTINGS_KEY: &str = "scriptTime";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Record timings for wrapped functions
    pub profile: bool,

    /// strftime pattern for start and end times
    pub time_format: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the default time format
    pub fn new(profile: bool) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }

    /// Override the calendar time format
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Validate the configuration
    ///
    /// The time format must be non-empty and parse as a strftime pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_format.is_empty() {
            return Err(ConfigError::EmptyTimeFormat);
        }

        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimeFormat {
                format: self.time_format.clone(),
            });
        }

        Ok(())
    }

    /// Parse config from a JSON settings payload.
    ///
    /// Expected shape:
    /// {
    ///   "scriptTime": {
    ///     "profile": true,
    ///     "timeFormat": "%H:%M:%S"
    ///   }
    /// }
    ///
    /// Missing fields take their defaults. Returns `None` when the section is
    /// absent or malformed.
    pub fn from_settings(settings: &Value) -> Option<Self> {
        let section = settings.get(SETTINGS_KEY)?;
        match serde_json::from_value(section.clone()) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Ignoring malformed {} settings: {}", SETTINGS_KEY, err);
                None
            }
        }
    }

    /// Read [`PROFILE_ENV`] and [`TIME_FORMAT_ENV`] from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PROFILE_ENV) {
            match parse_flag(&raw) {
                Some(profile) => config.profile = profile,
                None => tracing::warn!("Ignoring {}={:?}: expected a boolean", PROFILE_ENV, raw),
            }
        }

        if let Some(format) = lookup(TIME_FORMAT_ENV) {
            config.time_format = format;
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Empty time format
    #[error("Time format must not be empty")]
    EmptyTimeFormat,

    /// Time format that chrono cannot parse
    #[error("Invalid time format: {format:?}")]
    InvalidTimeFormat { format: String },
}
