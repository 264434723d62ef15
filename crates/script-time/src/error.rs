// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for timing sessions
//!
//! This module defines the error types returned by [`Session`](crate::Session)
//! operations and profiling statistics.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for script-time operations
pub type ScriptTimeResult<T> = Result<T, ScriptTimeError>;

/// Errors that can occur while reporting timings
#[derive(Debug, Error)]
pub enum ScriptTimeError {
    /// A caller-supplied argument is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough samples were recorded to compute a statistic
    #[error("Insufficient data for '{name}': {samples} sample(s) recorded, at least 2 required")]
    InsufficientData { name: String, samples: usize },

    /// Writing a report to the output sink failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Session configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
