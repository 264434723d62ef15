// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for script-time
//!
//! This crate provides common testing components including:
//! - A manually driven clock for deterministic sessions
//! - A sink that captures printed report lines
//! - Assertions over formatted duration strings
//! - Fixture timestamps and duration samples

pub mod assertions;
pub mod capture_sink;
pub mod fixtures;
pub mod manual_clock;

// Re-exports for convenience
pub use assertions::{DurationAssertions, parse_duration};
pub use capture_sink::CaptureSink;
pub use fixtures::{fixed_calendar, sample_durations};
pub use manual_clock::ManualClock;
