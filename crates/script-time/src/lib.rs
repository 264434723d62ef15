// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # script-time
//!
//! Elapsed-time tracking and lightweight function profiling for scripts.
//!
//! ## Overview
//!
//! - [`format_duration`]: seconds to a human-readable string, choosing hours,
//!   minutes, seconds, milliseconds, microseconds or nanoseconds by magnitude
//! - [`Session`]: records a start time, lazily snapshots an end time, and
//!   reports elapsed and per-iteration time
//! - Profiling: [`Session::wrap`] times calls of a function into a named
//!   bucket; [`Session::report_profiles`] summarizes mean, standard deviation,
//!   max and min per function
//!
//! Clocks and the output sink are injected through [`SessionBuilder`], so a
//! test can drive a session with a fake clock and capture its printed output.
//!
//! ## Usage
//!
//! ```
//! use script_time::Session;
//!
//! let mut session = Session::new(true);
//! let mut step = session.wrap("step", |x: u64| x + 1);
//!
//! let mut x = 0;
//! for _ in 0..5 {
//!     x = step(x);
//! }
//!
//! let table = session.report_profiles();
//! assert!(table.contains("step"));
//! println!("elapsed: {}", session.report_elapsed());
//! ```
//!
//! A session and its wrappers share state through `Rc` and stay on the
//! thread that created them.

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod profiling;
pub mod session;
pub mod sink;

// Re-exports
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, SessionConfig};
pub use error::{ScriptTimeError, ScriptTimeResult};
pub use format::{DurationUnit, format_duration, format_std_duration};
pub use profiling::{ProfileRecord, ProfileReport, ProfileScope, ProfileStats, ProfileStore};
pub use session::{EndSnapshot, EndState, Session, SessionBuilder};
pub use sink::{OutputSink, StdoutSink, WriterSink};
