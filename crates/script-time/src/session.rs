// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Timing session
//!
//! A [`Session`] captures its start time on construction. The end time is a
//! lazy snapshot: the first report that needs it triggers it, and it stays
//! fixed until [`Session::trigger_end`] is called again.
//!
//! ## Lifecycle
//!
//! ```text
//!   build ──► NotEnded ──trigger_end / first report──► Ended
//!                                                       │  ▲
//!                                                       └──┘ trigger_end (overwrite)
//! ```
//!
//! ## Example
//!
//! ```
//! use script_time::Session;
//!
//! let mut session = Session::new(false);
//! // ... work ...
//! let elapsed = session.report_elapsed();
//! assert!(!elapsed.is_empty());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::error::{ScriptTimeError, ScriptTimeResult};
use crate::format::format_duration;
use crate::profiling::ProfileStore;
use crate::sink::{OutputSink, StdoutSink};

/// End-of-session snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndSnapshot {
    /// Monotonic reading at the end trigger (seconds)
    pub end_time: f64,
    /// Calendar time at the end trigger
    pub wall_clock_end: NaiveDateTime,
    /// `end_time - reference_time` (seconds)
    pub elapsed: f64,
}

/// Whether the session end has been captured
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EndState {
    #[default]
    NotEnded,
    Ended(EndSnapshot),
}

/// Elapsed-time and profiling session for one program run
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) clock: Rc<dyn Clock>,
    sink: Box<dyn OutputSink>,
    reference_time: f64,
    wall_clock_start: NaiveDateTime,
    end: EndState,
    pub(crate) profiles: Rc<RefCell<ProfileStore>>,
}

impl Session {
    /// Start a session on the system clock, printing to stdout
    pub fn new(profile: bool) -> Self {
        Self::start(
            SessionConfig::new(profile),
            Rc::new(SystemClock::new()),
            Box::new(StdoutSink),
        )
    }

    /// Builder for sessions with custom config, clock or sink
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    fn start(config: SessionConfig, clock: Rc<dyn Clock>, sink: Box<dyn OutputSink>) -> Self {
        let reference_time = clock.monotonic_now();
        let wall_clock_start = clock.calendar_now();

        tracing::debug!(profile = config.profile, "Timing session started at {}", wall_clock_start);

        Self {
            config,
            clock,
            sink,
            reference_time,
            wall_clock_start,
            end: EndState::NotEnded,
            profiles: Rc::new(RefCell::new(ProfileStore::new())),
        }
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Monotonic reading captured at construction (seconds)
    pub fn reference_time(&self) -> f64 {
        self.reference_time
    }

    /// Calendar time captured at construction
    pub fn start_time(&self) -> NaiveDateTime {
        self.wall_clock_start
    }

    /// Current end state
    pub fn end_state(&self) -> EndState {
        self.end
    }

    /// Whether the end time has been captured
    pub fn is_ended(&self) -> bool {
        matches!(self.end, EndState::Ended(_))
    }

    /// Calendar time of the end trigger, if it has happened
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        match self.end {
            EndState::Ended(snapshot) => Some(snapshot.wall_clock_end),
            EndState::NotEnded => None,
        }
    }

    /// Capture the end time now, overwriting any previous end
    pub fn trigger_end(&mut self) -> EndSnapshot {
        let end_time = self.clock.monotonic_now();
        let snapshot = EndSnapshot {
            end_time,
            wall_clock_end: self.clock.calendar_now(),
            elapsed: end_time - self.reference_time,
        };

        tracing::debug!(elapsed = snapshot.elapsed, "Timing session end triggered");

        self.end = EndState::Ended(snapshot);
        snapshot
    }

    /// The end snapshot, triggering it first if the session has not ended
    fn ensure_ended(&mut self) -> EndSnapshot {
        match self.end {
            EndState::Ended(snapshot) => snapshot,
            EndState::NotEnded => self.trigger_end(),
        }
    }

    /// Elapsed seconds between start and end
    pub fn elapsed(&mut self) -> f64 {
        self.ensure_ended().elapsed
    }

    fn format_time(&self, time: NaiveDateTime) -> String {
        time.format(&self.config.time_format).to_string()
    }

    /// Formatted calendar start time
    pub fn report_start(&self) -> String {
        self.format_time(self.wall_clock_start)
    }

    /// Formatted elapsed time
    pub fn report_elapsed(&mut self) -> String {
        format_duration(self.elapsed())
    }

    /// Formatted end time with the elapsed time, e.g. `03:04:05 PM (elapsed: 1.500 s)`
    pub fn report_end(&mut self) -> String {
        let snapshot = self.ensure_ended();
        format!(
            "{} (elapsed: {})",
            self.format_time(snapshot.wall_clock_end),
            format_duration(snapshot.elapsed)
        )
    }

    /// Formatted average time of one of `iterations` iterations
    ///
    /// Returns `InvalidArgument` when `iterations` is zero.
    pub fn report_per_iteration(&mut self, iterations: u64) -> ScriptTimeResult<String> {
        if iterations == 0 {
            return Err(ScriptTimeError::InvalidArgument(
                "iteration count must be greater than zero".to_string(),
            ));
        }

        Ok(format_duration(self.elapsed() / iterations as f64))
    }

    pub(crate) fn write_line(&mut self, line: &str) -> ScriptTimeResult<()> {
        self.sink.write_line(line)?;
        Ok(())
    }

    /// Write `Start time: ...` to the output sink
    pub fn print_start(&mut self) -> ScriptTimeResult<()> {
        let line = format!("Start time: {}", self.report_start());
        self.write_line(&line)
    }

    /// Write `Elapsed time: ...` to the output sink
    pub fn print_elapsed(&mut self) -> ScriptTimeResult<()> {
        let line = format!("Elapsed time: {}", self.report_elapsed());
        self.write_line(&line)
    }

    /// Write `End time: ... (elapsed: ...)` to the output sink
    pub fn print_end(&mut self) -> ScriptTimeResult<()> {
        let line = format!("End time: {}", self.report_end());
        self.write_line(&line)
    }

    /// Write `Average time per iteration: ...` to the output sink
    pub fn print_per_iteration(&mut self, iterations: u64) -> ScriptTimeResult<()> {
        let line = format!(
            "Average time per iteration: {}",
            self.report_per_iteration(iterations)?
        );
        self.write_line(&line)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session started at {}", self.report_start())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("reference_time", &self.reference_time)
            .field("wall_clock_start", &self.wall_clock_start)
            .field("end", &self.end)
            .field("profiles", &self.profiles.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Session`]
#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    clock: Option<Rc<dyn Clock>>,
    sink: Option<Box<dyn OutputSink>>,
}

impl SessionBuilder {
    /// Enable or disable profiling
    pub fn profile(mut self, profile: bool) -> Self {
        self.config.profile = profile;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `clock` instead of the system clock
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Rc::new(clock));
        self
    }

    /// Send printed reports to `sink` instead of stdout
    pub fn sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validate the configuration and start the session
    pub fn build(self) -> ScriptTimeResult<Session> {
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Rc::new(SystemClock::new()));
        let sink = self.sink.unwrap_or_else(|| Box::new(StdoutSink));
        Ok(Session::start(self.config, clock, sink))
    }
}
