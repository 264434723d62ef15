// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Call timing for profiled functions
//!
//! # Example
//!
//! ```
//! use script_time::Session;
//!
//! let session = Session::new(true);
//! {
//!     let _scope = session.scope("load_input");
//!     // ... do work ...
//! } // Elapsed time is recorded when the scope is dropped
//!
//! assert_eq!(session.profile("load_input").unwrap().call_count(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::stats::ProfileStore;
use crate::clock::Clock;

/// Times calls and records them under one name in a session's profile store
#[derive(Clone)]
pub(crate) struct Recorder {
    name: String,
    clock: Rc<dyn Clock>,
    store: Rc<RefCell<ProfileStore>>,
}

impl Recorder {
    pub(crate) fn new(name: String, clock: Rc<dyn Clock>, store: Rc<RefCell<ProfileStore>>) -> Self {
        Self { name, clock, store }
    }

    /// Run `f`, recording its duration once it returns
    pub(crate) fn time<R>(&self, f: impl FnOnce() -> R) -> R {
        let start = self.clock.monotonic_now();
        let result = f();
        self.record_since(start);
        result
    }

    /// Run `f`, recording its duration only if it returns `Ok`
    pub(crate) fn time_ok<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let start = self.clock.monotonic_now();
        let result = f()?;
        self.record_since(start);
        Ok(result)
    }

    fn now(&self) -> f64 {
        self.clock.monotonic_now()
    }

    fn record_since(&self, start: f64) {
        let duration = self.now() - start;
        self.store.borrow_mut().record(&self.name, duration);
    }
}

/// A scoped timer that records into the session's profiles
///
/// Records the elapsed time under its name when dropped. Nothing is recorded
/// if the scope is dropped during a panic, if [`discard`](Self::discard) is
/// called, or if the session was built with profiling disabled.
#[must_use = "the scope records its duration when dropped"]
pub struct ProfileScope {
    recorder: Option<Recorder>,
    start: f64,
}

impl ProfileScope {
    pub(crate) fn new(recorder: Option<Recorder>) -> Self {
        let start = recorder.as_ref().map_or(0.0, Recorder::now);
        Self { recorder, start }
    }

    /// Drop the scope without recording, e.g. when the timed work failed
    pub fn discard(mut self) {
        self.recorder = None;
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(recorder) = &self.recorder {
            recorder.record_since(self.start);
        }
    }
}
