// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function profiling
//!
//! A session built with profiling enabled hands out wrappers that time every
//! call of the wrapped function and record the duration under a name. With
//! profiling disabled the wrappers call straight through and record nothing.
//!
//! Wrapped functions take a single argument; pass a tuple for several.
//!
//! ```
//! use script_time::Session;
//!
//! let session = Session::new(true);
//! let mut add = session.wrap("add", |(a, b): (i32, i32)| a + b);
//!
//! assert_eq!(add((2, 3)), 5);
//! assert_eq!(session.profile("add").unwrap().call_count(), 1);
//! ```

mod stats;
mod timer;

pub use stats::{ProfileRecord, ProfileReport, ProfileStats, ProfileStore};
pub use timer::ProfileScope;

use timer::Recorder;

use crate::error::ScriptTimeResult;
use crate::session::Session;

impl Session {
    /// Whether wrapped functions record timings
    pub fn is_profiling(&self) -> bool {
        self.config.profile
    }

    fn recorder(&self, name: impl Into<String>) -> Option<Recorder> {
        self.is_profiling()
            .then(|| Recorder::new(name.into(), self.clock.clone(), self.profiles.clone()))
    }

    /// Wrap `f` so that each call is timed under `name`
    ///
    /// The wrapper returns `f`'s result unchanged. A call that panics is not
    /// recorded.
    pub fn wrap<A, R, F, N>(&self, name: N, mut f: F) -> impl FnMut(A) -> R + use<A, R, F, N>
    where
        F: FnMut(A) -> R,
        N: Into<String>,
    {
        let recorder = self.recorder(name);
        move |args| match &recorder {
            Some(recorder) => recorder.time(|| f(args)),
            None => f(args),
        }
    }

    /// Wrap a fallible `f`; only calls returning `Ok` are recorded
    ///
    /// Errors propagate to the caller unchanged.
    pub fn wrap_fallible<A, T, E, F, N>(
        &self,
        name: N,
        mut f: F,
    ) -> impl FnMut(A) -> Result<T, E> + use<A, T, E, F, N>
    where
        F: FnMut(A) -> Result<T, E>,
        N: Into<String>,
    {
        let recorder = self.recorder(name);
        move |args| match &recorder {
            Some(recorder) => recorder.time_ok(|| f(args)),
            None => f(args),
        }
    }

    /// Start a scope whose lifetime is recorded under `name`
    pub fn scope(&self, name: impl Into<String>) -> ProfileScope {
        ProfileScope::new(self.recorder(name))
    }

    /// Snapshot of the recorded profile data
    ///
    /// Later calls of wrapped functions do not show up in the snapshot.
    pub fn profiles(&self) -> ProfileStore {
        self.profiles.borrow().clone()
    }

    /// Snapshot of the record for `name`
    pub fn profile(&self, name: &str) -> Option<ProfileRecord> {
        self.profiles.borrow().get(name).cloned()
    }

    /// Statistics for every profiled function, in name order
    pub fn profile_stats(&self) -> Vec<ProfileStats> {
        self.profiles.borrow().stats()
    }

    /// Discard all profile data; the session's start and end are untouched
    pub fn clear_profiles(&self) {
        tracing::debug!("Clearing {} profile bucket(s)", self.profiles.borrow().len());
        self.profiles.borrow_mut().clear();
    }

    /// Render the profile table
    ///
    /// Functions called once show `N/A` for the standard deviation.
    pub fn report_profiles(&self) -> String {
        self.profiles.borrow().report().to_string()
    }

    /// Write the profile table to the output sink
    pub fn print_profiles(&mut self) -> ScriptTimeResult<()> {
        let report = self.report_profiles();
        for line in report.lines() {
            self.write_line(line)?;
        }
        Ok(())
    }
}

/// Wrap a named function, using its path as the profile name
///
/// # Example
///
/// ```
/// use script_time::{profiled, Session};
///
/// fn double(x: u32) -> u32 {
///     x * 2
/// }
///
/// let session = Session::new(true);
/// let mut double = profiled!(session, double);
/// assert_eq!(double(4), 8);
/// assert_eq!(session.profile("double").unwrap().call_count(), 1);
/// ```
///
/// Prefix the function with `fallible` to use [`Session::wrap_fallible`].
#[macro_export]
macro_rules! profiled {
    ($session:expr, fallible $func:path) => {
        $session.wrap_fallible(stringify!($func), $func)
    };
    ($session:expr, $func:path) => {
        $session.wrap(stringify!($func), $func)
    };
}
