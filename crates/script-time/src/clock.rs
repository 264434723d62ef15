// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Clock sources
//!
//! A [`Session`](crate::Session) reads time through the [`Clock`] trait so that
//! tests can substitute a deterministic clock. Durations are always computed
//! from the monotonic reading; the calendar reading is for display only.

use std::time::Instant;

use chrono::{Local, NaiveDateTime};

/// Source of monotonic and calendar time
pub trait Clock {
    /// Seconds elapsed since an arbitrary, fixed origin
    fn monotonic_now(&self) -> f64;

    /// Local calendar time, used for display only
    fn calendar_now(&self) -> NaiveDateTime;
}

/// Host clock backed by [`Instant`] and [`chrono::Local`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose monotonic origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic_now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn calendar_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.monotonic_now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = clock.monotonic_now();
        assert!(first >= 0.0);
        assert!(second > first);
    }
}
