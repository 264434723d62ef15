// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Manually driven clock for deterministic tests
//!
//! Clones share the same time, so a test keeps one handle and gives another
//! to the session under test.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{NaiveDateTime, TimeDelta};
use script_time::Clock;

use crate::fixtures::fixed_calendar;

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    monotonic: Rc<Cell<f64>>,
    calendar: Rc<Cell<NaiveDateTime>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Clock at monotonic zero and the fixture calendar time
    pub fn new() -> Self {
        Self {
            monotonic: Rc::new(Cell::new(0.0)),
            calendar: Rc::new(Cell::new(fixed_calendar())),
        }
    }

    /// Move both readings forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        self.monotonic.set(self.monotonic.get() + seconds);
        let delta = TimeDelta::microseconds((seconds * 1e6).round() as i64);
        self.calendar.set(self.calendar.get() + delta);
    }

    /// Set the calendar reading without touching the monotonic one
    pub fn set_calendar(&self, time: NaiveDateTime) {
        self.calendar.set(time);
    }

    /// Current monotonic reading
    pub fn now(&self) -> f64 {
        self.monotonic.get()
    }
}

impl Clock for ManualClock {
    fn monotonic_now(&self) -> f64 {
        self.monotonic.get()
    }

    fn calendar_now(&self) -> NaiveDateTime {
        self.calendar.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(1.25);

        assert_eq!(clock.monotonic_now(), 1.25);
        assert_eq!(clock.calendar_now(), fixed_calendar() + TimeDelta::milliseconds(1250));
    }
}
