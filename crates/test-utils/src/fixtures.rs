// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Shared fixture data

use chrono::{NaiveDate, NaiveDateTime};

/// 2024-03-01 15:04:05, displayed as `03:04:05 PM` by the default format
pub fn fixed_calendar() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(15, 4, 5))
        .expect("fixture date is valid")
}

/// Durations (seconds) paired with their expected formatting, one per branch
pub fn sample_durations() -> Vec<(f64, &'static str)> {
    vec![
        (0.0, "0.000 s"),
        (3661.5, "1:01:01.500"),
        (90.0, "01:30.0"),
        (1.5, "1.500 s"),
        (0.236592, "236.6 ms"),
        (0.0005, "500.0 µs"),
        (5e-9, "5.0 ns"),
        (2.5e-10, "<1 ns"),
    ]
}
