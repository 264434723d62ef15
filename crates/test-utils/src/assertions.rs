// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Assertions over formatted duration strings

/// Parse a string produced by `format_duration` back into seconds
///
/// `<1 ns` parses as zero. Returns `None` for anything that does not match
/// one of the formatter's shapes.
pub fn parse_duration(formatted: &str) -> Option<f64> {
    if formatted == "<1 ns" {
        return Some(0.0);
    }

    if let Some((value, unit)) = formatted.split_once(' ') {
        let value: f64 = value.parse().ok()?;
        let scale = match unit {
            "s" => 1.0,
            "ms" => 1e-3,
            "µs" => 1e-6,
            "ns" => 1e-9,
            _ => return None,
        };
        return Some(value * scale);
    }

    let fields: Vec<&str> = formatted.split(':').collect();
    let (hours, minutes, seconds) = match fields.as_slice() {
        [minutes, seconds] => ("0", *minutes, *seconds),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return None,
    };

    let hours: f64 = hours.parse().ok()?;
    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Custom assertion helpers for formatted durations
pub struct DurationAssertions;

impl DurationAssertions {
    /// Assert that `formatted` is a valid duration string
    pub fn assert_valid(formatted: &str) {
        assert!(
            parse_duration(formatted).is_some(),
            "'{}' is not a formatted duration",
            formatted
        );
    }

    /// Assert that `formatted` has the given unit suffix
    pub fn assert_unit(formatted: &str, unit: &str) {
        Self::assert_valid(formatted);
        assert!(
            formatted.ends_with(&format!(" {}", unit)),
            "Expected unit '{}' in '{}'",
            unit,
            formatted
        );
    }

    /// Assert `low <= value <= high` after parsing all three
    pub fn assert_between(value: &str, low: &str, high: &str) {
        let parse = |s: &str| {
            parse_duration(s).unwrap_or_else(|| panic!("'{}' is not a formatted duration", s))
        };
        let (v, lo, hi) = (parse(value), parse(low), parse(high));
        assert!(
            lo <= v && v <= hi,
            "Expected {} within [{}, {}]",
            value,
            low,
            high
        );
    }
}
