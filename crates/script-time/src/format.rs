// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Human-readable duration formatting
//!
//! Converts a duration in seconds into a string whose unit follows the
//! magnitude of the value:
//!
//! | magnitude        | output          |
//! |------------------|-----------------|
//! | ≥ 1 hour         | `1:01:01.500`   |
//! | ≥ 1 minute       | `01:01.5`       |
//! | ≥ 1 second       | `1.500 s`       |
//! | exactly zero     | `0.000 s`       |
//! | sub-second       | `236.6 ms`, `500.0 µs`, `5.0 ns` |
//! | below 1 ns       | `<1 ns`         |

use std::fmt;
use std::time::Duration;

/// Output for an exact zero duration
const ZERO: &str = "0.000 s";

/// Output for durations too small for the finest supported unit
const BELOW_RESOLUTION: &str = "<1 ns";

/// Decimal order of the millisecond base unit
const MILLIS_ORDER: i32 = 3;

/// Sub-second display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    /// 10^-3 s
    Milliseconds,
    /// 10^-6 s
    Microseconds,
    /// 10^-9 s
    Nanoseconds,
}

impl DurationUnit {
    /// Units tried in turn, coarsest first
    pub const SUB_SECOND: [DurationUnit; 3] = [
        DurationUnit::Milliseconds,
        DurationUnit::Microseconds,
        DurationUnit::Nanoseconds,
    ];

    /// Decimal order of magnitude of this unit
    pub fn order(self) -> i32 {
        match self {
            DurationUnit::Milliseconds => 3,
            DurationUnit::Microseconds => 6,
            DurationUnit::Nanoseconds => 9,
        }
    }

    /// Unit suffix used in formatted output
    pub fn suffix(self) -> &'static str {
        match self {
            DurationUnit::Milliseconds => "ms",
            DurationUnit::Microseconds => "µs",
            DurationUnit::Nanoseconds => "ns",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// `[hours, minutes, seconds, remainder]` of a scaled duration
#[derive(Debug, Clone, Copy, PartialEq)]
struct Breakdown {
    hours: f64,
    minutes: f64,
    seconds: f64,
    /// Remainder below one second, in units of `10^-order` seconds
    remainder: f64,
}

fn divmod(value: f64, divisor: f64) -> (f64, f64) {
    (value.div_euclid(divisor), value.rem_euclid(divisor))
}

/// Scale `seconds` by `10^order` and carry through 1000, 60 and 60.
fn decompose(seconds: f64, order: i32) -> Breakdown {
    let scaled = seconds * 10f64.powi(order);
    let (rest, remainder) = divmod(scaled, 1000.0);
    let (rest, seconds) = divmod(rest, 60.0);
    let (hours, minutes) = divmod(rest, 60.0);

    Breakdown {
        hours,
        minutes,
        seconds,
        remainder,
    }
}

/// Format a duration given in seconds.
///
/// The most significant nonzero unit selects the representation. Rounding
/// happens at the last displayed digit and carries into the higher fields, so
/// `1.9996` formats as `2.000 s`.
///
/// Negative and non-finite inputs are outside the contract; they produce
/// some string but never panic.
///
/// # Example
///
/// ```
/// use script_time::format_duration;
///
/// assert_eq!(format_duration(3661.5), "1:01:01.500");
/// assert_eq!(format_duration(0.0005), "500.0 µs");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let parts = decompose(seconds, MILLIS_ORDER);

    if parts.hours != 0.0 {
        format_hours(seconds)
    } else if parts.minutes != 0.0 {
        format_minutes(seconds)
    } else if parts.seconds != 0.0 {
        format_seconds(seconds)
    } else if seconds == 0.0 {
        ZERO.to_string()
    } else {
        format_sub_second(seconds)
    }
}

/// Format a [`Duration`] with [`format_duration`].
pub fn format_std_duration(duration: Duration) -> String {
    format_duration(duration.as_secs_f64())
}

/// `H:MM:SS.mmm`
fn format_hours(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = total_millis / 60_000 % 60;
    let secs = total_millis / 1000 % 60;
    let millis = total_millis % 1000;
    format!("{hours}:{minutes:02}:{secs:02}.{millis:03}")
}

/// `MM:SS.t`, or hours once the rounded value reaches an hour
fn format_minutes(seconds: f64) -> String {
    let total_tenths = (seconds * 10.0).round() as u64;
    if total_tenths >= 36_000 {
        return format_hours(total_tenths as f64 / 10.0);
    }

    let minutes = total_tenths / 600;
    let secs = total_tenths / 10 % 60;
    let tenths = total_tenths % 10;
    format!("{minutes:02}:{secs:02}.{tenths}")
}

/// `S.mmm s`, or minutes once the rounded value reaches a minute
fn format_seconds(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    if total_millis >= 60_000 {
        return format_minutes(total_millis as f64 / 1000.0);
    }

    format!("{}.{:03} s", total_millis / 1000, total_millis % 1000)
}

/// Escalate through ms, µs and ns until the leading digit is nonzero.
///
/// A value that rounds up to 1000 of its unit is shown as one of the next
/// coarser unit.
fn format_sub_second(seconds: f64) -> String {
    let units = DurationUnit::SUB_SECOND;
    for (index, unit) in units.iter().enumerate() {
        let value = decompose(seconds, unit.order()).remainder;
        if value < 1.0 {
            continue;
        }

        let tenths = (value * 10.0).round() as u64;
        if tenths < 10_000 {
            return format!("{}.{} {unit}", tenths / 10, tenths % 10);
        }
        return match index.checked_sub(1) {
            Some(coarser) => format!("1.0 {}", units[coarser]),
            None => format_seconds(1.0),
        };
    }

    BELOW_RESOLUTION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_duration(0.0), "0.000 s");
    }

    #[test]
    fn test_hours() {
        assert_eq!(format_duration(3661.5), "1:01:01.500");
        assert_eq!(format_duration(7200.0), "2:00:00.000");
        assert_eq!(format_duration(36000.25), "10:00:00.250");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(format_duration(90.0), "01:30.0");
        assert_eq!(format_duration(61.25), "01:01.3");
        assert_eq!(format_duration(3599.0), "59:59.0");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(format_duration(1.5), "1.500 s");
        assert_eq!(format_duration(59.9), "59.900 s");
    }

    #[test]
    fn test_rounding_carries_into_seconds() {
        assert_eq!(format_duration(1.9996), "2.000 s");
    }

    #[test]
    fn test_rounding_promotes_to_next_range() {
        assert_eq!(format_duration(59.9996), "01:00.0");
        assert_eq!(format_duration(3599.96), "1:00:00.000");
        assert_eq!(format_duration(0.99996), "1.000 s");
        assert_eq!(format_duration(0.000_999_999_6), "1.0 ms");
        assert_eq!(format_duration(9.99999e-7), "1.0 µs");
    }

    #[test]
    fn test_just_below_range_edges() {
        assert_eq!(format_duration(59.9994), "59.999 s");
        assert_eq!(format_duration(3599.94), "59:59.9");
        assert_eq!(format_duration(0.99994), "999.9 ms");
    }

    #[test]
    fn test_sub_second_units() {
        assert_eq!(format_duration(0.236592), "236.6 ms");
        assert_eq!(format_duration(0.0123), "12.3 ms");
        assert_eq!(format_duration(0.0005), "500.0 µs");
        assert_eq!(format_duration(5e-9), "5.0 ns");
    }

    #[test]
    fn test_below_nanosecond() {
        assert_eq!(format_duration(2.5e-10), "<1 ns");
        assert_eq!(format_duration(1e-15), "<1 ns");
    }

    #[test]
    fn test_std_duration() {
        assert_eq!(format_std_duration(Duration::from_millis(1500)), "1.500 s");
        assert_eq!(format_std_duration(Duration::from_micros(250)), "250.0 µs");
        assert_eq!(format_std_duration(Duration::ZERO), "0.000 s");
    }

    #[test]
    fn test_monotonic_within_millisecond_bracket() {
        let mut previous = 0.0;
        for step in 2..1000 {
            let seconds = step as f64 * 0.000_997;
            let formatted = format_duration(seconds);
            let value: f64 = formatted
                .strip_suffix(" ms")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| panic!("unexpected output {formatted}"));
            assert!(value >= previous, "{formatted} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_negative_input_does_not_panic() {
        assert!(!format_duration(-0.5).is_empty());
        assert!(!format_duration(f64::NAN).is_empty());
    }

    #[test]
    fn test_decompose() {
        let parts = decompose(3661.5, MILLIS_ORDER);
        assert_eq!(parts.hours, 1.0);
        assert_eq!(parts.minutes, 1.0);
        assert_eq!(parts.seconds, 1.0);
        assert_eq!(parts.remainder, 500.0);
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(DurationUnit::Microseconds.to_string(), "µs");
        assert_eq!(DurationUnit::Nanoseconds.order(), 9);
    }
}
