// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for function profiling

use std::panic::{AssertUnwindSafe, catch_unwind};

use script_time::{ScriptTimeError, Session, profiled};
use script_time_test_utils::{CaptureSink, DurationAssertions, ManualClock};

fn profiling_session(clock: &ManualClock) -> Session {
    Session::builder()
        .profile(true)
        .clock(clock.clone())
        .build()
        .unwrap()
}

#[test]
fn test_disabled_wrapper_is_passthrough() {
    let session = Session::builder().profile(false).build().unwrap();
    let mut calls = 0;
    {
        let mut f = session.wrap("f", |x: i32| {
            calls += 1;
            x + 1
        });
        assert_eq!(f(1), 2);
        assert_eq!(f(41), 42);
    }

    assert_eq!(calls, 2);
    assert!(session.profile("f").is_none());
    assert!(session.profiles().is_empty());
}

#[test]
fn test_disabled_fallible_wrapper_propagates_errors() {
    let session = Session::new(false);
    let mut f = session.wrap_fallible("f", |x: i32| if x > 0 { Ok(x) } else { Err("negative") });

    assert_eq!(f(3), Ok(3));
    assert_eq!(f(-3), Err("negative"));
    assert!(session.profiles().is_empty());
}

#[test]
fn test_call_count_matches_calls() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);
    let tick = clock.clone();
    let mut f = session.wrap("f", move |x: u32| {
        tick.advance(0.002);
        x + 1
    });

    for k in 0..7 {
        f(k);
    }

    let record = session.profile("f").unwrap();
    assert_eq!(record.call_count(), 7);
    assert_eq!(record.durations().len(), 7);
    assert!(record.durations().iter().all(|d| (d - 0.002).abs() < 1e-9));
}

#[test]
fn test_errors_are_not_recorded() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);
    let mut parse = session.wrap_fallible("parse", |raw: &'static str| raw.parse::<i64>());

    assert_eq!(parse("12"), Ok(12));
    assert!(parse("twelve").is_err());
    assert_eq!(parse("-4"), Ok(-4));

    assert_eq!(session.profile("parse").unwrap().call_count(), 2);
}

#[test]
fn test_panics_propagate_and_are_not_recorded() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);
    let mut checked = session.wrap("checked", |x: u32| {
        assert!(x < 10, "too large");
        x
    });

    assert_eq!(checked(1), 1);
    let outcome = catch_unwind(AssertUnwindSafe(|| checked(99)));
    assert!(outcome.is_err());

    assert_eq!(session.profile("checked").unwrap().call_count(), 1);
}

#[test]
fn test_wrappers_share_buckets_by_name() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);
    let mut a = session.wrap("shared", |x: u8| x);
    let mut b = session.wrap("shared", |x: u8| x * 2);

    a(1);
    b(1);
    b(2);

    assert_eq!(session.profile("shared").unwrap().call_count(), 3);
}

#[test]
fn test_scope_records_on_drop() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);

    {
        let _scope = session.scope("load");
        clock.advance(0.25);
    }
    let failed = session.scope("load");
    clock.advance(1.0);
    failed.discard();

    let record = session.profile("load").unwrap();
    assert_eq!(record.durations(), &[0.25]);
}

#[test]
fn test_single_call_reports_insufficient_data() {
    let clock = ManualClock::new();
    let session = profiling_session(&clock);
    let mut once = session.wrap("once", |_: ()| ());
    once(());

    let stats = session.profile_stats();
    assert_eq!(stats.len(), 1);
    assert!(matches!(
        stats[0].sample_std_dev(),
        Err(ScriptTimeError::InsufficientData { samples: 1, .. })
    ));
    assert!(session.report_profiles().contains("N/A"));
}

#[test]
fn test_clear_profiles_keeps_timing_state() {
    let clock = ManualClock::new();
    let mut session = profiling_session(&clock);
    let mut f = session.wrap("f", |x: u8| x);
    f(1);

    clock.advance(1.0);
    session.trigger_end();
    session.clear_profiles();

    assert!(session.profiles().is_empty());
    assert!(session.is_ended());
    assert_eq!(session.report_elapsed(), "1.000 s");
}

fn f(x: u64) -> u64 {
    x + 1
}

#[test]
fn test_end_to_end_report() {
    let clock = ManualClock::new();
    let sink = CaptureSink::new();
    let mut session = Session::builder()
        .profile(true)
        .clock(clock.clone())
        .sink(sink.clone())
        .build()
        .unwrap();

    let mut wrapped = profiled!(session, f);
    for x in 1..=5 {
        clock.advance(0.001 * x as f64);
        assert_eq!(wrapped(x), x + 1);
    }
    // Vary per-call durations through the clock
    let tick = clock.clone();
    let mut g = session.wrap("g", move |x: u64| {
        tick.advance(0.002 * x as f64);
        f(x)
    });
    for x in 1..=5 {
        g(x);
    }

    session.print_profiles().unwrap();
    let lines = sink.lines();

    assert_eq!(lines[0], "Function profile data:");
    assert_eq!(lines.len(), 4);

    let f_row: Vec<&str> = lines[2].split("  ").map(str::trim).filter(|s| !s.is_empty()).collect();
    assert_eq!(f_row[0], "f");
    assert_eq!(f_row[1], "5");
    for cell in &f_row[2..] {
        DurationAssertions::assert_valid(cell);
    }

    let g_row: Vec<&str> = lines[3].split("  ").map(str::trim).filter(|s| !s.is_empty()).collect();
    assert_eq!(g_row[0], "g");
    assert_eq!(g_row[1], "5");
    let (mean, std_dev, max, min) = (g_row[2], g_row[3], g_row[4], g_row[5]);
    assert_eq!(mean, "6.0 ms");
    assert_eq!(std_dev, "3.2 ms");
    assert_eq!(max, "10.0 ms");
    assert_eq!(min, "2.0 ms");
    DurationAssertions::assert_between(mean, min, max);
}
