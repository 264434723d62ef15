// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Statistics collection for function profiling
//!
//! Per-name duration storage with mean, sample standard deviation, max and min.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ScriptTimeError, ScriptTimeResult};
use crate::format::format_duration;

/// Shown in place of a standard deviation that cannot be computed
const NOT_AVAILABLE: &str = "N/A";

/// Durations recorded for one profiled function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileRecord {
    durations: Vec<f64>,
}

impl ProfileRecord {
    /// Number of successful calls recorded
    pub fn call_count(&self) -> usize {
        self.durations.len()
    }

    /// Per-call durations in seconds, in call order
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    fn push(&mut self, duration: f64) {
        self.durations.push(duration);
    }
}

/// Profile data for every wrapped function of a session
///
/// Keyed by function name and iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    records: BTreeMap<String, ProfileRecord>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one call's duration to the bucket for `name`
    pub fn record(&mut self, name: &str, duration: f64) {
        match self.records.get_mut(name) {
            Some(record) => record.push(duration),
            None => {
                tracing::trace!("Creating profile bucket for '{}'", name);
                let mut record = ProfileRecord::default();
                record.push(duration);
                self.records.insert(name.to_string(), record);
            }
        }
    }

    /// Look up the record for `name`
    pub fn get(&self, name: &str) -> Option<&ProfileRecord> {
        self.records.get(name)
    }

    /// Iterate over `(name, record)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all recorded data
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Calculate statistics for every profiled function
    pub fn stats(&self) -> Vec<ProfileStats> {
        self.iter()
            .filter_map(|(name, record)| ProfileStats::from_durations(name, record.durations()))
            .collect()
    }

    /// Build a printable report of all profiled functions
    pub fn report(&self) -> ProfileReport {
        ProfileReport {
            profiles: self.stats(),
        }
    }
}

/// Statistics for a single profiled function
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    /// Function name
    pub name: String,
    /// Number of recorded calls
    pub count: usize,
    /// Mean call duration (seconds)
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two calls
    pub std_dev: Option<f64>,
    /// Longest call (seconds)
    pub max: f64,
    /// Shortest call (seconds)
    pub min: f64,
}

impl ProfileStats {
    /// Calculate statistics from a slice of durations
    ///
    /// Returns `None` for an empty slice.
    pub fn from_durations(name: &str, durations: &[f64]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        let count = durations.len();
        let total: f64 = durations.iter().sum();
        let mean = total / count as f64;
        let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = durations.iter().copied().fold(f64::INFINITY, f64::min);

        // Bessel-corrected
        let std_dev = (count > 1).then(|| {
            let squares: f64 = durations.iter().map(|d| (d - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(Self {
            name: name.to_string(),
            count,
            mean,
            std_dev,
            max,
            min,
        })
    }

    /// Sample standard deviation, or `InsufficientData` for a single call
    pub fn sample_std_dev(&self) -> ScriptTimeResult<f64> {
        self.std_dev.ok_or_else(|| ScriptTimeError::InsufficientData {
            name: self.name.clone(),
            samples: self.count,
        })
    }
}

/// Report containing statistics for all profiled functions
#[derive(Debug, Clone, Default)]
pub struct ProfileReport {
    pub profiles: Vec<ProfileStats>,
}

impl ProfileReport {
    /// Statistics for `name`, if it was profiled
    pub fn get(&self, name: &str) -> Option<&ProfileStats> {
        self.profiles.iter().find(|stats| stats.name == name)
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Function profile data:")?;
        write!(
            f,
            "{:>15}  {:>6}  {:>13}  {:>13}  {:>13}  {:>13}",
            "function", "called", "avg", "standard_deviation", "max", "min"
        )?;

        for stats in &self.profiles {
            let std_dev = stats
                .std_dev
                .map(format_duration)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            write!(
                f,
                "\n{:>15}  {:>6}  {:>13}  {:>13}  {:>13}  {:>13}",
                stats.name,
                stats.count,
                format_duration(stats.mean),
                std_dev,
                format_duration(stats.max),
                format_duration(stats.min)
            )?;
        }

        Ok(())
    }
}
