//! Benchmark Result Types

use benchkit_stats::{MILLIS_PER_SECOND, compute_summary};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::fmt;

use crate::error::HarnessError;

/// Timing summary of one benchmarked function, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Mean time per run
    pub mean_ms: f64,
    /// Median time per run
    pub median_ms: f64,
    /// Sample standard deviation; 0 for a single run
    pub std_ms: f64,
    /// Fastest run
    pub min_ms: f64,
    /// Slowest run
    pub max_ms: f64,
    /// Number of timed runs
    pub total_runs: usize,
}

impl BenchmarkResult {
    /// Summarize per-run durations given in seconds
    pub fn from_seconds(samples: &[f64]) -> Self {
        let summary = compute_summary(samples).scaled(MILLIS_PER_SECOND);
        Self {
            mean_ms: summary.mean,
            median_ms: summary.median,
            std_ms: summary.std_dev,
            min_ms: summary.min,
            max_ms: summary.max,
            total_runs: summary.sample_count,
        }
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4} ms ± {:.4} ms (min {:.4} ms, max {:.4} ms, {} runs)",
            self.mean_ms, self.std_ms, self.min_ms, self.max_ms, self.total_runs
        )
    }
}

/// Results of several functions, in the order they were compared
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    entries: Vec<(String, BenchmarkResult)>,
}

impl ComparisonReport {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result. Labels must be unique.
    pub fn push(
        &mut self,
        label: impl Into<String>,
        result: BenchmarkResult,
    ) -> Result<(), HarnessError> {
        let label = label.into();
        if self.get(&label).is_some() {
            return Err(HarnessError::InvalidArgument(format!(
                "duplicate function label '{label}'"
            )));
        }
        self.entries.push((label, result));
        Ok(())
    }

    /// Result for `label`
    pub fn get(&self, label: &str) -> Option<&BenchmarkResult> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, result)| result)
    }

    /// Entries in comparison order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BenchmarkResult)> {
        self.entries.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Labels in comparison order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the smallest mean; the first one wins on an exact tie
    pub fn fastest(&self) -> Option<(&str, &BenchmarkResult)> {
        self.iter()
            .min_by(|(_, a), (_, b)| a.mean_ms.total_cmp(&b.mean_ms))
    }
}

impl Serialize for ComparisonReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// Memory used by one call, in mebibytes
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct MemoryProfile {
    /// Allocated after minus allocated before; negative if the call freed memory
    pub allocated_mb: f64,
    /// Peak allocation observed during the call
    pub peak_mb: f64,
}
