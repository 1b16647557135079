//! Summary Statistics
//!
//! Mean, median, sample standard deviation and extremes over raw samples.
//! Unlike a robust estimator, nothing is discarded: every sample counts
//! toward every statistic, so `min <= mean <= max` and
//! `min <= median <= max` always hold for non-empty, NaN-free input.
//! A NaN sample propagates into the affected statistics instead of
//! panicking.

use crate::percentiles::{percentile_of_sorted, sorted_copy};

/// Descriptive statistics over a set of samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (average of the middle pair for even counts)
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator); 0.0 below two samples
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

/// Compute summary statistics. An empty slice yields all-zero statistics.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let sorted = sorted_copy(samples);
    let n = sorted.len();

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = percentile_of_sorted(&sorted, 50.0);

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    // Float summation can land the mean a rounding step outside the range
    // of identical samples. NaN extremes leave the mean untouched.
    let min = sorted[0];
    let max = sorted[n - 1];
    let mean = if min <= max { mean.clamp(min, max) } else { mean };

    SummaryStatistics {
        mean,
        median,
        std_dev,
        min,
        max,
        sample_count: n,
    }
}

impl SummaryStatistics {
    /// Multiply every value-bearing statistic by `factor` (e.g. seconds to ms).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            mean: self.mean * factor,
            median: self.median * factor,
            std_dev: self.std_dev * factor,
            min: self.min * factor,
            max: self.max * factor,
            sample_count: self.sample_count,
        }
    }
}
