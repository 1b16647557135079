//! Percentile Computation
//!
//! Rank-interpolated percentiles over raw samples. The median reported by
//! the harness is the 50th percentile, which for an even sample count is the
//! average of the two middle values.

/// Percentiles reported alongside a summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// 50th percentile (median)
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p999: f64,
}

/// Copy and sort samples ascending in IEEE total order, so NaN lands at
/// the ends instead of scrambling the finite values.
pub(crate) fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile of an already sorted slice.
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let p = percentile.clamp(0.0, 100.0) / 100.0;
            let rank = p * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// Compute a single percentile from unsorted samples
///
/// Uses linear interpolation between nearest ranks. Returns 0.0 for an
/// empty slice.
///
/// # Examples
///
/// ```
/// use benchkit_stats::compute_percentile;
///
/// let samples = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 2.5);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    percentile_of_sorted(&sorted_copy(samples), percentile)
}

/// Compute all standard percentiles with a single sort
pub fn compute_percentiles(samples: &[f64]) -> Percentiles {
    let sorted = sorted_copy(samples);
    Percentiles {
        p50: percentile_of_sorted(&sorted, 50.0),
        p90: percentile_of_sorted(&sorted, 90.0),
        p95: percentile_of_sorted(&sorted, 95.0),
        p99: percentile_of_sorted(&sorted, 99.0),
        p999: percentile_of_sorted(&sorted, 99.9),
    }
}
