#![warn(missing_docs)]
//! benchkit statistics
//!
//! Descriptive statistics over raw timing samples:
//! - Central tendency (mean, median)
//! - Dispersion (sample standard deviation, min, max)
//! - Percentiles with linear interpolation between ranks

mod percentiles;
mod summary;

pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{SummaryStatistics, compute_summary};

/// Number of milliseconds in one second, used to rescale second-based samples.
pub const MILLIS_PER_SECOND: f64 = 1000.0;
