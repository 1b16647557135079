#![warn(missing_docs)]
//! # benchkit
//!
//! Microbenchmarking with a leveled, size-rotating logger for reports.
//!
//! - **Harness**: warmup and timed phases, mean/median/std/min/max in milliseconds
//! - **Devices**: synchronization barriers around every timed region on accelerators
//! - **Comparisons**: several functions on identical inputs, reported side by side
//! - **Memory Profiling**: allocated and peak mebibytes of one call on accelerators
//! - **Logging**: `timestamp - name - LEVEL - message` lines to stdout and a
//!   rotating file (1 MiB per file, 3 backups)
//!
//! ## Quick Start
//!
//! ```no_run
//! use benchkit::prelude::*;
//!
//! let logger = Logger::new(&LoggerConfig::new("bench").with_file("logs/bench.log"))?;
//! let harness = BenchmarkHarness::cpu(logger);
//! let data: Vec<f64> = (0..4096).map(f64::from).collect();
//!
//! fn sum(v: &[f64]) -> f64 {
//!     v.iter().sum()
//! }
//! fn fold(v: &[f64]) -> f64 {
//!     v.iter().fold(0.0, |acc, x| acc + x)
//! }
//! let functions: [(&str, fn(&[f64]) -> f64); 2] = [("sum", sum), ("fold", fold)];
//!
//! let report = harness.compare_functions(functions, data.as_slice(), &BenchOptions::default())?;
//! harness.print_results(&report)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export harness types
pub use benchkit_core::{
    BYTES_PER_MIB, BenchOptions, BenchmarkHarness, BenchmarkResult, ComparisonReport, Cpu,
    DEFAULT_TEST_RUNS, DEFAULT_WARMUP_RUNS, Device, HarnessError, MemoryProfile, TimingScope,
    device_by_name, format_results,
};

// Re-export logger types
pub use benchkit_log::{
    BoundaryCheck, BoundaryStatus, Level, LogError, Logger, LoggerConfig, LoggerRegistry,
    MAX_BACKUPS, MAX_BYTES, backup_path, get_first_line, get_last_line, trailing_number,
    verify_rotation,
};

// Re-export stats
pub use benchkit_stats::{Percentiles, SummaryStatistics, compute_percentiles, compute_summary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchOptions, BenchmarkHarness, BenchmarkResult, ComparisonReport, Device, Level, Logger,
        LoggerConfig, get_first_line, get_last_line,
    };
}

/// Run the benchkit CLI.
///
/// ```ignore
/// fn main() {
///     benchkit::run().unwrap();
/// }
/// ```
pub use benchkit_cli::run;
