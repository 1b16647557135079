#![warn(missing_docs)]
//! benchkit Core - Benchmark Harness
//!
//! This crate times repeated invocations of a function and summarizes them:
//! - [`BenchmarkHarness`] with warmup and timed phases
//! - Scoped timing with device synchronization barriers on accelerators
//! - Side-by-side comparison of several functions on identical inputs
//! - Allocated/peak memory profiling through the [`Device`] counters
//!
//! ```no_run
//! use benchkit_core::{BenchOptions, BenchmarkHarness};
//! use benchkit_log::{Logger, LoggerConfig};
//!
//! let logger = Logger::new(&LoggerConfig::new("bench"))?;
//! let harness = BenchmarkHarness::cpu(logger);
//! let data: Vec<u64> = (0..10_000).collect();
//!
//! let result = harness.benchmark_function(
//!     |v: &[u64]| v.iter().sum::<u64>(),
//!     data.as_slice(),
//!     &BenchOptions::default(),
//! )?;
//! println!("{result}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod device;
mod error;
mod harness;
mod measure;
mod report;
mod result;

pub use device::{Cpu, Device, device_by_name};
pub use error::HarnessError;
pub use harness::{BenchOptions, BenchmarkHarness, DEFAULT_TEST_RUNS, DEFAULT_WARMUP_RUNS};
pub use measure::TimingScope;
pub use report::format_results;
pub use result::{BenchmarkResult, ComparisonReport, MemoryProfile};

/// Bytes per mebibyte, the unit of [`MemoryProfile`]
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
