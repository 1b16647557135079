//! Benchmark Harness
//!
//! Runs a function in two phases:
//! - Warmup: `warmup_runs` untimed calls so lazy initialization, caches and
//!   allocators settle, followed by one device synchronization
//! - Measurement: `test_runs` calls, each inside its own timing scope,
//!   producing one sample per call
//!
//! Every call receives the same argument bundle `&A`; the harness never looks
//! inside it.

use benchkit_log::Logger;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use crate::BYTES_PER_MIB;
use crate::device::{Cpu, Device};
use crate::error::HarnessError;
use crate::measure::timed;
use crate::report::format_results;
use crate::result::{BenchmarkResult, ComparisonReport, MemoryProfile};

/// Default number of untimed warmup calls
pub const DEFAULT_WARMUP_RUNS: usize = 10;

/// Default number of timed calls
pub const DEFAULT_TEST_RUNS: usize = 100;

/// Run counts shared by every benchmark in a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchOptions {
    /// Untimed calls before measurement; 0 skips warmup
    #[serde(default = "default_warmup_runs")]
    pub warmup_runs: usize,
    /// Timed calls; must be at least 1
    #[serde(default = "default_test_runs")]
    pub test_runs: usize,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            warmup_runs: DEFAULT_WARMUP_RUNS,
            test_runs: DEFAULT_TEST_RUNS,
        }
    }
}

fn default_warmup_runs() -> usize {
    DEFAULT_WARMUP_RUNS
}
fn default_test_runs() -> usize {
    DEFAULT_TEST_RUNS
}

impl BenchOptions {
    /// Options with explicit run counts
    pub fn new(warmup_runs: usize, test_runs: usize) -> Self {
        Self {
            warmup_runs,
            test_runs,
        }
    }

    /// Reject run counts that cannot produce a result
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.test_runs < 1 {
            return Err(HarnessError::InvalidArgument(format!(
                "test_runs must be at least 1, got {}",
                self.test_runs
            )));
        }
        Ok(())
    }
}

/// Times functions on a device and reports through a logger
pub struct BenchmarkHarness {
    device: Arc<dyn Device>,
    logger: Logger,
}

impl BenchmarkHarness {
    /// Harness for `device`, reporting through `logger`
    pub fn new(device: Arc<dyn Device>, logger: Logger) -> Self {
        tracing::info!(
            device = %device.name(),
            accelerator = device.is_accelerator(),
            "using device"
        );
        Self { device, logger }
    }

    /// Harness on the general-purpose processor
    pub fn cpu(logger: Logger) -> Self {
        Self::new(Arc::new(Cpu), logger)
    }

    /// Configured device
    pub fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    /// Logger used for reports
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn synchronize(&self) {
        if self.device.is_accelerator() {
            self.device.synchronize();
        }
    }

    /// Time `work`, with device barriers before starting and before stopping
    /// the clock. Returns the work's value and the elapsed time.
    ///
    /// A panic inside `work` propagates after the closing barrier has run.
    pub fn timer<R>(&self, work: impl FnOnce() -> R) -> (R, Duration) {
        timed(self.device.as_ref(), work)
    }

    /// Benchmark an infallible function.
    ///
    /// Fails with [`HarnessError::InvalidArgument`] if `options.test_runs`
    /// is 0, before the function is ever called.
    pub fn benchmark_function<A, T, F>(
        &self,
        mut func: F,
        args: &A,
        options: &BenchOptions,
    ) -> Result<BenchmarkResult, HarnessError>
    where
        A: ?Sized,
        F: FnMut(&A) -> T,
    {
        self.try_benchmark_function(|a| Ok::<T, Infallible>(func(a)), args, options)
    }

    /// Benchmark a fallible function.
    ///
    /// The first error aborts the run and is returned as
    /// [`HarnessError::Callable`]; no partial result is produced.
    pub fn try_benchmark_function<A, T, E, F>(
        &self,
        mut func: F,
        args: &A,
        options: &BenchOptions,
    ) -> Result<BenchmarkResult, HarnessError>
    where
        A: ?Sized,
        F: FnMut(&A) -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        options.validate()?;

        for _ in 0..options.warmup_runs {
            black_box(func(black_box(args)).map_err(HarnessError::callable)?);
        }
        self.synchronize();

        let mut samples = Vec::with_capacity(options.test_runs);
        for _ in 0..options.test_runs {
            let (outcome, elapsed) = self.timer(|| func(black_box(args)));
            black_box(outcome.map_err(HarnessError::callable)?);
            samples.push(elapsed.as_secs_f64());
        }

        Ok(BenchmarkResult::from_seconds(&samples))
    }

    /// Benchmark several functions with identical arguments and run counts.
    ///
    /// The report keeps the input order. Fails if `functions` is empty or
    /// repeats a label; both are checked before anything runs. Progress for
    /// each function is written to the harness logger at DEBUG.
    pub fn compare_functions<A, T, F, S, I>(
        &self,
        functions: I,
        args: &A,
        options: &BenchOptions,
    ) -> Result<ComparisonReport, HarnessError>
    where
        A: ?Sized,
        F: FnMut(&A) -> T,
        S: Into<String>,
        I: IntoIterator<Item = (S, F)>,
    {
        options.validate()?;
        let functions: Vec<(String, F)> = functions
            .into_iter()
            .map(|(label, func)| (label.into(), func))
            .collect();

        if functions.is_empty() {
            return Err(HarnessError::InvalidArgument(
                "no functions to compare".to_string(),
            ));
        }
        for (i, (label, _)) in functions.iter().enumerate() {
            if functions[..i].iter().any(|(seen, _)| seen == label) {
                return Err(HarnessError::InvalidArgument(format!(
                    "duplicate function label '{label}'"
                )));
            }
        }

        let mut report = ComparisonReport::new();
        for (label, func) in functions {
            tracing::info!("Benchmarking: {label}");
            self.logger.debug(&format!("Benchmarking: {label}"));
            let result = self.benchmark_function(func, args, options)?;
            tracing::info!("  Mean: {:.4} ms", result.mean_ms);
            tracing::info!("  Std:  {:.4} ms", result.std_ms);
            self.logger.debug(&format!("  {result}"));
            report.push(label, result)?;
        }
        Ok(report)
    }

    /// Allocated-memory delta and peak of a single untimed call.
    ///
    /// Only accelerators carry allocator counters; any other device yields
    /// [`HarnessError::MemoryProfilingUnavailable`] without calling `func`.
    pub fn profile_memory<A, T, F>(&self, func: F, args: &A) -> Result<MemoryProfile, HarnessError>
    where
        A: ?Sized,
        F: FnOnce(&A) -> T,
    {
        if !self.device.is_accelerator() {
            return Err(HarnessError::MemoryProfilingUnavailable {
                device: self.device.name(),
            });
        }

        self.device.reset_peak_memory_stats();
        self.device.synchronize();
        let before = self.device.memory_allocated();

        black_box(func(black_box(args)));
        self.device.synchronize();

        let after = self.device.memory_allocated();
        let peak = self.device.max_memory_allocated();

        Ok(MemoryProfile {
            allocated_mb: (after as f64 - before as f64) / BYTES_PER_MIB,
            peak_mb: peak as f64 / BYTES_PER_MIB,
        })
    }

    /// Log a comparison report at INFO, ending with the fastest function
    pub fn print_results(&self, report: &ComparisonReport) -> Result<(), HarnessError> {
        for line in format_results(report)? {
            self.logger.info(&line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchkit_log::{Level, LoggerConfig};
    use std::cell::Cell;
    use std::path::Path;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    fn file_logger(name: &str, path: &Path) -> Logger {
        Logger::new(
            &LoggerConfig::new(name)
                .with_file(path)
                .with_console(false)
                .with_level(Level::Debug),
        )
        .unwrap()
    }

    fn quiet_logger(name: &str) -> Logger {
        Logger::new(&LoggerConfig::new(name).with_console(false)).unwrap()
    }

    /// Accelerator whose "kernels" are allocations recorded by the test.
    #[derive(Default)]
    struct FakeAccelerator {
        syncs: AtomicUsize,
        allocated: AtomicU64,
        peak: AtomicU64,
    }

    impl FakeAccelerator {
        fn alloc(&self, bytes: u64) {
            let now = self.allocated.fetch_add(bytes, Ordering::SeqCst) + bytes;
            self.peak.fetch_max(now, Ordering::SeqCst);
        }
        fn free(&self, bytes: u64) {
            self.allocated.fetch_sub(bytes, Ordering::SeqCst);
        }
    }

    impl Device for FakeAccelerator {
        fn name(&self) -> String {
            "fake:0".to_string()
        }
        fn is_accelerator(&self) -> bool {
            true
        }
        fn synchronize(&self) {
            self.syncs.fetch_add(1, Ordering::SeqCst);
        }
        fn memory_allocated(&self) -> u64 {
            self.allocated.load(Ordering::SeqCst)
        }
        fn max_memory_allocated(&self) -> u64 {
            self.peak.load(Ordering::SeqCst)
        }
        fn reset_peak_memory_stats(&self) {
            self.peak
                .store(self.allocated.load(Ordering::SeqCst), Ordering::SeqCst);
        }
    }

    #[test]
    fn test_runs_warmup_then_measurement() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-counts"));
        let calls = Cell::new(0usize);

        let result = harness
            .benchmark_function(|_: &()| calls.set(calls.get() + 1), &(), &BenchOptions::new(3, 7))
            .unwrap();

        assert_eq!(calls.get(), 10);
        assert_eq!(result.total_runs, 7);
    }

    #[test]
    fn test_zero_test_runs_is_rejected_before_any_call() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-zero"));
        let calls = Cell::new(0usize);

        let err = harness
            .benchmark_function(|_: &()| calls.set(calls.get() + 1), &(), &BenchOptions::new(5, 0))
            .unwrap_err();

        assert!(matches!(err, HarnessError::InvalidArgument(_)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_single_run_has_zero_std() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-single"));
        let result = harness
            .benchmark_function(|x: &u64| x * 2, &21, &BenchOptions::new(0, 1))
            .unwrap();

        assert_eq!(result.std_ms, 0.0);
        assert_eq!(result.total_runs, 1);
        assert_eq!(result.min_ms, result.max_ms);
    }

    #[test]
    fn test_statistics_are_ordered() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-order"));
        let result = harness
            .benchmark_function(
                |d: &Duration| std::thread::sleep(*d),
                &Duration::from_millis(1),
                &BenchOptions::new(1, 5),
            )
            .unwrap();

        assert!(result.min_ms <= result.mean_ms && result.mean_ms <= result.max_ms);
        assert!(result.min_ms <= result.median_ms && result.median_ms <= result.max_ms);
        assert!(result.min_ms >= 1.0);
    }

    #[test]
    fn test_callable_error_aborts_run() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-err"));
        let calls = Cell::new(0usize);

        let err = harness
            .try_benchmark_function(
                |limit: &usize| {
                    calls.set(calls.get() + 1);
                    if calls.get() > *limit {
                        Err("device out of memory")
                    } else {
                        Ok(())
                    }
                },
                &4,
                &BenchOptions::new(2, 10),
            )
            .unwrap_err();

        assert!(matches!(err, HarnessError::Callable(_)));
        assert!(err.to_string().contains("device out of memory"));
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_accelerator_synchronizes_around_each_run() {
        let device = Arc::new(FakeAccelerator::default());
        let harness = BenchmarkHarness::new(device.clone(), quiet_logger("harness-sync"));

        harness
            .benchmark_function(|_: &()| (), &(), &BenchOptions::new(4, 6))
            .unwrap();

        // one after warmup, two per timed run
        assert_eq!(device.syncs.load(Ordering::SeqCst), 1 + 2 * 6);
    }

    #[test]
    fn test_compare_keeps_order_and_rejects_bad_input() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-compare"));
        let options = BenchOptions::new(0, 3);
        let sum = |v: &[u32]| v.iter().sum::<u32>();
        let data = [1u32, 2, 3];

        let report = harness
            .compare_functions([("second", sum), ("first", sum)], &data[..], &options)
            .unwrap();
        assert_eq!(report.labels(), ["second", "first"]);

        let empty: Vec<(String, fn(&[u32]) -> u32)> = Vec::new();
        assert!(matches!(
            harness.compare_functions(empty, &data[..], &options),
            Err(HarnessError::InvalidArgument(_))
        ));

        assert!(matches!(
            harness.compare_functions([("dup", sum), ("dup", sum)], &data[..], &options),
            Err(HarnessError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_profile_memory_on_cpu_is_unavailable() {
        let harness = BenchmarkHarness::cpu(quiet_logger("harness-mem-cpu"));
        let called = Cell::new(false);

        let err = harness
            .profile_memory(|_: &()| called.set(true), &())
            .unwrap_err();

        assert!(matches!(
            err,
            HarnessError::MemoryProfilingUnavailable { ref device } if device == "cpu"
        ));
        assert!(!called.get());
    }

    #[test]
    fn test_profile_memory_reports_delta_and_peak() {
        let device = Arc::new(FakeAccelerator::default());
        device.alloc(512 * 1024 * 1024);
        device.peak.store(4 * 1024 * 1024 * 1024, Ordering::SeqCst);
        let harness = BenchmarkHarness::new(device.clone(), quiet_logger("harness-mem"));

        let mib = 1024 * 1024;
        let profile = harness
            .profile_memory(
                |d: &FakeAccelerator| {
                    d.alloc(64 * mib); // scratch
                    d.alloc(16 * mib); // output, kept
                    d.free(64 * mib);
                },
                device.as_ref(),
            )
            .unwrap();

        assert!((profile.allocated_mb - 16.0).abs() < 1e-9);
        // stale peak was reset before the call
        assert!((profile.peak_mb - (512.0 + 80.0)).abs() < 1e-9);
        assert_eq!(device.syncs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_print_results_goes_through_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.log");
        let harness = BenchmarkHarness::cpu(file_logger("harness-print", &path));

        let report = harness
            .compare_functions(
                [("only", |x: &u8| *x)],
                &1u8,
                &BenchOptions::new(0, 2),
            )
            .unwrap();
        harness.print_results(&report).unwrap();

        let logged = std::fs::read_to_string(&path).unwrap();
        assert!(logged.contains(" - harness-print - INFO - PERFORMANCE COMPARISON"));
        assert!(logged.contains(" - INFO - Fastest: only ("));
        assert_eq!(logged.lines().filter(|l| l.contains(" - INFO - ")).count(), 10);
    }

    #[test]
    fn test_compare_progress_goes_through_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.log");
        let harness = BenchmarkHarness::cpu(file_logger("harness-progress", &path));

        let id = |x: &u8| *x;
        harness
            .compare_functions(
                [("first", id), ("second", id)],
                &1u8,
                &BenchOptions::new(0, 3),
            )
            .unwrap();

        let logged = std::fs::read_to_string(&path).unwrap();
        let debug: Vec<&str> = logged
            .lines()
            .filter_map(|l| l.split(" - harness-progress - DEBUG - ").nth(1))
            .collect();
        assert_eq!(debug.len(), 4);
        assert_eq!(debug[0], "Benchmarking: first");
        assert!(debug[1].ends_with("3 runs)"));
        assert_eq!(debug[2], "Benchmarking: second");
    }
}
