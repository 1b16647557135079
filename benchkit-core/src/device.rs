//! Execution Devices
//!
//! A [`Device`] is where benchmarked work runs. Accelerators queue work
//! asynchronously, so the harness calls [`Device::synchronize`] around every
//! timed region; without it a wall clock would measure queue submission
//! rather than execution. Accelerators also expose allocator counters used by
//! memory profiling.

use std::sync::Arc;

use crate::error::HarnessError;

/// Runtime services of an execution device
pub trait Device: Send + Sync {
    /// Human-readable name, e.g. `cpu` or `cuda:0`
    fn name(&self) -> String;

    /// Whether work is queued asynchronously and allocator counters exist
    fn is_accelerator(&self) -> bool;

    /// Block until all previously queued work has completed
    fn synchronize(&self) {}

    /// Bytes currently allocated on the device
    fn memory_allocated(&self) -> u64 {
        0
    }

    /// Highest allocated byte count since the last peak reset
    fn max_memory_allocated(&self) -> u64 {
        0
    }

    /// Reset the peak-allocation counter to the current allocation
    fn reset_peak_memory_stats(&self) {}
}

/// General-purpose processor: synchronous, no allocator instrumentation
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpu;

impl Device for Cpu {
    fn name(&self) -> String {
        "cpu".to_string()
    }

    fn is_accelerator(&self) -> bool {
        false
    }
}

/// Resolve a device by name.
///
/// Only `cpu` is built in; accelerators come from an external runtime that
/// implements [`Device`] and are passed to the harness directly.
pub fn device_by_name(name: &str) -> Result<Arc<dyn Device>, HarnessError> {
    match name.trim().to_lowercase().as_str() {
        "cpu" => Ok(Arc::new(Cpu)),
        other => Err(HarnessError::InvalidArgument(format!(
            "unknown device '{other}': only 'cpu' is built in, accelerators must be supplied by their runtime"
        ))),
    }
}
