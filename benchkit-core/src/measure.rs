//! Scoped Timing
//!
//! A [`TimingScope`] brackets one timed region:
//!
//! ```text
//! begin:  barrier -> start = now()
//! finish: barrier -> elapsed = now() - start
//! ```
//!
//! The closing barrier also runs from `Drop`, so a region that unwinds still
//! leaves the device drained before the panic continues.

use std::time::{Duration, Instant};

use crate::device::Device;

/// One timed region on a device
pub struct TimingScope<'d> {
    device: &'d dyn Device,
    start: Instant,
    finished: bool,
}

impl<'d> TimingScope<'d> {
    /// Drain queued device work, then start the clock
    #[inline]
    pub fn begin(device: &'d dyn Device) -> Self {
        barrier(device);
        Self {
            device,
            start: Instant::now(),
            finished: false,
        }
    }

    /// Drain the work issued inside the region, then stop the clock
    #[inline]
    pub fn finish(mut self) -> Duration {
        self.finished = true;
        barrier(self.device);
        self.start.elapsed()
    }
}

impl Drop for TimingScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            barrier(self.device);
            tracing::debug!(
                elapsed_ns = self.start.elapsed().as_nanos() as u64,
                "timed region exited without finishing"
            );
        }
    }
}

#[inline]
fn barrier(device: &dyn Device) {
    if device.is_accelerator() {
        device.synchronize();
    }
}

/// Run `work` inside a timing scope and return its value with the elapsed time
#[inline]
pub(crate) fn timed<R>(device: &dyn Device, work: impl FnOnce() -> R) -> (R, Duration) {
    let scope = TimingScope::begin(device);
    let value = work();
    (value, scope.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Cpu;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingAccelerator {
        syncs: AtomicUsize,
    }

    impl Device for CountingAccelerator {
        fn name(&self) -> String {
            "counting".to_string()
        }
        fn is_accelerator(&self) -> bool {
            true
        }
        fn synchronize(&self) {
            self.syncs.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_timed_measures_work() {
        let (value, elapsed) = timed(&Cpu, || {
            std::thread::sleep(Duration::from_millis(10));
            7
        });

        assert_eq!(value, 7);
        // Should be at least 10ms
        assert!(elapsed >= Duration::from_millis(10));
        // Should be less than 1s (accounting for scheduling)
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_accelerator_gets_two_barriers() {
        let device = CountingAccelerator::default();
        let _ = timed(&device, || ());
        assert_eq!(device.syncs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_closing_barrier_runs_on_panic() {
        let device = CountingAccelerator::default();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _: ((), Duration) = timed(&device, || panic!("kernel failed"));
        }));

        assert!(result.is_err());
        assert_eq!(device.syncs.load(Ordering::SeqCst), 2);
    }
}
