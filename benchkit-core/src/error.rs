use thiserror::Error;

/// Errors returned by the benchmark harness
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// The call was made with arguments it cannot honor (e.g. zero test runs).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Memory counters only exist on accelerators.
    #[error("memory profiling is only available on accelerator devices (device: {device})")]
    MemoryProfilingUnavailable {
        /// Name of the configured device
        device: String,
    },

    /// The benchmarked function returned an error; no result was produced.
    #[error("benchmarked function failed: {0}")]
    Callable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HarnessError {
    pub(crate) fn callable<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        HarnessError::Callable(err.into())
    }
}
