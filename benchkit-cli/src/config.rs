//! Configuration loading from benchkit.toml
//!
//! benchkit configuration can be specified in a `benchkit.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use benchkit_core::{BenchOptions, DEFAULT_TEST_RUNS, DEFAULT_WARMUP_RUNS};
use benchkit_log::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up by [`BenchkitConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "benchkit.toml";

/// benchkit configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchkitConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logger used for reports
    #[serde(default)]
    pub logging: LoggerConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Untimed calls before measurement
    #[serde(default = "default_warmup_runs")]
    pub warmup_runs: usize,
    /// Timed calls per function
    #[serde(default = "default_test_runs")]
    pub test_runs: usize,
    /// Execution device name
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_runs: default_warmup_runs(),
            test_runs: default_test_runs(),
            device: default_device(),
        }
    }
}

fn default_warmup_runs() -> usize {
    DEFAULT_WARMUP_RUNS
}
fn default_test_runs() -> usize {
    DEFAULT_TEST_RUNS
}
fn default_device() -> String {
    "cpu".to_string()
}

impl RunnerConfig {
    /// Run counts, with CLI overrides taking precedence
    pub fn options(&self, warmup: Option<usize>, runs: Option<usize>) -> BenchOptions {
        BenchOptions::new(
            warmup.unwrap_or(self.warmup_runs),
            runs.unwrap_or(self.test_runs),
        )
    }
}

impl BenchkitConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find `benchkit.toml` in `start` or one of its ancestors
    pub fn find_from(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        let path = Self::find_from(dir)?;
        match Self::load(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded configuration");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring configuration: {e}");
                None
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# benchkit configuration

[runner]
# Untimed calls before measurement
warmup_runs = 10
# Timed calls per function (at least 1)
test_runs = 100
# Execution device
device = "cpu"

[logging]
# Logger name shown in every line
name = "benchkit"
# Rotating log file, 1 MiB per file with 3 backups (uncomment to enable)
# log_file = "logs/benchkit.log"
# Minimum level: debug, info, warning, error, critical
level = "info"
# Also write to stdout
console = true
"#
        .to_string()
    }
}
