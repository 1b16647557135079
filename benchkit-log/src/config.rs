//! Logger configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::level::Level;

/// Configuration consumed when a [`Logger`](crate::Logger) is constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Registry key; loggers built with the same name share one entry
    #[serde(default = "default_name")]
    pub name: String,
    /// Rotating log file; `None` or an empty path disables the file sink
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Minimum severity that is emitted
    #[serde(default)]
    pub level: Level,
    /// Whether to also write to stdout
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_file: None,
            level: Level::default(),
            console: default_console(),
        }
    }
}

fn default_name() -> String {
    "benchkit".to_string()
}
fn default_console() -> bool {
    true
}

impl LoggerConfig {
    /// Console-only configuration at INFO for the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the rotating log file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set the severity threshold
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable the console sink
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// The log file path, if one is configured and non-empty
    pub fn file_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.name, "benchkit");
        assert_eq!(config.level, Level::Info);
        assert!(config.console);
        assert!(config.file_path().is_none());
    }

    #[test]
    fn test_empty_path_disables_file() {
        let config = LoggerConfig::new("x").with_file("");
        assert!(config.file_path().is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config: LoggerConfig = toml::from_str(
            r#"
            name = "worker"
            log_file = "logs/worker.log"
            level = "warn"
        "#,
        )
        .unwrap();

        assert_eq!(config.name, "worker");
        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.file_path(), Some(Path::new("logs/worker.log")));
        // Defaults should still apply
        assert!(config.console);
    }
}
