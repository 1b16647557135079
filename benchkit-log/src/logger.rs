//! Logger handle

use std::fs;
use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::error::LogError;
use crate::level::Level;
use crate::registry::{LoggerEntry, LoggerRegistry};
use crate::sink::{ConsoleSink, RotatingFileSink, Sink};
use crate::{MAX_BACKUPS, MAX_BYTES};

/// Cheap, cloneable handle to a named registry entry
#[derive(Clone, Debug)]
pub struct Logger {
    entry: Arc<LoggerEntry>,
}

impl Logger {
    /// Build (or reconfigure) the logger named `config.name` in the
    /// process-wide registry.
    pub fn new(config: &LoggerConfig) -> Result<Self, LogError> {
        Self::in_registry(LoggerRegistry::global(), config)
    }

    /// Build (or reconfigure) a logger in an explicit registry.
    ///
    /// The new sinks are opened first; only once all of them succeeded are
    /// the entry's previous sinks replaced. On error the entry keeps its
    /// previous configuration.
    pub fn in_registry(registry: &LoggerRegistry, config: &LoggerConfig) -> Result<Self, LogError> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

        if config.console {
            sinks.push(Box::new(ConsoleSink::new(config.level)));
        }

        if let Some(path) = config.file_path() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| LogError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let sink = RotatingFileSink::open(path, config.level, MAX_BYTES, MAX_BACKUPS)
                .map_err(|source| LogError::OpenFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            sinks.push(Box::new(sink));
        }

        let entry = registry.entry(&config.name);
        entry.reconfigure(config.level, sinks);
        tracing::debug!(
            logger = %config.name,
            level = %config.level,
            sinks = entry.sink_count(),
            "configured logger"
        );

        Ok(Self { entry })
    }

    /// Logger name
    pub fn name(&self) -> &str {
        self.entry.name()
    }

    /// Current threshold of the underlying entry
    pub fn level(&self) -> Level {
        self.entry.level()
    }

    /// Whether a message at `level` would be emitted
    pub fn is_enabled(&self, level: Level) -> bool {
        self.entry.enabled(level)
    }

    /// Emit `message` at `level`
    pub fn log(&self, level: Level, message: &str) {
        self.entry.emit(level, message);
    }

    /// Emit at DEBUG
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Emit at INFO
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Emit at WARNING
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Emit at ERROR
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Emit at CRITICAL
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }
}
