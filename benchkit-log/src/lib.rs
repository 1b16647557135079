#![warn(missing_docs)]
//! benchkit log - Leveled, Rotating Logger
//!
//! A small logging wrapper:
//! - Named loggers resolved through a process-wide [`LoggerRegistry`]
//! - Console (stdout) and size-rotating file sinks, filtered by [`Level`]
//! - `timestamp - name - LEVEL - message` line format
//! - Helpers to read the first/last line of a log file and to check that
//!   rotation preserved message order across backup files
//!
//! Reconstructing a logger under an existing name reconfigures it: the old
//! sinks are detached before the new ones are attached.
//!
//! ```no_run
//! use benchkit_log::{Level, Logger, LoggerConfig};
//!
//! let logger = Logger::new(&LoggerConfig {
//!     name: "app".to_string(),
//!     log_file: Some("logs/app.log".into()),
//!     level: Level::Debug,
//!     console: true,
//! })?;
//! logger.info("started");
//! # Ok::<(), benchkit_log::LogError>(())
//! ```

mod config;
mod error;
mod format;
mod inspect;
mod level;
mod logger;
mod registry;
mod rotating;
mod sink;

pub use config::LoggerConfig;
pub use error::LogError;
pub use format::{TIMESTAMP_FORMAT, format_line};
pub use inspect::{
    BoundaryCheck, BoundaryStatus, get_first_line, get_last_line, trailing_number,
    verify_rotation,
};
pub use level::Level;
pub use logger::Logger;
pub use registry::{LoggerEntry, LoggerRegistry};
pub use rotating::{RotatingFileWriter, backup_path};
pub use sink::{ConsoleSink, RotatingFileSink, Sink};

/// Size cap of a single log file before it is rotated (1 MiB)
pub const MAX_BYTES: u64 = 1024 * 1024;

/// Number of rotated backup files kept next to the active file
pub const MAX_BACKUPS: usize = 3;
