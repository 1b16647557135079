use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring a logger or reading its files
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// The parent directory of the log file could not be created.
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The log file could not be opened for appending.
    #[error("failed to open log file {}: {source}", path.display())]
    OpenFile {
        /// File that could not be opened
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A file could not be read back.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line read back was not valid UTF-8.
    #[error("{} contains invalid UTF-8: {source}", path.display())]
    Decode {
        /// File being read
        path: PathBuf,
        /// Decoding error
        source: std::string::FromUtf8Error,
    },

    /// A severity name did not match any level.
    #[error("unknown log level: {0}")]
    InvalidLevel(String),
}

impl LogError {
    /// True when the error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            LogError::Read { source, .. } | LogError::OpenFile { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
