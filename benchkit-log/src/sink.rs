//! Output sinks
//!
//! A sink receives fully formatted lines. Each sink carries its own level
//! filter in addition to the logger-wide threshold.

use std::io::{self, Write};
use std::path::Path;

use crate::level::Level;
use crate::rotating::RotatingFileWriter;

/// Destination for formatted log lines
pub trait Sink: Send {
    /// Minimum level this sink accepts
    fn level(&self) -> Level;

    /// Write one newline-terminated line
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Short description used in diagnostics
    fn describe(&self) -> String;

    /// Whether a record at `level` passes this sink's filter
    fn accepts(&self, level: Level) -> bool {
        level >= self.level()
    }
}

/// Writes lines to standard output
#[derive(Debug)]
pub struct ConsoleSink {
    level: Level,
}

impl ConsoleSink {
    /// Console sink filtered at `level`
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Sink for ConsoleSink {
    fn level(&self) -> Level {
        self.level
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.flush()
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}

/// Writes lines to a size-rotating file
#[derive(Debug)]
pub struct RotatingFileSink {
    level: Level,
    writer: RotatingFileWriter,
}

impl RotatingFileSink {
    /// Open `path` with the given rotation policy, filtered at `level`
    pub fn open(
        path: &Path,
        level: Level,
        max_bytes: u64,
        max_backups: usize,
    ) -> io::Result<Self> {
        Ok(Self {
            level,
            writer: RotatingFileWriter::open(path, max_bytes, max_backups)?,
        })
    }
}

impl Sink for RotatingFileSink {
    fn level(&self) -> Level {
        self.level
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_record(line.as_bytes())
    }

    fn describe(&self) -> String {
        self.writer.path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_filter() {
        let sink = ConsoleSink::new(Level::Warning);
        assert!(!sink.accepts(Level::Info));
        assert!(sink.accepts(Level::Warning));
        assert!(sink.accepts(Level::Critical));
    }

    #[test]
    fn test_file_sink_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let mut sink = RotatingFileSink::open(&path, Level::Debug, 1024, 1).unwrap();

        sink.write_line("first\n").unwrap();
        sink.write_line("second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert_eq!(sink.describe(), path.display().to_string());
    }
}
