//! Size-Rotating File Writer
//!
//! Keeps one active file plus up to `max_backups` numbered backups:
//!
//! ```text
//! app.log      active
//! app.log.1    most recent backup
//! app.log.2
//! app.log.3    oldest backup, discarded on the next rotation
//! ```
//!
//! Before a record is written, the writer rotates if the record would take
//! the active file to `max_bytes` or beyond. Records are never split across
//! files, so every line lives entirely in one file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of backup `index` for `path`; index 0 is the active file itself.
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Append-only file writer with size-based rotation
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    file: File,
    size: u64,
    max_bytes: u64,
    max_backups: usize,
}

impl RotatingFileWriter {
    /// Open (or create) `path` for appending.
    ///
    /// `max_bytes == 0` disables rotation. `max_backups == 0` truncates the
    /// active file instead of keeping backups.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path,
            file,
            size,
            max_bytes,
            max_backups,
        })
    }

    /// Active file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently in the active file
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Write one complete record, rotating first if it would not fit.
    pub fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        if self.should_rotate(record.len() as u64) {
            self.rotate()?;
        }
        self.file.write_all(record)?;
        self.size += record.len() as u64;
        Ok(())
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        // An empty file is never rotated, even for an oversized record.
        self.max_bytes > 0 && self.size > 0 && self.size + incoming >= self.max_bytes
    }

    /// Shift backups up by one, move the active file to `.1`, reopen empty.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_backups > 0 {
            for index in (1..self.max_backups).rev() {
                let src = backup_path(&self.path, index);
                if src.exists() {
                    let dst = backup_path(&self.path, index + 1);
                    remove_if_exists(&dst)?;
                    fs::rename(&src, &dst)?;
                }
            }
            let first = backup_path(&self.path, 1);
            remove_if_exists(&first)?;
            if self.path.exists() {
                fs::rename(&self.path, &first)?;
            }
            self.file = open_append(&self.path)?;
        } else {
            self.file = File::create(&self.path)?;
        }

        self.size = 0;
        tracing::debug!(path = %self.path.display(), "rotated log file");
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
