//! Reading log files back
//!
//! [`get_first_line`] and [`get_last_line`] never fail: problems are written
//! to the supplied logger at ERROR and reported as `None`. A `None` means
//! "could not determine the line", not "the file is empty".
//!
//! [`verify_rotation`] uses them to check that consecutive files of a
//! rotation set hold consecutive records, for logs whose messages end in a
//! sequence number (see [`trailing_number`]).

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::LogError;
use crate::logger::Logger;
use crate::rotating::backup_path;

/// Bytes examined per backward step when searching for the last line
const SEEK_STEP: usize = 64;

/// First line of `path`, trimmed. Errors are logged and yield `None`.
pub fn get_first_line(logger: &Logger, path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    read_first_line(path)
        .map_err(|e| report(logger, path, &e))
        .ok()
}

/// Last line of `path`, trimmed. Errors are logged and yield `None`.
///
/// Reads backward from the end in small fixed steps, so the cost does not
/// depend on the file size.
pub fn get_last_line(logger: &Logger, path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    read_last_line(path)
        .map_err(|e| report(logger, path, &e))
        .ok()
}

fn report(logger: &Logger, path: &Path, err: &LogError) {
    if err.is_not_found() {
        logger.error(&format!(
            "Error: The file '{}' was not found.",
            path.display()
        ));
    } else {
        logger.error(&format!("An error occurred: {err}"));
    }
}

fn read_first_line(path: &Path) -> Result<String, LogError> {
    let file = open(path)?;
    read_line_from(BufReader::new(file), path)
}

fn read_last_line(path: &Path) -> Result<String, LogError> {
    let mut file = open(path)?;
    let read_err = |source| LogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let len = file.metadata().map_err(read_err)?.len();
    let start = last_line_start(&mut file, len).map_err(read_err)?;
    file.seek(SeekFrom::Start(start)).map_err(read_err)?;
    read_line_from(BufReader::new(file), path)
}

fn open(path: &Path) -> Result<File, LogError> {
    File::open(path).map_err(|source| LogError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_line_from(mut reader: impl BufRead, path: &Path) -> Result<String, LogError> {
    let mut raw = Vec::new();
    reader
        .read_until(b'\n', &mut raw)
        .map_err(|source| LogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let line = String::from_utf8(raw).map_err(|source| LogError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(line.trim().to_string())
}

/// Offset where the last line begins.
///
/// The final byte is excluded from the search so that a trailing newline
/// does not count as a line break. Files shorter than two bytes, or without
/// an earlier newline, start at offset 0.
fn last_line_start<R: Read + Seek>(reader: &mut R, len: u64) -> io::Result<u64> {
    if len < 2 {
        return Ok(0);
    }

    let mut buf = [0u8; SEEK_STEP];
    let mut end = len - 1;
    while end > 0 {
        let start = end.saturating_sub(SEEK_STEP as u64);
        let chunk = &mut buf[..(end - start) as usize];
        reader.seek(SeekFrom::Start(start))?;
        reader.read_exact(chunk)?;
        if let Some(pos) = chunk.iter().rposition(|&b| b == b'\n') {
            return Ok(start + pos as u64 + 1);
        }
        end = start;
    }
    Ok(0)
}

/// Parse the last whitespace-separated word of `line` as an integer
pub fn trailing_number(line: &str) -> Option<u64> {
    line.split_whitespace().next_back()?.parse().ok()
}

/// Outcome of checking one rotation boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryStatus {
    /// The newer file starts exactly one after the older file ends
    Contiguous,
    /// Both sequence numbers were read but are not consecutive
    Gap {
        /// Sequence number at the end of the older file
        last: u64,
        /// Sequence number at the start of the newer file
        first: u64,
    },
    /// A line was missing or did not carry a sequence number
    Unreadable,
}

/// Check of the boundary between two adjacent files of a rotation set
#[derive(Debug, Clone)]
pub struct BoundaryCheck {
    /// Older file (`path.(i+1)`), whose last line is compared
    pub older: PathBuf,
    /// Newer file (`path.i`, index 0 being the active file)
    pub newer: PathBuf,
    /// Last line of `older`
    pub last_line: Option<String>,
    /// First line of `newer`
    pub first_line: Option<String>,
    /// Result of the comparison
    pub status: BoundaryStatus,
}

impl BoundaryCheck {
    /// Whether the boundary is contiguous
    pub fn is_contiguous(&self) -> bool {
        self.status == BoundaryStatus::Contiguous
    }
}

/// Check every boundary `path.(i+1) -> path.i` for `i` in `0..backups`.
///
/// `sequence` extracts the record's sequence number from a line; the
/// boundary is contiguous when the newer file's first number is exactly one
/// more than the older file's last number. Read errors are logged through
/// `logger` and reported as [`BoundaryStatus::Unreadable`].
pub fn verify_rotation<F>(
    logger: &Logger,
    path: impl AsRef<Path>,
    backups: usize,
    sequence: F,
) -> Vec<BoundaryCheck>
where
    F: Fn(&str) -> Option<u64>,
{
    let path = path.as_ref();
    (0..backups)
        .map(|i| {
            let newer = backup_path(path, i);
            let older = backup_path(path, i + 1);
            let last_line = get_last_line(logger, &older);
            let first_line = get_first_line(logger, &newer);

            let last = last_line.as_deref().and_then(&sequence);
            let first = first_line.as_deref().and_then(&sequence);
            let status = match (last, first) {
                (Some(last), Some(first)) if last.checked_add(1) == Some(first) => {
                    BoundaryStatus::Contiguous
                }
                (Some(last), Some(first)) => BoundaryStatus::Gap { last, first },
                _ => BoundaryStatus::Unreadable,
            };

            BoundaryCheck {
                older,
                newer,
                last_line,
                first_line,
                status,
            }
        })
        .collect()
}
