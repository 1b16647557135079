//! Rotation check for `benchkit log-demo`
//!
//! Floods a file-only logger with numbered messages, then checks every
//! boundary between the active file and its backups: the first message of
//! the newer file must directly follow the last message of the older one.

use benchkit_log::{
    BoundaryCheck, BoundaryStatus, Logger, MAX_BACKUPS, trailing_number, verify_rotation,
};
use std::path::Path;

/// Text of every demo message, followed by its sequence number
pub const MESSAGE_PREFIX: &str = "This is log message number";

/// Default number of demo messages; enough to fill every backup
pub const DEFAULT_MESSAGES: usize = 100_000;

/// Write `messages` numbered INFO records through `file_logger`
pub fn write_messages(file_logger: &Logger, messages: usize) {
    for i in 0..messages {
        file_logger.info(&format!("{MESSAGE_PREFIX} {i}"));
    }
}

/// Check each rotation boundary of `path` and log the outcome through
/// `console`. Returns the checks in boundary order.
pub fn check_boundaries(console: &Logger, path: &Path) -> Vec<BoundaryCheck> {
    let checks = verify_rotation(console, path, MAX_BACKUPS, trailing_number);

    for check in &checks {
        let older = check.older.display();
        let newer = check.newer.display();
        console.info(&format!(
            "last line [{}]",
            check.last_line.as_deref().unwrap_or_default()
        ));
        console.info(&format!(
            "first line [{}]",
            check.first_line.as_deref().unwrap_or_default()
        ));

        match &check.status {
            BoundaryStatus::Contiguous => {
                console.info(&format!(
                    "Log rotation correct between file [{older}] and file [{newer}]..."
                ));
            }
            BoundaryStatus::Gap { last, first } => {
                console.error(&format!(
                    "Log rotation INCORRECT between file [{older}] and file [{newer}]... \
                     ({first} does not follow {last})"
                ));
            }
            BoundaryStatus::Unreadable => {
                console.error(&format!(
                    "Log rotation INCORRECT between file [{older}] and file [{newer}]... \
                     (no sequence number)"
                ));
            }
        }
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchkit_log::{LoggerConfig, backup_path};

    #[test]
    fn test_boundaries_contiguous_after_flood() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("demo.log");
        let file_logger = Logger::new(
            &LoggerConfig::new("rotation-demo-file")
                .with_file(&path)
                .with_console(false),
        )
        .unwrap();
        let console = Logger::new(&LoggerConfig::new("rotation-demo-console")).unwrap();

        write_messages(&file_logger, 60_000);

        for i in 1..=MAX_BACKUPS {
            assert!(backup_path(&path, i).exists(), "missing backup {i}");
        }
        assert!(!backup_path(&path, MAX_BACKUPS + 1).exists());

        let checks = check_boundaries(&console, &path);
        assert_eq!(checks.len(), MAX_BACKUPS);
        assert!(checks.iter().all(BoundaryCheck::is_contiguous), "{checks:?}");

        let newest = checks[0].first_line.as_deref().unwrap();
        assert!(newest.contains(MESSAGE_PREFIX));
    }

    #[test]
    fn test_missing_backups_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.log");
        let file_logger = Logger::new(
            &LoggerConfig::new("rotation-demo-short")
                .with_file(&path)
                .with_console(false),
        )
        .unwrap();
        let console = Logger::new(&LoggerConfig::new("rotation-demo-short-console")).unwrap();

        write_messages(&file_logger, 10);

        let checks = check_boundaries(&console, &path);
        assert!(checks.iter().all(|c| c.status == BoundaryStatus::Unreadable));
    }
}
