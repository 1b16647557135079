//! Line formatting

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::level::Level;

/// Second-resolution timestamp layout used in every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one newline-terminated log line:
/// `<YYYY-MM-DD HH:MM:SS> - <name> - <LEVEL> - <message>`
pub fn format_line<Tz>(timestamp: &DateTime<Tz>, name: &str, level: Level, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} - {} - {} - {}\n",
        timestamp.format(TIMESTAMP_FORMAT),
        name,
        level,
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_line() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let line = format_line(&ts, "MyApp", Level::Warning, "disk almost full");
        assert_eq!(line, "2024-03-09 07:05:01 - MyApp - WARNING - disk almost full\n");
    }
}
