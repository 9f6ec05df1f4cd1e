use chrono::{DateTime, Local};
use std::fmt;
use tracing_subscriber::fmt::time::FormatTime;

/// Timestamp format embedded in report filenames (YYYY-MM-DD_HH-MM-SS)
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
/// Timestamp format used inside the running scan log (YYYY-MM-DD HH:MM:SS)
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the report filename format.
pub fn file_timestamp(at: DateTime<Local>) -> String {
    at.format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// Render a timestamp in the running-log format.
pub fn log_timestamp(at: DateTime<Local>) -> String {
    at.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Time-only log timer (HH:MM:SS.mmmmmm+TZ)
pub struct LocalTimeOnly;

impl FormatTime for LocalTimeOnly {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.6f%:z"))
    }
}
