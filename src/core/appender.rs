//! Appender trait for log output destinations

use super::{
    error::Result,
    log_entry::LogEntry,
    log_level::{LogLevel, Severity},
};

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Minimum severity this appender accepts. The logger skips entries
    /// below it, after any bump policy has been applied, so a bumped record
    /// can clear a threshold its requested severity would not have.
    fn min_severity(&self) -> Severity {
        LogLevel::Trace.severity()
    }
}
