//! In-memory appender for tests and diagnostics
//!
//! Captures formatted lines into a shared buffer that outlives the appender
//! handle, so assertions can inspect what a logger actually emitted.

use crate::core::{Appender, ExtraFormatter, Formatter, LogEntry, LogLevel, Result, Severity};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
    min_level: LogLevel,
    formatter: Box<dyn Formatter>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            min_level: LogLevel::Trace,
            formatter: Box::new(ExtraFormatter::default()),
        }
    }

    #[must_use]
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// A handle to the captured lines, valid after the appender is boxed
    /// into a logger.
    pub fn buffer(&self) -> MemoryBuffer {
        MemoryBuffer {
            lines: Arc::clone(&self.lines),
        }
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.lines.lock().push(self.formatter.format(entry));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn min_severity(&self) -> Severity {
        self.min_level.severity()
    }
}

/// Read side of a [`MemoryAppender`].
#[derive(Clone)]
pub struct MemoryBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryBuffer {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}
