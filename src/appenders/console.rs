//! Console appender implementation

use crate::core::{Appender, ExtraFormatter, Formatter, LogEntry, LogLevel, Result, Severity};
use colored::Colorize;

pub struct ConsoleAppender {
    use_colors: bool,
    min_level: LogLevel,
    formatter: Box<dyn Formatter>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            min_level: LogLevel::Trace,
            formatter: Box::new(ExtraFormatter::default()),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Install a formatter on this appender.
    #[must_use]
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Set the minimum severity this appender accepts.
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.formatter.format(entry);
        let output = if self.use_colors {
            line.color(entry.level.color_code()).to_string()
        } else {
            line
        };

        // Route Error and Critical levels to stderr, others to stdout
        match entry.level {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn min_severity(&self) -> Severity {
        self.min_level.severity()
    }
}
