//! Log level definitions and the numeric severity scale

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric severity of a log record.
///
/// Named levels sit on a sparse scale so that a bump policy can land records
/// between them; a record always carries its exact severity alongside the
/// floored [`LogLevel`].
pub type Severity = i32;

/// The highest defined severity. Bump arithmetic clamps here.
pub const MAX_SEVERITY: Severity = LogLevel::Critical as Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Trace = 5,
    Debug = 10,
    #[default]
    Info = 20,
    Warn = 30,
    Error = 40,
    Critical = 50,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// The numeric severity of this level.
    #[must_use]
    pub const fn severity(self) -> Severity {
        self as Severity
    }

    /// The named level a raw severity falls into.
    ///
    /// Severities between named levels floor to the level below, so a bumped
    /// record at 25 still reports as `Info`. Values at or above
    /// [`MAX_SEVERITY`] are `Critical`.
    #[must_use]
    pub const fn from_severity(severity: Severity) -> Self {
        match severity {
            s if s >= 50 => LogLevel::Critical,
            s if s >= 40 => LogLevel::Error,
            s if s >= 30 => LogLevel::Warn,
            s if s >= 20 => LogLevel::Info,
            s if s >= 10 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_scale() {
        assert_eq!(LogLevel::Trace.severity(), 5);
        assert_eq!(LogLevel::Debug.severity(), 10);
        assert_eq!(LogLevel::Info.severity(), 20);
        assert_eq!(LogLevel::Warn.severity(), 30);
        assert_eq!(LogLevel::Error.severity(), 40);
        assert_eq!(LogLevel::Critical.severity(), 50);
        assert_eq!(MAX_SEVERITY, 50);
    }

    #[test]
    fn test_from_severity_named_levels() {
        assert_eq!(LogLevel::from_severity(20), LogLevel::Info);
        assert_eq!(LogLevel::from_severity(30), LogLevel::Warn);
        assert_eq!(LogLevel::from_severity(50), LogLevel::Critical);
    }

    #[test]
    fn test_from_severity_floors_between_levels() {
        assert_eq!(LogLevel::from_severity(25), LogLevel::Info);
        assert_eq!(LogLevel::from_severity(39), LogLevel::Warn);
        assert_eq!(LogLevel::from_severity(0), LogLevel::Trace);
        assert_eq!(LogLevel::from_severity(99), LogLevel::Critical);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Critical > LogLevel::Error);
        assert!(LogLevel::Error > LogLevel::Warn);
        assert!(LogLevel::Warn > LogLevel::Info);
        assert!(LogLevel::Info > LogLevel::Debug);
        assert!(LogLevel::Debug > LogLevel::Trace);
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_matches_to_str() {
        assert_eq!(LogLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }
}
