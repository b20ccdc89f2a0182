//! Timestamp formatting for the `{asctime}` template field

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for rendered log lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_default_is_iso8601() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Iso8601);
    }
}
