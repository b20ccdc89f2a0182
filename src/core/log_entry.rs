//! Log entry structure

use super::log_context::LogContext;
use super::log_level::{LogLevel, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The message carried by a log entry.
///
/// Most messages are plain text, possibly containing legacy `%s` or modern
/// `{name}` placeholders. Structured callers may pass a JSON map instead;
/// map messages bypass placeholder substitution entirely and are rendered as
/// their JSON text form, with any entry context merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    Text(String),
    Map(serde_json::Map<String, serde_json::Value>),
}

impl From<String> for MessageBody {
    fn from(s: String) -> Self {
        MessageBody::Text(s)
    }
}

impl From<&str> for MessageBody {
    fn from(s: &str) -> Self {
        MessageBody::Text(s.to_string())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for MessageBody {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        MessageBody::Map(map)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub logger_name: String,
    pub level: LogLevel,
    /// Exact numeric severity. Usually `level.severity()`, but a bump policy
    /// may land it between named levels; `level` is floored from it.
    pub severity: Severity,
    pub body: MessageBody,
    /// Positional arguments for legacy percent-style substitution
    pub args: Vec<super::log_context::FieldValue>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<LogContext>,
}

impl LogEntry {
    /// Sanitize a text message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, body: impl Into<MessageBody>) -> Self {
        let body = match body.into() {
            MessageBody::Text(text) => MessageBody::Text(Self::sanitize_message(&text)),
            map => map,
        };
        Self {
            logger_name: String::new(),
            level,
            severity: level.severity(),
            body,
            args: Vec::new(),
            timestamp: Utc::now(),
            context: None,
        }
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn with_args(
        mut self,
        args: impl IntoIterator<Item = super::log_context::FieldValue>,
    ) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Reassign the entry's severity, re-flooring the named level.
    ///
    /// This is the record-creation hook point the bump policy feeds into.
    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
        self.level = LogLevel::from_severity(severity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_text_entry() {
        let entry = LogEntry::new(LogLevel::Info, "hello");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.severity, 20);
        assert_eq!(entry.body, MessageBody::Text("hello".to_string()));
        assert!(entry.args.is_empty());
        assert!(entry.context.is_none());
    }

    #[test]
    fn test_new_map_entry() {
        let mut map = serde_json::Map::new();
        map.insert("event".to_string(), serde_json::json!("login"));

        let entry = LogEntry::new(LogLevel::Info, map.clone());
        assert_eq!(entry.body, MessageBody::Map(map));
    }

    #[test]
    fn test_text_sanitization() {
        let entry = LogEntry::new(LogLevel::Info, "line1\nline2\tend");
        assert_eq!(
            entry.body,
            MessageBody::Text("line1\\nline2\\tend".to_string())
        );
    }

    #[test]
    fn test_map_body_not_sanitized() {
        let mut map = serde_json::Map::new();
        map.insert("note".to_string(), serde_json::json!("a\nb"));

        // Map values are data, not a rendered line; they are escaped by the
        // JSON renderer instead.
        let entry = LogEntry::new(LogLevel::Info, map.clone());
        assert_eq!(entry.body, MessageBody::Map(map));
    }

    #[test]
    fn test_set_severity_refloors_level() {
        let mut entry = LogEntry::new(LogLevel::Info, "msg");
        entry.set_severity(30);
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.severity, 30);

        entry.set_severity(45);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.severity, 45);
    }

    #[test]
    fn test_builder_pattern() {
        let entry = LogEntry::new(LogLevel::Warn, "careful: %s")
            .with_logger_name("app.db")
            .with_args(vec!["disk".into()])
            .with_context(LogContext::new().with_field("shard", 3));

        assert_eq!(entry.logger_name, "app.db");
        assert_eq!(entry.args.len(), 1);
        assert!(entry.context.is_some());
    }
}
