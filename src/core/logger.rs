//! Main logger implementation
//!
//! The logger is the host for the tuning mechanisms: its acceptance
//! threshold is a replaceable [`LevelThreshold`] (static or conditional),
//! record creation consults the process-wide bump policy, and a scoped
//! clone carries a context that is imprinted on every message it emits.

use super::{
    appender::Appender,
    conditional_level::LevelThreshold,
    error::Result,
    level_bump,
    log_context::LogContext,
    log_entry::{LogEntry, MessageBody},
    log_level::LogLevel,
};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Logger {
    name: String,
    threshold: Arc<RwLock<Arc<dyn LevelThreshold>>>,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    /// Context imprinted on every message; present only on scoped clones.
    scope: Option<LogContext>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: Arc::new(RwLock::new(Arc::new(LogLevel::Info))),
            appenders: Arc::new(RwLock::new(Vec::new())),
            scope: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the threshold with a fixed minimum level.
    pub fn set_min_level(&self, level: LogLevel) {
        *self.threshold.write() = Arc::new(level);
    }

    /// Install a threshold object; this is the level slot a
    /// [`super::ConditionalLevel`] plugs into.
    pub fn set_threshold(&self, threshold: impl LevelThreshold + 'static) {
        *self.threshold.write() = Arc::new(threshold);
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Whether a record at `level` would currently be accepted.
    ///
    /// Evaluates the threshold afresh on every call; a conditional threshold
    /// re-runs its predicate here. A panicking predicate unwinds through
    /// this check.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        let threshold = Arc::clone(&*self.threshold.read());
        level.severity() >= threshold.evaluate()
    }

    /// A clone of this logger that imprints `context` on every message.
    ///
    /// The clone shares this logger's threshold and appenders. On a logger
    /// that is already scoped, the contexts merge with the new one winning
    /// on key collisions.
    #[must_use]
    pub fn scoped(&self, context: LogContext) -> Logger {
        let scope = match &self.scope {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.merge_from(&context);
                merged
            }
            None => context,
        };
        Logger {
            name: self.name.clone(),
            threshold: Arc::clone(&self.threshold),
            appenders: Arc::clone(&self.appenders),
            scope: Some(scope),
        }
    }

    /// The scoped context on this logger, if it is a scoped clone.
    pub fn scope(&self) -> Option<&LogContext> {
        self.scope.as_ref()
    }

    /// Process one record.
    ///
    /// The acceptance check uses the requested severity; the bump policy
    /// then applies at record creation, so appender-level severity filters
    /// observe the bumped value.
    pub fn log_entry(&self, mut entry: LogEntry) {
        if !self.is_enabled(entry.level) {
            return;
        }

        entry.logger_name = self.name.clone();

        if let Some(scope) = &self.scope {
            imprint(&mut entry, scope);
        }

        entry.set_severity(level_bump::effective_severity(&self.name, entry.severity));

        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            if entry.severity < appender.min_severity() {
                continue;
            }
            if let Err(e) = appender.append(&entry) {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
            }
        }
    }

    pub fn log(&self, level: LogLevel, message: impl Into<MessageBody>) {
        self.log_entry(LogEntry::new(level, message));
    }

    /// Log with positional args for legacy percent-style placeholders.
    ///
    /// Accepted placeholders are `%s`, `%d`/`%i`, and `%f`, each taking
    /// optional `-`/`0` flags, a width, and a precision; `%%` is a literal
    /// percent. A message using anything else is emitted unsubstituted.
    pub fn log_with_args(
        &self,
        level: LogLevel,
        message: impl Into<MessageBody>,
        args: impl IntoIterator<Item = super::log_context::FieldValue>,
    ) {
        self.log_entry(LogEntry::new(level, message).with_args(args));
    }

    /// Log with structured context fields.
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<MessageBody>,
        context: LogContext,
    ) {
        self.log_entry(LogEntry::new(level, message).with_context(context));
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<MessageBody>) {
        self.log(LogLevel::Critical, message);
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<MessageBody>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    /// Helper for structured error logging
    pub fn error_with_context(&self, message: impl Into<MessageBody>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }
}

/// Imprint a scoped context onto a message body: key-merge for map messages
/// (context wins on collision), bracketed prefix for text messages.
fn imprint(entry: &mut LogEntry, scope: &LogContext) {
    match &mut entry.body {
        MessageBody::Map(map) => {
            for (key, value) in scope.fields() {
                map.insert(key.clone(), value.to_json_value());
            }
        }
        MessageBody::Text(text) => {
            *text = format!("{} {}", scope.format_bracketed(), text);
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use log_tuning::prelude::*;
///
/// let logger = Logger::builder("app")
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::with_colors(false))
///     .build();
/// logger.debug("builder works");
/// ```
pub struct LoggerBuilder {
    name: String,
    threshold: Arc<dyn LevelThreshold>,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: Arc::new(LogLevel::Info),
            appenders: Vec::new(),
        }
    }

    /// Set a fixed minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.threshold = Arc::new(level);
        self
    }

    /// Set a threshold object (e.g. a conditional level)
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: impl LevelThreshold + 'static) -> Self {
        self.threshold = Arc::new(threshold);
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            name: self.name,
            threshold: Arc::new(RwLock::new(self.threshold)),
            appenders: Arc::new(RwLock::new(self.appenders)),
            scope: None,
        }
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }
}
