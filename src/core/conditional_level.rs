//! Conditional level thresholds
//!
//! A logger's acceptance threshold is anything implementing
//! [`LevelThreshold`]. A plain [`LogLevel`] is the static case;
//! [`ConditionalLevel`] re-evaluates a runtime predicate on every read, so a
//! feature flag (or any other shared state) can retune a logger without the
//! logger being reconfigured.

use super::log_level::{LogLevel, Severity};

/// A severity threshold read by the logger on every acceptance check.
///
/// Implementations are compared by explicit numeric conversion at the use
/// site: the logger asks for `evaluate()` and compares severities, never
/// caching the result.
pub trait LevelThreshold: Send + Sync {
    /// The severity below which records are rejected, as of right now.
    fn evaluate(&self) -> Severity;
}

/// A fixed level is the simplest threshold.
impl LevelThreshold for LogLevel {
    fn evaluate(&self) -> Severity {
        self.severity()
    }
}

/// A threshold that flips between two levels based on a predicate.
///
/// Every evaluation invokes the predicate with no arguments: truthy selects
/// `on`, otherwise `off`. Nothing is cached, so two reads separated by a
/// state change observed by the predicate return different values.
///
/// A panicking predicate unwinds through the acceptance check rather than
/// being swallowed; a filtering decision made on a broken predicate would be
/// unsound.
///
/// # Example
///
/// ```
/// use log_tuning::core::{ConditionalLevel, LevelThreshold, LogLevel};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let verbose = Arc::new(AtomicBool::new(true));
/// let flag = Arc::clone(&verbose);
/// let level = ConditionalLevel::new(LogLevel::Debug, LogLevel::Warn, move || {
///     flag.load(Ordering::Relaxed)
/// });
///
/// assert_eq!(level.evaluate(), LogLevel::Debug.severity());
/// verbose.store(false, Ordering::Relaxed);
/// assert_eq!(level.evaluate(), LogLevel::Warn.severity());
/// ```
pub struct ConditionalLevel {
    on: LogLevel,
    off: LogLevel,
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
}

impl ConditionalLevel {
    pub fn new(
        on: LogLevel,
        off: LogLevel,
        predicate: impl Fn() -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            on,
            off,
            predicate: Box::new(predicate),
        }
    }

    /// The level currently selected by the predicate.
    pub fn current(&self) -> LogLevel {
        if (self.predicate)() {
            self.on
        } else {
            self.off
        }
    }
}

impl LevelThreshold for ConditionalLevel {
    fn evaluate(&self) -> Severity {
        self.current().severity()
    }
}

impl std::fmt::Debug for ConditionalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionalLevel")
            .field("on", &self.on)
            .field("off", &self.off)
            .finish_non_exhaustive()
    }
}
