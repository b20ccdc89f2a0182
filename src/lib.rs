//! # Log Tuning
//!
//! A convenience layer over a structured logging core that makes loggers
//! tunable at runtime without touching call sites.
//!
//! ## Features
//!
//! - **Conditional Levels**: thresholds that re-evaluate a predicate on
//!   every read, so feature flags can retune verbosity live
//! - **Level Bumping**: a process-wide policy that raises the severity of
//!   records from named loggers, clamped at the top of the scale
//! - **Tolerant Formatting**: percent-style and `{named}` substitution with
//!   a graceful fallback instead of a hard failure
//! - **Scoped Contexts**: temporarily replace an owner's logger with one
//!   that imprints context fields on every message, restored on exit
//!
//! ## Quick Start
//!
//! ```
//! use log_tuning::prelude::*;
//!
//! let logger = Logger::builder("app")
//!     .min_level(LogLevel::Debug)
//!     .appender(ConsoleAppender::with_colors(false))
//!     .build();
//!
//! logger.info("Application started");
//! logger.log_with_context(
//!     LogLevel::Info,
//!     "user {user} logged in",
//!     LogContext::new().with_field("user", "alice"),
//! );
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, MemoryBuffer};
    pub use crate::core::{
        with_context, Appender, ConditionalLevel, ElapsedTimer, ExtraFormatter, FieldValue,
        Formatter, HasLogger, LevelBumpPolicy, LevelThreshold, LogContext, LogEntry, LogLevel,
        Logger, LoggerBuilder, LoggerCell, LoggerError, MessageBody, Result, ScopedContext,
        Severity, TimestampFormat, DEFAULT_TEMPLATE, MAX_SEVERITY,
    };
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender, MemoryBuffer};
pub use crate::core::{
    with_context, Appender, ConditionalLevel, ElapsedTimer, ExtraFormatter, FieldValue, Formatter,
    HasLogger, LevelBumpPolicy, LevelThreshold, LogContext, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerCell, LoggerError, MessageBody, Result, ScopedContext, Severity,
    TimestampFormat, DEFAULT_TEMPLATE, MAX_SEVERITY,
};
