//! Core logging functionality

pub mod appender;
pub mod conditional_level;
pub mod error;
pub mod formatter;
pub mod level_bump;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod scoped_context;
pub mod timestamp;
pub mod timing;

pub use appender::Appender;
pub use conditional_level::{ConditionalLevel, LevelThreshold};
pub use error::{LoggerError, Result};
pub use formatter::{ExtraFormatter, Formatter, DEFAULT_TEMPLATE};
pub use level_bump::LevelBumpPolicy;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{LogEntry, MessageBody};
pub use log_level::{LogLevel, Severity, MAX_SEVERITY};
pub use logger::{Logger, LoggerBuilder};
pub use scoped_context::{with_context, HasLogger, LoggerCell, ScopedContext};
pub use timestamp::TimestampFormat;
pub use timing::ElapsedTimer;
