//! Error types for the log tuning layer

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error from an appender write or flush
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration, surfaced at install time
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Message formatting failure.
    ///
    /// Never escapes the formatter: any substitution error is caught and the
    /// unformatted message is emitted instead. The variant exists so failure
    /// sites can name what went wrong on the recovery path.
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }
}
