//! Tolerant multi-style message formatting
//!
//! [`ExtraFormatter`] renders a final text line from a log entry. It accepts
//! the message shapes callers actually produce: plain text, text with legacy
//! percent-style placeholders fed by positional args, text with modern
//! `{name}` placeholders fed by the entry's context fields, and map-shaped
//! structured messages. Any substitution failure falls back to the message
//! as received, literal placeholders and all; a broken log statement must
//! never crash the code path that emitted it.

use super::error::{LoggerError, Result};
use super::log_context::{FieldValue, LogContext};
use super::log_entry::{LogEntry, MessageBody};
use super::timestamp::TimestampFormat;

/// Default line template, in the `{field}` style.
///
/// `{message}` is the rendered message; the remaining fields are filled from
/// the entry by the formatter. Unknown fields are left literal.
pub const DEFAULT_TEMPLATE: &str = "{asctime} - {name} - [{levelname}] - {message}";

/// Renders a log entry to its final text form.
///
/// This is the installation seam for appenders: anything exposing
/// `format(&LogEntry) -> String` can be dropped into an appender slot.
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> String;
}

pub struct ExtraFormatter {
    template: String,
    timestamp_format: TimestampFormat,
}

impl ExtraFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render just the message portion of an entry.
    ///
    /// Resolution order:
    /// 1. Map messages skip placeholder substitution entirely; context
    ///    fields are merged into a copy (context wins on collision) and the
    ///    result is rendered as JSON.
    /// 2. Text messages with positional args get percent substitution.
    /// 3. `{name}` placeholders in the (possibly percent-substituted) text
    ///    are filled from context fields.
    /// 4. A failure in either substitution step returns the message as it
    ///    stood before that step.
    pub fn render_message(&self, entry: &LogEntry) -> String {
        match &entry.body {
            MessageBody::Map(map) => render_map(map, entry.context.as_ref()),
            MessageBody::Text(text) => render_text(text, &entry.args, entry.context.as_ref()),
        }
    }
}

impl Default for ExtraFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Formatter for ExtraFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let message = self.render_message(entry);
        self.template
            .replace("{asctime}", &self.timestamp_format.format(&entry.timestamp))
            .replace("{name}", &entry.logger_name)
            .replace("{levelname}", entry.level.to_str())
            .replace("{levelno}", &entry.severity.to_string())
            .replace("{message}", &message)
    }
}

fn render_map(
    map: &serde_json::Map<String, serde_json::Value>,
    context: Option<&LogContext>,
) -> String {
    let merged = match context {
        Some(ctx) if !ctx.is_empty() => {
            let mut copy = map.clone();
            for (key, value) in ctx.fields() {
                copy.insert(key.clone(), value.to_json_value());
            }
            copy
        }
        _ => map.clone(),
    };
    serde_json::to_string(&serde_json::Value::Object(merged)).unwrap_or_default()
}

fn render_text(text: &str, args: &[FieldValue], context: Option<&LogContext>) -> String {
    let mut message = text.to_string();

    if !args.is_empty() {
        match percent_substitute(&message, args) {
            Ok(substituted) => message = substituted,
            // Argument mismatch: emit the message exactly as received.
            Err(_) => return message,
        }
    }

    if let Some(ctx) = context {
        if !ctx.is_empty() {
            if let Ok(substituted) = named_substitute(&message, ctx) {
                message = substituted;
            }
            // Missing field or malformed placeholder: keep the message as it
            // stood before named substitution.
        }
    }

    message
}

/// A parsed `%[-0][width][.precision]` prefix.
#[derive(Default)]
struct PercentSpec {
    left_align: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
}

impl PercentSpec {
    fn pad(&self, value: String, numeric: bool) -> String {
        let len = value.chars().count();
        if len >= self.width {
            return value;
        }
        let fill = self.width - len;
        if self.left_align {
            format!("{}{}", value, " ".repeat(fill))
        } else if self.zero_pad && numeric {
            // Zeros go between the sign and the digits.
            match value.strip_prefix('-') {
                Some(rest) => format!("-{}{}", "0".repeat(fill), rest),
                None => format!("{}{}", "0".repeat(fill), value),
            }
        } else {
            format!("{}{}", " ".repeat(fill), value)
        }
    }
}

/// Precision on an integer conversion means a minimum digit count.
fn zero_pad_digits(value: i64, min_digits: usize) -> String {
    let digits = value.unsigned_abs().to_string();
    let padded = if digits.len() < min_digits {
        format!("{}{}", "0".repeat(min_digits - digits.len()), digits)
    } else {
        digits
    };
    if value < 0 {
        format!("-{}", padded)
    } else {
        padded
    }
}

/// Legacy percent-style substitution.
///
/// Accepted subset: `%%` and `%[-0][width][.precision]` followed by `s`
/// (any value, precision truncates), `d`/`i` (integer only, precision is a
/// minimum digit count), or `f` (number, precision is decimal places,
/// default six). Strict about everything else so the caller can fall back:
/// too few or leftover args, type mismatches, and conversions outside the
/// subset are all errors.
fn percent_substitute(text: &str, args: &[FieldValue]) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut remaining = args.iter();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = PercentSpec::default();
        loop {
            match chars.peek() {
                Some('-') => spec.left_align = true,
                Some('0') => spec.zero_pad = true,
                _ => break,
            }
            chars.next();
        }
        while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
            spec.width = spec.width * 10 + digit as usize;
            chars.next();
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = 0usize;
            let mut any_digits = false;
            while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
                precision = precision * 10 + digit as usize;
                any_digits = true;
                chars.next();
            }
            if !any_digits {
                return Err(LoggerError::formatter("percent", "precision with no digits"));
            }
            spec.precision = Some(precision);
        }

        match chars.next() {
            Some('s') => {
                let arg = remaining
                    .next()
                    .ok_or_else(|| LoggerError::formatter("percent", "not enough arguments"))?;
                let mut value = arg.to_string();
                if let Some(precision) = spec.precision {
                    value = value.chars().take(precision).collect();
                }
                out.push_str(&spec.pad(value, false));
            }
            Some(conv @ ('d' | 'i')) => match remaining.next() {
                Some(FieldValue::Int(i)) => {
                    let digits = match spec.precision {
                        Some(min_digits) => zero_pad_digits(*i, min_digits),
                        None => i.to_string(),
                    };
                    out.push_str(&spec.pad(digits, true));
                }
                Some(other) => {
                    return Err(LoggerError::formatter(
                        "percent",
                        format!("%{} requires an integer, got {}", conv, other),
                    ))
                }
                None => return Err(LoggerError::formatter("percent", "not enough arguments")),
            },
            Some('f') => {
                let places = spec.precision.unwrap_or(6);
                match remaining.next() {
                    Some(FieldValue::Float(f)) => {
                        out.push_str(&spec.pad(format!("{:.*}", places, f), true));
                    }
                    Some(FieldValue::Int(i)) => {
                        out.push_str(&spec.pad(format!("{:.*}", places, *i as f64), true));
                    }
                    Some(other) => {
                        return Err(LoggerError::formatter(
                            "percent",
                            format!("%f requires a number, got {}", other),
                        ))
                    }
                    None => return Err(LoggerError::formatter("percent", "not enough arguments")),
                }
            }
            Some(other) => {
                return Err(LoggerError::formatter(
                    "percent",
                    format!("unsupported conversion '%{}'", other),
                ))
            }
            None => return Err(LoggerError::formatter("percent", "trailing '%'")),
        }
    }

    if remaining.next().is_some() {
        return Err(LoggerError::formatter(
            "percent",
            "not all arguments converted",
        ));
    }
    Ok(out)
}

/// Modern `{name}` substitution from context fields.
///
/// `{{` and `}}` are literal braces. All-or-nothing: a placeholder with no
/// matching field, or unbalanced braces, is an error and the caller keeps
/// the unsubstituted message.
fn named_substitute(text: &str, context: &LogContext) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(LoggerError::formatter(
                                "named",
                                format!("unterminated placeholder '{{{}'", name),
                            ))
                        }
                    }
                }
                let value = context.get(&name).ok_or_else(|| {
                    LoggerError::formatter("named", format!("no field named '{}'", name))
                })?;
                out.push_str(&value.to_string());
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(LoggerError::formatter("named", "unmatched '}'"));
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
