//! Integration tests for the tuning layer
//!
//! These tests verify:
//! - Severity bumping by logger name, including clamping
//! - Bumped records clearing appender thresholds
//! - Conditional thresholds reacting to live state
//! - Scoped context install and restore, including on panic
//! - Tolerant message formatting end to end

use log_tuning::core::level_bump;
use log_tuning::prelude::*;
use serial_test::serial;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn capture_logger(name: &str, min_level: LogLevel, template: &str) -> (Logger, MemoryBuffer) {
    let appender = MemoryAppender::new().with_formatter(ExtraFormatter::new(template));
    let buffer = appender.buffer();
    let logger = Logger::builder(name)
        .min_level(min_level)
        .appender(appender)
        .build();
    (logger, buffer)
}

#[test]
#[serial(bump_policy)]
fn test_bump_policy_raises_named_loggers_only() {
    level_bump::uninstall();
    let policy = LevelBumpPolicy::from_offsets([("bar", 10)]).unwrap();
    level_bump::install(policy);

    let (foo, foo_buf) = capture_logger("foo", LogLevel::Trace, "{levelno}:{levelname} {message}");
    let (bar, bar_buf) = capture_logger("bar", LogLevel::Trace, "{levelno}:{levelname} {message}");

    foo.info("unchanged");
    bar.info("promoted to warning");
    bar.warn("promoted to error");
    bar.critical("already at the top");

    assert_eq!(foo_buf.lines(), vec!["20:INFO unchanged"]);
    assert_eq!(
        bar_buf.lines(),
        vec![
            "30:WARN promoted to warning",
            "40:ERROR promoted to error",
            "50:CRITICAL already at the top",
        ]
    );

    level_bump::uninstall();
}

#[test]
#[serial(bump_policy)]
fn test_bumped_record_clears_appender_threshold() {
    level_bump::uninstall();
    level_bump::install(LevelBumpPolicy::from_offsets([("svc", 10)]).unwrap());

    let appender = MemoryAppender::new()
        .with_formatter(ExtraFormatter::new("{message}"))
        .with_min_level(LogLevel::Warn);
    let buffer = appender.buffer();
    let logger = Logger::builder("svc")
        .min_level(LogLevel::Trace)
        .appender(appender)
        .build();

    // Requested at INFO, which the appender would drop; the bump lands it
    // at WARN before the appender sees it.
    logger.info("visible only because of the bump");

    assert_eq!(buffer.lines(), vec!["visible only because of the bump"]);

    level_bump::uninstall();
}

#[test]
#[serial(bump_policy)]
fn test_empty_policy_installs_nothing() {
    level_bump::uninstall();
    level_bump::install(LevelBumpPolicy::new());

    assert!(!level_bump::is_installed());
    assert_eq!(level_bump::effective_severity("any", 20), 20);
}

#[test]
#[serial(bump_policy)]
fn test_reinstall_replaces_whole_policy() {
    level_bump::uninstall();
    level_bump::install(LevelBumpPolicy::from_offsets([("a", 10), ("b", 20)]).unwrap());
    level_bump::install(LevelBumpPolicy::from_offsets([("a", 5)]).unwrap());

    assert_eq!(level_bump::effective_severity("a", 20), 25);
    // "b" was only in the replaced policy
    assert_eq!(level_bump::effective_severity("b", 20), 20);

    level_bump::uninstall();
}

#[test]
fn test_conditional_threshold_reacts_live() {
    let verbose = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&verbose);

    let appender = MemoryAppender::new().with_formatter(ExtraFormatter::new("{message}"));
    let buffer = appender.buffer();
    let logger = Logger::builder("app")
        .threshold(ConditionalLevel::new(
            LogLevel::Debug,
            LogLevel::Warn,
            move || flag.load(Ordering::Relaxed),
        ))
        .appender(appender)
        .build();

    logger.debug("dropped, flag off");
    logger.warn("kept, meets off level");

    verbose.store(true, Ordering::Relaxed);
    logger.debug("kept, flag on");

    verbose.store(false, Ordering::Relaxed);
    logger.debug("dropped again");

    assert_eq!(buffer.lines(), vec!["kept, meets off level", "kept, flag on"]);
}

struct RequestHandler {
    logger: LoggerCell,
}

impl HasLogger for RequestHandler {
    fn logger_cell(&self) -> &LoggerCell {
        &self.logger
    }
}

#[test]
fn test_with_context_imprints_and_restores() {
    let appender = MemoryAppender::new().with_formatter(ExtraFormatter::new("{message}"));
    let buffer = appender.buffer();
    let handler = RequestHandler {
        logger: LoggerCell::with_logger(
            Logger::builder("handler")
                .min_level(LogLevel::Trace)
                .appender(appender)
                .build(),
        ),
    };
    let original = handler.logger();

    with_context(
        &handler,
        || LogContext::new().with_field("request_id", "r-42"),
        |h| {
            h.logger().info("processing");

            let mut map = serde_json::Map::new();
            map.insert("event".to_string(), serde_json::json!("done"));
            h.logger().info(map);
        },
    );
    handler.logger().info("out of scope");

    let lines = buffer.lines();
    assert_eq!(lines[0], "[request_id: r-42] processing");
    let parsed: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(parsed["event"], "done");
    assert_eq!(parsed["request_id"], "r-42");
    assert_eq!(lines[2], "out of scope");
    assert!(Arc::ptr_eq(&original, &handler.logger()));
}

#[test]
fn test_default_logger_persists_after_scope() {
    let handler = RequestHandler {
        logger: LoggerCell::new(),
    };

    with_context(
        &handler,
        || LogContext::new().with_field("request_id", "r-9"),
        |h| h.logger().info("handled"),
    );

    // An owner that entered the scope without a logger keeps the default
    // constructed at entry, named after the owner type and unscoped.
    let installed = handler
        .logger_cell()
        .get()
        .expect("default logger stays installed");
    assert_eq!(installed.name(), "RequestHandler");
    assert!(installed.scope().is_none());
}

#[test]
fn test_scoped_logger_restored_after_panic() {
    let handler = RequestHandler {
        logger: LoggerCell::with_logger(Logger::new("handler")),
    };
    let original = handler.logger();

    let result = catch_unwind(AssertUnwindSafe(|| {
        with_context(
            &handler,
            || LogContext::new().with_field("request_id", "r-1"),
            |_| panic!("handler blew up"),
        );
    }));

    assert!(result.is_err());
    assert!(Arc::ptr_eq(&original, &handler.logger()));
}

#[test]
fn test_substitution_end_to_end() {
    let (logger, buffer) = capture_logger("fmt", LogLevel::Trace, "{message}");

    logger.log_with_args(LogLevel::Info, "loaded %d rows from %s", vec![12.into(), "users".into()]);
    logger.log_with_context(
        LogLevel::Info,
        "user {user} from {ip}",
        LogContext::new()
            .with_field("user", "alice")
            .with_field("ip", "10.0.0.1"),
    );
    // Not enough args: the message goes through as written
    logger.log_with_args(LogLevel::Info, "broken %s %s", vec!["only-one".into()]);

    assert_eq!(
        buffer.lines(),
        vec![
            "loaded 12 rows from users",
            "user alice from 10.0.0.1",
            "broken %s %s",
        ]
    );
}

#[test]
fn test_template_renders_name_and_level() {
    let (logger, buffer) = capture_logger(
        "app.db",
        LogLevel::Trace,
        "{name} - [{levelname}] - {message}",
    );

    logger.warn("pool exhausted");

    assert_eq!(buffer.lines(), vec!["app.db - [WARN] - pool exhausted"]);
}

#[test]
fn test_elapsed_time_lands_in_context() {
    let (logger, buffer) = capture_logger("timing", LogLevel::Trace, "{message}");

    let mut context = LogContext::new().with_field("job", "sync");
    {
        let _timer = ElapsedTimer::start(&mut context);
    }
    logger.log_with_context(LogLevel::Info, "job {job} took {elapsed_time}ms", context.clone());

    let lines = buffer.lines();
    assert!(lines[0].starts_with("job sync took "));
    assert!(lines[0].ends_with("ms"));
    assert!(context.get("elapsed_time").is_some());
}
