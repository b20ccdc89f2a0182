//! Criterion benchmarks for message formatting

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use log_tuning::prelude::*;

fn bench_render_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_message");
    group.throughput(Throughput::Elements(1));

    let formatter = ExtraFormatter::new("{message}");

    let plain = LogEntry::new(LogLevel::Info, "nothing to substitute here");
    group.bench_function("plain_text", |b| {
        b.iter(|| black_box(formatter.render_message(black_box(&plain))));
    });

    let percent = LogEntry::new(LogLevel::Info, "loaded %d rows from %s in %f seconds")
        .with_args(vec![1024.into(), "users".into(), 0.25.into()]);
    group.bench_function("percent_style", |b| {
        b.iter(|| black_box(formatter.render_message(black_box(&percent))));
    });

    let named = LogEntry::new(LogLevel::Info, "user {user} from {ip} did {action}").with_context(
        LogContext::new()
            .with_field("user", "alice")
            .with_field("ip", "10.0.0.1")
            .with_field("action", "login"),
    );
    group.bench_function("named_fields", |b| {
        b.iter(|| black_box(formatter.render_message(black_box(&named))));
    });

    let mut map = serde_json::Map::new();
    map.insert("event".to_string(), serde_json::json!("login"));
    map.insert("user".to_string(), serde_json::json!("alice"));
    let map_entry = LogEntry::new(LogLevel::Info, map)
        .with_context(LogContext::new().with_field("request_id", "r-1"));
    group.bench_function("map_body", |b| {
        b.iter(|| black_box(formatter.render_message(black_box(&map_entry))));
    });

    group.finish();
}

fn bench_full_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_line");
    group.throughput(Throughput::Elements(1));

    let formatter = ExtraFormatter::default();
    let entry = LogEntry::new(LogLevel::Warn, "pool exhausted").with_logger_name("app.db");

    group.bench_function("default_template", |b| {
        b.iter(|| black_box(formatter.format(black_box(&entry))));
    });

    group.finish();
}

criterion_group!(benches, bench_render_message, bench_full_line);
criterion_main!(benches);
