// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn record<'a>(scopes: &'a ScopeStack, message: &'a str) -> LogRecord<'a> {
    LogRecord {
        level: LogLevel::Information,
        category: "app.worker",
        event_id: 7,
        message,
        timestamp: Utc.with_ymd_and_hms(2026, 1, 30, 8, 14, 9).unwrap(),
        scopes,
        error: None,
    }
}

#[test]
fn plain_multi_line_layout() {
    let scopes = ScopeStack::new().push("request 42").push("db");
    let mut out = String::new();
    PlainTextBuilder::default().build(&record(&scopes, "connected"), &mut out);

    assert_eq!(
        out,
        "info: 2026-01-30T08:14:09.000Z app.worker[7]\n      => request 42 => db\n      connected\n"
    );
}

#[test]
fn plain_without_scopes_skips_scope_line() {
    let scopes = ScopeStack::new();
    let mut out = String::new();
    PlainTextBuilder::default().build(&record(&scopes, "first\nsecond"), &mut out);

    assert_eq!(
        out,
        "info: 2026-01-30T08:14:09.000Z app.worker[7]\n      first\n      second\n"
    );
}

#[test]
fn plain_single_line_layout() {
    let scopes = ScopeStack::new().push("req");
    let mut out = String::new();
    PlainTextBuilder::single_line().build(&record(&scopes, "a\nb"), &mut out);

    assert_eq!(out, "info: 2026-01-30T08:14:09.000Z app.worker[7] => req a b\n");
}

#[test]
fn plain_includes_error() {
    let scopes = ScopeStack::new();
    let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let mut rec = record(&scopes, "failed");
    rec.level = LogLevel::Error;
    rec.error = Some(&error);

    let mut out = String::new();
    PlainTextBuilder::default().build(&rec, &mut out);
    assert!(out.starts_with("fail: "));
    assert!(out.ends_with("      failed\n      boom\n"), "{out}");
}

#[test]
fn json_emits_one_object_per_line() {
    let scopes = ScopeStack::new().push("req");
    let mut out = String::new();
    JsonTextBuilder.build(&record(&scopes, "line \"one\"\nline two"), &mut out);

    assert!(out.ends_with('\n'));
    assert_eq!(out.matches('\n').count(), 1);

    let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(value["level"], "information");
    assert_eq!(value["category"], "app.worker");
    assert_eq!(value["event_id"], 7);
    assert_eq!(value["message"], "line \"one\"\nline two");
    assert_eq!(value["scopes"], serde_json::json!(["req"]));
    assert!(value.get("error").is_none());
}

#[test]
fn builders_append_to_existing_buffer() {
    let scopes = ScopeStack::new();
    let mut out = String::from("x");
    JsonTextBuilder.build(&record(&scopes, "m"), &mut out);
    assert!(out.starts_with("x{"));
}

#[test]
fn builders_end_lines_with_platform_terminator() {
    let scopes = ScopeStack::new().push("s");
    let builders: [&dyn TextBuilder; 3] = [
        &PlainTextBuilder::default(),
        &PlainTextBuilder::single_line(),
        &JsonTextBuilder,
    ];
    for builder in builders {
        let mut out = String::new();
        builder.build(&record(&scopes, "a\nb"), &mut out);
        assert!(out.ends_with(LINE_ENDING), "{:?}", out);
        assert_eq!(out.matches(LINE_ENDING).count(), out.matches('\n').count());
    }
}
