// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text builders that turn log records into entry text.
//!
//! Every builder terminates its output with the platform line ending so
//! entries can be appended back to back.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::{LogLevel, ScopeStack};

const MESSAGE_PADDING: &str = "      ";

/// Line terminator written after every line of entry text.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator written after every line of entry text.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// A log call as seen by the text builders.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub category: &'a str,
    pub event_id: u32,
    pub message: &'a str,
    pub timestamp: DateTime<Utc>,
    pub scopes: &'a ScopeStack,
    pub error: Option<&'a (dyn std::error::Error + 'static)>,
}

/// Formats a record into `out`.
pub trait TextBuilder: Send + Sync + 'static {
    fn build(&self, record: &LogRecord<'_>, out: &mut String);
}

/// Human-readable multi-line (or single-line) text.
///
/// ```text
/// info: 2026-01-30T08:14:09.000Z app.worker[0]
///       => request 42 => db
///       connected
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextBuilder {
    pub single_line: bool,
}

impl PlainTextBuilder {
    pub fn single_line() -> Self {
        Self { single_line: true }
    }
}

impl TextBuilder for PlainTextBuilder {
    fn build(&self, record: &LogRecord<'_>, out: &mut String) {
        let ts = record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        let _ = write!(
            out,
            "{}: {} {}[{}]",
            record.level.short_label(),
            ts,
            record.category,
            record.event_id
        );

        if self.single_line {
            for scope in record.scopes.to_vec() {
                let _ = write!(out, " => {}", scope);
            }
            out.push(' ');
            push_single_line(out, record.message);
            if let Some(error) = record.error {
                out.push(' ');
                push_single_line(out, &error.to_string());
            }
            out.push_str(LINE_ENDING);
            return;
        }

        out.push_str(LINE_ENDING);
        if !record.scopes.is_empty() {
            out.push_str(MESSAGE_PADDING);
            for (i, scope) in record.scopes.to_vec().into_iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "=> {}", scope);
            }
            out.push_str(LINE_ENDING);
        }
        push_padded(out, record.message);
        if let Some(error) = record.error {
            push_padded(out, &error.to_string());
        }
    }
}

fn push_padded(out: &mut String, text: &str) {
    for line in text.lines() {
        out.push_str(MESSAGE_PADDING);
        out.push_str(line);
        out.push_str(LINE_ENDING);
    }
}

fn push_single_line(out: &mut String, text: &str) {
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(line);
    }
}

/// One JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTextBuilder;

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'static str,
    category: &'a str,
    event_id: u32,
    message: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scopes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TextBuilder for JsonTextBuilder {
    fn build(&self, record: &LogRecord<'_>, out: &mut String) {
        let json = JsonRecord {
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level: record.level.as_str(),
            category: record.category,
            event_id: record.event_id,
            message: record.message,
            scopes: record.scopes.to_vec(),
            error: record.error.map(|e| e.to_string()),
        };
        match serde_json::to_string(&json) {
            Ok(line) => out.push_str(&line),
            // Only reachable through a failing Serialize impl; keep the line.
            Err(e) => {
                let _ = write!(out, "{{\"serialization_error\":{:?}}}", e.to_string());
            }
        }
        out.push_str(LINE_ENDING);
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
