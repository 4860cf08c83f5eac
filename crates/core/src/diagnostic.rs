// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic events raised by the write pipeline.
//!
//! These describe internal conditions (drops, failed writes, forced
//! shutdown) and are never surfaced to logging callers as errors.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::LogFileEntry;

/// Structured notification describing an internal pipeline condition.
#[derive(Debug, Clone)]
pub enum DiagnosticEvent {
    /// Queue draining exceeded the completion timeout and was cancelled.
    QueuesCompletionForced,
    /// An entry was discarded because its file's queue was full.
    LogEntryDropped { file: String, entry: LogFileEntry },
    /// An entry could not be written before its generation ended.
    LogEntryWriteFailed {
        file: String,
        entry: LogFileEntry,
        error: Arc<io::Error>,
    },
}

impl DiagnosticEvent {
    /// Stable event name for structured sinks.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticEvent::QueuesCompletionForced => "queues_completion_forced",
            DiagnosticEvent::LogEntryDropped { .. } => "log_entry_dropped",
            DiagnosticEvent::LogEntryWriteFailed { .. } => "log_entry_write_failed",
        }
    }

    /// File id the event refers to, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            DiagnosticEvent::QueuesCompletionForced => None,
            DiagnosticEvent::LogEntryDropped { file, .. }
            | DiagnosticEvent::LogEntryWriteFailed { file, .. } => Some(file),
        }
    }

    pub fn error(&self) -> Option<&io::Error> {
        match self {
            DiagnosticEvent::LogEntryWriteFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::QueuesCompletionForced => {
                f.write_str("completion of log file queues was forced after timeout")
            }
            DiagnosticEvent::LogEntryDropped { file, entry } => write!(
                f,
                "log entry created at {} was dropped because the queue of \"{}\" is full: {}",
                entry.timestamp().to_rfc3339(),
                file,
                entry.text().trim_end()
            ),
            DiagnosticEvent::LogEntryWriteFailed { file, entry, error } => write!(
                f,
                "writing log entry created at {} to \"{}\" failed ({}): {}",
                entry.timestamp().to_rfc3339(),
                file,
                error,
                entry.text().trim_end()
            ),
        }
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
