// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic sinks.
//!
//! The pipeline never reports write problems to logging callers. Instead it
//! emits a [`DiagnosticEvent`] to the context's sink.

use fl_core::DiagnosticEvent;

/// Receives diagnostic events. Implementations must not block.
pub trait DiagnosticSink: Send + Sync + 'static {
    fn emit(&self, event: &DiagnosticEvent);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DiagnosticEvent) + Send + Sync + 'static,
{
    fn emit(&self, event: &DiagnosticEvent) {
        self(event)
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::QueuesCompletionForced => {
                tracing::warn!(event = event.name(), "{}", event);
            }
            DiagnosticEvent::LogEntryDropped { file, .. } => {
                tracing::warn!(event = event.name(), file = %file, "{}", event);
            }
            DiagnosticEvent::LogEntryWriteFailed { file, error, .. } => {
                tracing::error!(
                    event = event.name(),
                    file = %file,
                    error = %error,
                    "{}",
                    event
                );
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod recording {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::DiagnosticSink;
    use fl_core::DiagnosticEvent;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Sink that keeps every event for later assertions.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingDiagnostics {
        events: Arc<Mutex<Vec<DiagnosticEvent>>>,
    }

    impl RecordingDiagnostics {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<DiagnosticEvent> {
            self.events.lock().clone()
        }

        /// Number of recorded events with the given name.
        pub fn count(&self, name: &str) -> usize {
            self.events
                .lock()
                .iter()
                .filter(|event| event.name() == name)
                .count()
        }

        pub fn clear(&self) {
            self.events.lock().clear();
        }
    }

    impl DiagnosticSink for RecordingDiagnostics {
        fn emit(&self, event: &DiagnosticEvent) {
            self.events.lock().push(event.clone());
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingDiagnostics;

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
