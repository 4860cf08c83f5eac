// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared logger context.
//!
//! One context is shared by every processor of a host. It owns the
//! shutdown signal, the clock, retry and completion timing, and the
//! diagnostic sink, and it tracks outstanding drains so the host can wait
//! for them before exiting.

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use fl_core::{
    Clock, DiagnosticEvent, LoggerOptions, SystemClock, DEFAULT_COMPLETION_TIMEOUT,
    DEFAULT_WRITE_RETRY_DELAY,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Awaitable completion of one drain cycle.
///
/// Cloning is cheap; every clone resolves at the same time.
#[derive(Debug, Clone)]
pub struct DrainHandle {
    done: watch::Receiver<bool>,
}

impl DrainHandle {
    pub(crate) fn pending() -> (Self, watch::Sender<bool>) {
        let (tx, done) = watch::channel(false);
        (Self { done }, tx)
    }

    /// A handle that is already complete.
    pub fn completed() -> Self {
        let (_, done) = watch::channel(true);
        Self { done }
    }

    pub fn is_complete(&self) -> bool {
        *self.done.borrow() || self.done.has_changed().is_err()
    }

    /// Wait until the drain finished or was forced.
    pub async fn wait(&self) {
        let mut done = self.done.clone();
        // A dropped sender means the drain task is gone.
        let _ = done.wait_for(|done| *done).await;
    }
}

struct Completion {
    processor: String,
    handle: DrainHandle,
}

/// Settings and signals shared by all processors.
pub struct FileLoggerContext {
    shutdown: CancellationToken,
    clock: Arc<dyn Clock>,
    write_retry_delay: Duration,
    completion_timeout: Duration,
    diagnostics: Arc<dyn DiagnosticSink>,
    tasks: TaskTracker,
    completions: Mutex<Vec<Completion>>,
}

impl Default for FileLoggerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileLoggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLoggerContext")
            .field("shutdown_requested", &self.shutdown.is_cancelled())
            .field("write_retry_delay", &self.write_retry_delay)
            .field("completion_timeout", &self.completion_timeout)
            .finish_non_exhaustive()
    }
}

impl FileLoggerContext {
    pub fn new() -> Self {
        Self {
            shutdown: CancellationToken::new(),
            clock: Arc::new(SystemClock),
            write_retry_delay: DEFAULT_WRITE_RETRY_DELAY,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            diagnostics: Arc::new(TracingDiagnostics),
            tasks: TaskTracker::new(),
            completions: Mutex::new(Vec::new()),
        }
    }

    /// Context with the timing configured in `options`.
    pub fn from_options(options: &LoggerOptions) -> Self {
        Self::new()
            .with_write_retry_delay(options.write_retry_delay())
            .with_completion_timeout(options.completion_timeout())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_write_retry_delay(mut self, delay: Duration) -> Self {
        self.write_retry_delay = delay;
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn write_retry_delay(&self) -> Duration {
        self.write_retry_delay
    }

    pub fn completion_timeout(&self) -> Duration {
        self.completion_timeout
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Signal shutdown. Processors stop accepting entries and drain.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::debug!("file logger shutdown requested");
        }
        self.shutdown.cancel();
    }

    /// Signal shutdown and wait for every processor's final drain.
    pub async fn shutdown_and_wait(&self) {
        self.shutdown();
        self.tasks.close();
        self.tasks.wait().await;
        self.wait_for_completion().await;
    }

    pub(crate) fn emit(&self, event: DiagnosticEvent) {
        self.diagnostics.emit(&event);
    }

    pub(crate) fn diagnostics(&self) -> Arc<dyn DiagnosticSink> {
        Arc::clone(&self.diagnostics)
    }

    pub(crate) fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    /// Record a drain started by `processor`. Finished drains are pruned.
    pub fn on_complete(&self, processor: &str, handle: DrainHandle) {
        let mut completions = self.completions.lock();
        completions.retain(|c| !c.handle.is_complete());
        completions.push(Completion {
            processor: processor.to_string(),
            handle,
        });
    }

    /// Names of processors with a drain still in progress.
    pub fn pending_completions(&self) -> Vec<String> {
        self.completions
            .lock()
            .iter()
            .filter(|c| !c.handle.is_complete())
            .map(|c| c.processor.clone())
            .collect()
    }

    /// Wait for every drain recorded so far.
    pub async fn wait_for_completion(&self) {
        let handles: Vec<DrainHandle> = self
            .completions
            .lock()
            .iter()
            .map(|c| c.handle.clone())
            .collect();
        for handle in handles {
            handle.wait().await;
        }
        self.completions.lock().retain(|c| !c.handle.is_complete());
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
