// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file write queue and its single worker.

use crate::diagnostics::DiagnosticSink;
use crate::log_file::LogFile;
use crate::path::PathStrategy;
use fl_core::{DiagnosticEvent, LogFileEntry};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

/// Why an entry could not be queued.
#[derive(Debug)]
pub(crate) enum PostError {
    Full(LogFileEntry),
    Closed(LogFileEntry),
}

/// Producer side of a file queue.
#[derive(Debug, Clone)]
pub(crate) enum QueueSender {
    Bounded(mpsc::Sender<LogFileEntry>),
    Unbounded(mpsc::UnboundedSender<LogFileEntry>),
}

impl QueueSender {
    /// Queue `entry` without waiting.
    pub(crate) fn try_post(&self, entry: LogFileEntry) -> Result<(), PostError> {
        match self {
            QueueSender::Bounded(tx) => tx.try_send(entry).map_err(|err| match err {
                TrySendError::Full(entry) => PostError::Full(entry),
                TrySendError::Closed(entry) => PostError::Closed(entry),
            }),
            QueueSender::Unbounded(tx) => tx.send(entry).map_err(|err| PostError::Closed(err.0)),
        }
    }
}

/// Consumer side of a file queue.
#[derive(Debug)]
pub(crate) enum QueueReceiver {
    Bounded(mpsc::Receiver<LogFileEntry>),
    Unbounded(mpsc::UnboundedReceiver<LogFileEntry>),
}

impl QueueReceiver {
    pub(crate) async fn recv(&mut self) -> Option<LogFileEntry> {
        match self {
            QueueReceiver::Bounded(rx) => rx.recv().await,
            QueueReceiver::Unbounded(rx) => rx.recv().await,
        }
    }

    pub(crate) fn try_recv(&mut self) -> Option<LogFileEntry> {
        match self {
            QueueReceiver::Bounded(rx) => rx.try_recv().ok(),
            QueueReceiver::Unbounded(rx) => rx.try_recv().ok(),
        }
    }

    pub(crate) fn close(&mut self) {
        match self {
            QueueReceiver::Bounded(rx) => rx.close(),
            QueueReceiver::Unbounded(rx) => rx.close(),
        }
    }
}

/// Create a queue; a capacity of 0 means unbounded.
pub(crate) fn channel(capacity: usize) -> (QueueSender, QueueReceiver) {
    if capacity == 0 {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueueSender::Unbounded(tx), QueueReceiver::Unbounded(rx))
    } else {
        let (tx, rx) = mpsc::channel(capacity);
        (QueueSender::Bounded(tx), QueueReceiver::Bounded(rx))
    }
}

/// Drains one file queue, writing entries in order.
pub(crate) struct QueueWorker {
    pub(crate) file: LogFile,
    pub(crate) entries: QueueReceiver,
    /// Token of the generation the queue was created in.
    pub(crate) generation: CancellationToken,
    pub(crate) strategy: Arc<dyn PathStrategy>,
    pub(crate) retry_delay: Duration,
    pub(crate) diagnostics: Arc<dyn DiagnosticSink>,
}

impl QueueWorker {
    /// Run until the queue is closed and empty, or the generation is
    /// cancelled.
    pub(crate) async fn run(mut self) {
        loop {
            let entry = tokio::select! {
                biased;
                _ = self.generation.cancelled() => break,
                entry = self.entries.recv() => match entry {
                    Some(entry) => entry,
                    None => break,
                },
            };
            self.write(entry).await;
        }

        self.entries.close();
        let mut abandoned = 0usize;
        while self.entries.try_recv().is_some() {
            abandoned += 1;
        }
        if abandoned > 0 {
            tracing::debug!(file = %self.file.id(), abandoned, "abandoned queued log entries");
        }
        if let Err(err) = self.file.close().await {
            tracing::warn!(file = %self.file.id(), error = %err, "failed to flush log file");
        }
        tracing::trace!(file = %self.file.id(), "log file queue finished");
    }

    /// Write one entry, retrying until it succeeds or the generation ends.
    async fn write(&mut self, entry: LogFileEntry) {
        let mut ensured = false;
        loop {
            let err = match self.attempt(&entry).await {
                Ok(()) => return,
                Err(err) => err,
            };

            if !ensured
                && err.kind() == io::ErrorKind::NotFound
                && self.file.settings().ensure_base_path
            {
                ensured = true;
                match self.file.ensure_base_path().await {
                    Ok(_) => continue,
                    Err(dir_err) => tracing::debug!(
                        file = %self.file.id(),
                        error = %dir_err,
                        "could not create log directory"
                    ),
                }
            }

            if self.retry_delay.is_zero() {
                self.fail(entry, err);
                return;
            }
            tracing::debug!(
                file = %self.file.id(),
                error = %err,
                delay_ms = self.retry_delay.as_millis() as u64,
                "log write failed, retrying"
            );
            tokio::select! {
                biased;
                _ = self.generation.cancelled() => {
                    self.fail(entry, err);
                    return;
                }
                _ = tokio::time::sleep(self.retry_delay) => {}
            }
            ensured = false;
        }
    }

    async fn attempt(&mut self, entry: &LogFileEntry) -> io::Result<()> {
        let result = match self.strategy.resolve(&mut self.file, entry).await {
            Ok(path) => self.file.write_entry(&path, entry).await,
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.file.discard();
        }
        result
    }

    fn fail(&self, entry: LogFileEntry, error: io::Error) {
        self.diagnostics.emit(&DiagnosticEvent::LogEntryWriteFailed {
            file: self.file.id().to_string(),
            entry,
            error: Arc::new(error),
        });
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
