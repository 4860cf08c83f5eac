// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File log processor.
//!
//! Multiplexes entries from any number of callers into one queue per file.
//! Each queue is drained by a single worker, so writes to a file are
//! serialized while different files proceed in parallel.
//!
//! The time between two [`FileLogProcessor::complete`] calls is a
//! generation. Every generation owns a cancellation token; queues capture
//! the token of the generation that created them, so draining an old
//! generation never cancels writes started after the reset.

use crate::context::{DrainHandle, FileLoggerContext};
use crate::error::ProcessorError;
use crate::log_file::LogFile;
use crate::path::{PathStrategy, PostfixPathStrategy};
use crate::queue::{self, PostError, QueueSender, QueueWorker};
use crate::settings::{FileSettings, FrozenSettings};
use fl_adapters::{FileAppender, PhysicalFileAppender, TracedAppender};
use fl_core::{normalize_file_id, DiagnosticEvent, LogFileEntry};
use parking_lot::{Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const DEFAULT_NAME: &str = "file";

struct QueueHandle {
    sender: QueueSender,
    worker: JoinHandle<()>,
}

struct Registry {
    generation: CancellationToken,
    queues: HashMap<String, QueueHandle>,
    shutdown_watch: Option<JoinHandle<()>>,
}

struct ProcessorInner {
    name: String,
    context: Arc<FileLoggerContext>,
    runtime: Handle,
    settings: RwLock<Arc<FrozenSettings>>,
    strategy: Arc<dyn PathStrategy>,
    registry: Mutex<Registry>,
    fallback_appender: Mutex<Option<Arc<dyn FileAppender>>>,
    disposed: AtomicBool,
}

/// Configures and starts a [`FileLogProcessor`].
pub struct ProcessorBuilder {
    name: String,
    context: Arc<FileLoggerContext>,
    settings: FrozenSettings,
    strategy: Arc<dyn PathStrategy>,
}

impl ProcessorBuilder {
    /// Name reported to the context with every drain.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path_strategy(mut self, strategy: Arc<dyn PathStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Start the processor on the current tokio runtime.
    pub fn build(self) -> Result<FileLogProcessor, ProcessorError> {
        let runtime = Handle::try_current()?;
        let inner = Arc::new(ProcessorInner {
            name: self.name,
            context: self.context,
            runtime,
            settings: RwLock::new(Arc::new(self.settings)),
            strategy: self.strategy,
            registry: Mutex::new(Registry {
                generation: CancellationToken::new(),
                queues: HashMap::new(),
                shutdown_watch: None,
            }),
            fallback_appender: Mutex::new(None),
            disposed: AtomicBool::new(false),
        });

        // Drain once the host signals shutdown.
        let weak = Arc::downgrade(&inner);
        let shutdown = inner.context.shutdown_token().clone();
        let watch = inner.context.tasks().spawn_on(
            async move {
                shutdown.cancelled().await;
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = inner.complete(None) {
                    tracing::debug!(processor = %inner.name, error = %err, "shutdown drain skipped");
                }
            },
            &inner.runtime,
        );
        inner.registry.lock().shutdown_watch = Some(watch);

        tracing::debug!(processor = %inner.name, "file log processor started");
        Ok(FileLogProcessor { inner })
    }
}

/// Asynchronous per-file write pipeline.
pub struct FileLogProcessor {
    inner: Arc<ProcessorInner>,
}

impl FileLogProcessor {
    pub fn builder(context: Arc<FileLoggerContext>, settings: FrozenSettings) -> ProcessorBuilder {
        ProcessorBuilder {
            name: DEFAULT_NAME.to_string(),
            context,
            settings,
            strategy: Arc::new(PostfixPathStrategy::new()),
        }
    }

    /// Processor with the default path strategy.
    pub fn new(
        context: Arc<FileLoggerContext>,
        settings: FrozenSettings,
    ) -> Result<Self, ProcessorError> {
        Self::builder(context, settings).build()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn context(&self) -> &Arc<FileLoggerContext> {
        &self.inner.context
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<FrozenSettings> {
        Arc::clone(&self.inner.settings.read())
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// File ids with a queue in the current generation, sorted.
    pub fn active_files(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.registry.lock().queues.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Queue `entry` for `file_id`. Never waits for I/O.
    ///
    /// Entries are dropped silently once shutdown was requested. A full
    /// queue drops the entry and raises `LogEntryDropped`.
    pub fn enqueue(&self, file_id: &str, entry: LogFileEntry) -> Result<(), ProcessorError> {
        self.inner.enqueue(file_id, entry)
    }

    /// Close the current generation and start a new one.
    ///
    /// Existing queues stop accepting entries and are drained in the
    /// background for up to the context's completion timeout. New entries
    /// go to fresh queues, using `new_settings` when given.
    pub fn complete(
        &self,
        new_settings: Option<FrozenSettings>,
    ) -> Result<DrainHandle, ProcessorError> {
        self.inner.complete(new_settings)
    }

    /// Drain all queues, then dispose.
    pub async fn close(&self) -> Result<(), ProcessorError> {
        let drain = self.complete(None)?;
        drain.wait().await;
        self.dispose();
        Ok(())
    }

    /// Cancel the active generation and release resources. Idempotent.
    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl Drop for FileLogProcessor {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

impl ProcessorInner {
    fn enqueue(&self, file_id: &str, entry: LogFileEntry) -> Result<(), ProcessorError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(ProcessorError::Disposed);
        }
        if self.context.is_shutdown_requested() {
            tracing::trace!(file = %file_id, "shutdown requested, log entry discarded");
            return Ok(());
        }

        let id = normalize_file_id(file_id);
        let posted = {
            let mut registry = self.registry.lock();
            if self.disposed.load(Ordering::Acquire) {
                return Err(ProcessorError::Disposed);
            }
            // Shutdown may have started while waiting for the lock.
            if self.context.is_shutdown_requested() {
                return Ok(());
            }
            let Registry {
                generation, queues, ..
            } = &mut *registry;
            let queue = match queues.entry(id.clone()) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => slot.insert(self.create_queue(&id, generation)),
            };
            queue.sender.try_post(entry)
        };

        match posted {
            Ok(()) => {}
            Err(PostError::Full(entry)) => {
                self.context
                    .emit(DiagnosticEvent::LogEntryDropped { file: id, entry });
            }
            Err(PostError::Closed(_)) => {
                tracing::debug!(file = %id, "log file queue closed, entry discarded");
            }
        }
        Ok(())
    }

    /// Called with the registry lock held; never performs I/O.
    fn create_queue(&self, id: &str, generation: &CancellationToken) -> QueueHandle {
        let settings = self.settings.read().get(id);
        let appender = self.appender_for(&settings);
        let (sender, entries) = queue::channel(settings.max_queue_size);
        let worker = QueueWorker {
            file: LogFile::new(id, settings, appender),
            entries,
            generation: generation.clone(),
            strategy: Arc::clone(&self.strategy),
            retry_delay: self.context.write_retry_delay(),
            diagnostics: self.context.diagnostics(),
        };
        tracing::debug!(processor = %self.name, file = %id, "created log file queue");
        QueueHandle {
            sender,
            worker: self.runtime.spawn(worker.run()),
        }
    }

    fn appender_for(&self, settings: &FileSettings) -> Arc<dyn FileAppender> {
        if let Some(appender) = &settings.appender {
            return Arc::clone(appender);
        }
        let mut fallback = self.fallback_appender.lock();
        let appender = fallback.get_or_insert_with(|| {
            let physical = PhysicalFileAppender::current_dir()
                .unwrap_or_else(|_| PhysicalFileAppender::new("."));
            Arc::new(TracedAppender::new(physical))
        });
        Arc::clone(appender)
    }

    fn complete(
        &self,
        new_settings: Option<FrozenSettings>,
    ) -> Result<DrainHandle, ProcessorError> {
        let (old_generation, queues) = {
            let mut registry = self.registry.lock();
            if self.disposed.load(Ordering::Acquire) {
                return Err(ProcessorError::Disposed);
            }
            if let Some(settings) = new_settings {
                *self.settings.write() = Arc::new(settings);
            }
            let old = std::mem::replace(&mut registry.generation, CancellationToken::new());
            (old, std::mem::take(&mut registry.queues))
        };

        // Dropping the senders closes the old queues.
        let mut workers: Vec<(String, JoinHandle<()>)> =
            queues.into_iter().map(|(id, queue)| (id, queue.worker)).collect();

        let (handle, done) = DrainHandle::pending();
        let context = Arc::clone(&self.context);
        let name = self.name.clone();
        let timeout = context.completion_timeout();
        self.context.tasks().spawn_on(
            async move {
                let queues = workers.len();
                let drained = tokio::time::timeout(timeout, async {
                    for (id, worker) in workers.iter_mut() {
                        if let Err(err) = worker.await {
                            tracing::warn!(file = %id, error = %err, "log file worker failed");
                        }
                    }
                })
                .await;
                old_generation.cancel();
                match drained {
                    Ok(()) => tracing::debug!(processor = %name, queues, "log file queues drained"),
                    Err(_) => context.emit(DiagnosticEvent::QueuesCompletionForced),
                }
                let _ = done.send(true);
            },
            &self.runtime,
        );

        self.context.on_complete(&self.name, handle.clone());
        Ok(handle)
    }

    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let (generation, queues, watch) = {
            let mut registry = self.registry.lock();
            (
                registry.generation.clone(),
                std::mem::take(&mut registry.queues),
                registry.shutdown_watch.take(),
            )
        };
        if let Some(watch) = watch {
            watch.abort();
        }
        generation.cancel();
        drop(queues);
        self.fallback_appender.lock().take();
        tracing::debug!(processor = %self.name, "file log processor disposed");
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
