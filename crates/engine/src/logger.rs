// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Front-end adapter: turns log calls into entries for the processor.

use crate::error::ProcessorError;
use crate::processor::FileLogProcessor;
use fl_core::{
    BufferPool, Clock, LogFileEntry, LogLevel, LogRecord, PlainTextBuilder, ScopeStack,
    TextBuilder,
};
use std::error::Error;
use std::sync::Arc;

/// Initial scratch capacity beyond the message length.
const RECORD_OVERHEAD: usize = 128;

/// A named logger writing to a fixed set of files.
///
/// Each call formats the record once and queues the text for every file.
/// Write outcomes are never reported back; only a disposed processor
/// produces an error.
#[derive(Clone)]
pub struct FileLogger {
    category: Arc<str>,
    processor: Arc<FileLogProcessor>,
    files: Arc<[String]>,
    builder: Arc<dyn TextBuilder>,
    clock: Arc<dyn Clock>,
    buffers: BufferPool,
}

impl FileLogger {
    pub fn new<I, S>(processor: Arc<FileLogProcessor>, category: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let clock = Arc::clone(processor.context().clock());
        Self {
            category: Arc::from(category),
            processor,
            files: files.into_iter().map(Into::into).collect(),
            builder: Arc::new(PlainTextBuilder::default()),
            clock,
            buffers: BufferPool::new(),
        }
    }

    pub fn with_text_builder(mut self, builder: Arc<dyn TextBuilder>) -> Self {
        self.builder = builder;
        self
    }

    /// Share scratch buffers with other loggers.
    pub fn with_buffer_pool(mut self, buffers: BufferPool) -> Self {
        self.buffers = buffers;
        self
    }

    /// Logger for another category sharing files, builder and buffers.
    pub fn for_category(&self, category: &str) -> Self {
        Self {
            category: Arc::from(category),
            ..self.clone()
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn log(
        &self,
        level: LogLevel,
        scopes: &ScopeStack,
        message: &str,
    ) -> Result<(), ProcessorError> {
        self.log_event(level, 0, scopes, message, None)
    }

    pub fn log_event(
        &self,
        level: LogLevel,
        event_id: u32,
        scopes: &ScopeStack,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> Result<(), ProcessorError> {
        if self.files.is_empty() {
            return Ok(());
        }
        let timestamp = self.clock.now();
        let record = LogRecord {
            level,
            category: &self.category,
            event_id,
            message,
            timestamp,
            scopes,
            error,
        };
        let mut text = self.buffers.rent(message.len() + RECORD_OVERHEAD);
        self.builder.build(&record, &mut text);

        for file in self.files.iter() {
            self.processor
                .enqueue(file, LogFileEntry::new(text.as_str(), timestamp))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
