// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frozen per-file settings.
//!
//! A `FrozenSettings` snapshot is built once and shared behind an `Arc`.
//! Reconfiguration installs a new snapshot; existing ones never change, so
//! a writer holding a reference never sees a half-applied update.

use fl_adapters::FileAppender;
use fl_core::{normalize_file_id, ConfigError, FileOptions, LoggerOptions, TextEncoding};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings for one log file.
#[derive(Clone)]
pub struct FileSettings {
    /// Directory the file id is resolved against.
    pub base_path: PathBuf,
    /// Size limit in bytes; 0 disables size-based splitting.
    pub max_file_size: u64,
    /// chrono strftime pattern for the date postfix.
    pub date_format: Option<String>,
    /// Zero pattern for the counter postfix.
    pub counter_format: String,
    pub encoding: TextEncoding,
    pub ensure_base_path: bool,
    /// Queue capacity; 0 means unbounded.
    pub max_queue_size: usize,
    /// Storage medium; `None` uses the processor's fallback appender.
    pub appender: Option<Arc<dyn FileAppender>>,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self::from_options(&FileOptions::default())
    }
}

impl fmt::Debug for FileSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSettings")
            .field("base_path", &self.base_path)
            .field("max_file_size", &self.max_file_size)
            .field("date_format", &self.date_format)
            .field("counter_format", &self.counter_format)
            .field("encoding", &self.encoding)
            .field("ensure_base_path", &self.ensure_base_path)
            .field("max_queue_size", &self.max_queue_size)
            .field("appender", &self.appender.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl FileSettings {
    pub fn from_options(options: &FileOptions) -> Self {
        Self {
            base_path: options.base_path_or_default(),
            max_file_size: options.max_file_size_or_default(),
            date_format: options.date_format_or_default().map(str::to_string),
            counter_format: options.counter_format_or_default().to_string(),
            encoding: options.encoding_or_default(),
            ensure_base_path: options.ensure_base_path_or_default(),
            max_queue_size: options.max_queue_size_or_default(),
            appender: None,
        }
    }

    pub fn with_appender(mut self, appender: Arc<dyn FileAppender>) -> Self {
        self.appender = Some(appender);
        self
    }

    /// Whether file names carry a date or counter postfix.
    pub fn has_postfix(&self) -> bool {
        self.date_format.is_some() || self.max_file_size > 0
    }
}

/// Immutable snapshot of settings for every known file id.
#[derive(Debug, Clone, Default)]
pub struct FrozenSettings {
    defaults: Arc<FileSettings>,
    files: HashMap<String, Arc<FileSettings>>,
}

impl FrozenSettings {
    /// Snapshot where every file id uses `defaults`.
    pub fn new(defaults: FileSettings) -> Self {
        Self {
            defaults: Arc::new(defaults),
            files: HashMap::new(),
        }
    }

    /// Add settings for one file id.
    pub fn with_file(mut self, id: &str, settings: FileSettings) -> Self {
        self.files.insert(normalize_file_id(id), Arc::new(settings));
        self
    }

    /// Freeze validated options. `appender`, when given, is used for every
    /// file.
    pub fn freeze(
        options: &LoggerOptions,
        appender: Option<Arc<dyn FileAppender>>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let with_appender = |mut settings: FileSettings| {
            settings.appender = appender.clone();
            settings
        };
        let mut frozen = Self::new(with_appender(FileSettings::from_options(&options.defaults)));
        for (id, file) in options.resolved_files() {
            frozen
                .files
                .insert(id, Arc::new(with_appender(FileSettings::from_options(&file))));
        }
        Ok(frozen)
    }

    /// Settings for `id` (already normalized), falling back to the defaults.
    pub fn get(&self, id: &str) -> Arc<FileSettings> {
        self.files
            .get(id)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.defaults))
    }

    pub fn defaults(&self) -> &FileSettings {
        &self.defaults
    }

    /// Configured file ids, sorted.
    pub fn file_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.files.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
