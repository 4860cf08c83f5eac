// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger configuration as loaded from TOML.
//!
//! Top-level keys are defaults for every file; `[[files]]` entries name a
//! file id and override any subset of them:
//!
//! ```toml
//! base_path = "logs"
//! date_format = "%Y%m%d"
//!
//! [[files]]
//! path = "app.log"
//! max_file_size = 1048576
//! counter_format = "000"
//! ```

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::TextEncoding;

/// Default delay between write retries.
pub const DEFAULT_WRITE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Default upper bound for draining queues on completion.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_millis(1500);

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date format for {file}: {format}")]
    InvalidDateFormat { file: String, format: String },
    #[error("invalid counter format for {file}: {format} (expected zeros, e.g. \"000\")")]
    InvalidCounterFormat { file: String, format: String },
    #[error("file entry has an empty path")]
    EmptyPath,
    #[error("file configured more than once: {0}")]
    DuplicatePath(String),
}

/// Per-file settings; every field is optional so entries can override a
/// subset of the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    pub base_path: Option<PathBuf>,
    /// Size limit in bytes; 0 disables size-based splitting.
    pub max_file_size: Option<u64>,
    /// chrono strftime pattern for the date postfix.
    pub date_format: Option<String>,
    /// Zero pattern for the counter postfix (`"000"` pads to three digits).
    pub counter_format: Option<String>,
    pub encoding: Option<TextEncoding>,
    /// Create missing directories when a write fails with not-found.
    pub ensure_base_path: Option<bool>,
    /// Queue capacity; 0 means unbounded.
    pub max_queue_size: Option<usize>,
}

impl FileOptions {
    /// Layer `over` on top of `self`.
    pub fn merged(&self, over: &FileOptions) -> FileOptions {
        FileOptions {
            base_path: over.base_path.clone().or_else(|| self.base_path.clone()),
            max_file_size: over.max_file_size.or(self.max_file_size),
            date_format: over.date_format.clone().or_else(|| self.date_format.clone()),
            counter_format: over
                .counter_format
                .clone()
                .or_else(|| self.counter_format.clone()),
            encoding: over.encoding.or(self.encoding),
            ensure_base_path: over.ensure_base_path.or(self.ensure_base_path),
            max_queue_size: over.max_queue_size.or(self.max_queue_size),
        }
    }

    pub fn base_path_or_default(&self) -> PathBuf {
        self.base_path.clone().unwrap_or_default()
    }

    pub fn max_file_size_or_default(&self) -> u64 {
        self.max_file_size.unwrap_or(0)
    }

    /// Date format, with an empty string treated as unset.
    pub fn date_format_or_default(&self) -> Option<&str> {
        self.date_format.as_deref().filter(|f| !f.is_empty())
    }

    pub fn counter_format_or_default(&self) -> &str {
        self.counter_format.as_deref().unwrap_or("")
    }

    pub fn encoding_or_default(&self) -> TextEncoding {
        self.encoding.unwrap_or_default()
    }

    pub fn ensure_base_path_or_default(&self) -> bool {
        self.ensure_base_path.unwrap_or(true)
    }

    pub fn max_queue_size_or_default(&self) -> usize {
        self.max_queue_size.unwrap_or(0)
    }

    fn validate(&self, file: &str) -> Result<(), ConfigError> {
        if let Some(format) = self.date_format_or_default() {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(ConfigError::InvalidDateFormat {
                    file: file.to_string(),
                    format: format.to_string(),
                });
            }
        }
        let counter = self.counter_format_or_default();
        if !counter.chars().all(|c| c == '0') {
            return Err(ConfigError::InvalidCounterFormat {
                file: file.to_string(),
                format: counter.to_string(),
            });
        }
        Ok(())
    }
}

/// A configured log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileOptions {
    /// File id, relative to the base path (e.g. `"app.log"`, `"audit/ops.log"`).
    pub path: String,
    #[serde(flatten)]
    pub overrides: FileOptions,
}

/// Root logger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerOptions {
    #[serde(flatten)]
    pub defaults: FileOptions,
    pub write_retry_delay_ms: Option<u64>,
    pub completion_timeout_ms: Option<u64>,
    #[serde(default)]
    pub files: Vec<LogFileOptions>,
}

impl LoggerOptions {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let options: LoggerOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Check formats and file ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.defaults.validate("defaults")?;
        let mut seen = std::collections::HashSet::new();
        for file in &self.files {
            let id = normalize_file_id(&file.path);
            if id.is_empty() {
                return Err(ConfigError::EmptyPath);
            }
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicatePath(id));
            }
            self.defaults.merged(&file.overrides).validate(&id)?;
        }
        Ok(())
    }

    /// Effective options for every configured file, keyed by normalized id.
    pub fn resolved_files(&self) -> impl Iterator<Item = (String, FileOptions)> + '_ {
        self.files.iter().map(|file| {
            (
                normalize_file_id(&file.path),
                self.defaults.merged(&file.overrides),
            )
        })
    }

    pub fn write_retry_delay(&self) -> Duration {
        self.write_retry_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WRITE_RETRY_DELAY)
    }

    pub fn completion_timeout(&self) -> Duration {
        self.completion_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COMPLETION_TIMEOUT)
    }
}

/// Normalize a file id: trims whitespace, uses `/` separators, drops a
/// leading `./`. Ids are case-folded on Windows, where file names are
/// case-insensitive.
pub fn normalize_file_id(path: &str) -> String {
    let id = path.trim().replace('\\', "/");
    let mut id = id.as_str();
    while let Some(rest) = id.strip_prefix("./") {
        id = rest;
    }
    if cfg!(windows) {
        id.to_lowercase()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
