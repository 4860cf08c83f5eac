// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file descriptor owned by its queue worker.

use crate::settings::FileSettings;
use fl_adapters::{AppendStream, FileAppender, FileStat};
use fl_core::LogFileEntry;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct OpenTarget {
    path: PathBuf,
    stream: Box<dyn AppendStream>,
}

/// Bookkeeping for one logical log file within a generation.
///
/// The descriptor is moved into the file's worker task, so the counter and
/// the open target are never touched concurrently.
pub struct LogFile {
    id: String,
    base_path: PathBuf,
    stem: String,
    extension: String,
    settings: Arc<FileSettings>,
    appender: Arc<dyn FileAppender>,
    counter: u64,
    target: Option<OpenTarget>,
    scratch: Vec<u8>,
}

impl LogFile {
    /// Descriptor for a normalized file id such as `"audit/app.log"`.
    pub fn new(id: &str, settings: Arc<FileSettings>, appender: Arc<dyn FileAppender>) -> Self {
        let id_path = Path::new(id);
        let base_path = match id_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => settings.base_path.join(dir),
            _ => settings.base_path.clone(),
        };
        let stem = id_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = id_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        Self {
            id: id.to_string(),
            base_path,
            stem,
            extension,
            settings,
            appender,
            counter: 0,
            target: None,
            scratch: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Directory the file is written to.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension including the leading dot, or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn settings(&self) -> &FileSettings {
        &self.settings
    }

    pub fn appender(&self) -> &Arc<dyn FileAppender> {
        &self.appender
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn set_counter(&mut self, counter: u64) {
        self.counter = counter;
    }

    pub fn increment_counter(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }

    /// `base_path/stem<postfix>.extension`
    pub fn file_path(&self, postfix: &str) -> PathBuf {
        self.base_path
            .join(format!("{}{}{}", self.stem, postfix, self.extension))
    }

    /// Path of the currently open target, if any.
    pub fn open_path(&self) -> Option<&Path> {
        self.target.as_ref().map(|t| t.path.as_path())
    }

    /// Size of `path`, using the open stream's tracked length when it
    /// targets the same path.
    pub async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        if let Some(target) = self.target.as_ref().filter(|t| t.path == path) {
            return Ok(Some(FileStat {
                len: target.stream.len(),
                is_dir: false,
            }));
        }
        self.appender.stat(path).await
    }

    pub async fn ensure_base_path(&self) -> io::Result<bool> {
        self.appender.ensure_directory(&self.base_path).await
    }

    /// Flush and release the open target.
    pub async fn close(&mut self) -> io::Result<()> {
        match self.target.take() {
            Some(mut target) => target.stream.flush().await,
            None => Ok(()),
        }
    }

    /// Release the open target without flushing.
    pub fn discard(&mut self) {
        self.target = None;
    }

    /// Append `entry` to `path`, opening it if needed. The encoding preamble
    /// is written first when the target is empty. On failure the target is
    /// discarded so the next attempt reopens it.
    pub async fn write_entry(&mut self, path: &Path, entry: &LogFileEntry) -> io::Result<()> {
        if self.target.as_ref().is_some_and(|t| t.path != path) {
            if let Err(err) = self.close().await {
                tracing::warn!(file = %self.id, error = %err, "flush on close failed");
            }
        }
        if self.target.is_none() {
            let stream = self.appender.open_append(path).await?;
            self.target = Some(OpenTarget {
                path: path.to_path_buf(),
                stream,
            });
        }
        let Some(target) = self.target.as_mut() else {
            return Err(io::Error::other("append target unavailable"));
        };

        let encoding = self.settings.encoding;
        self.scratch.clear();
        if target.stream.is_empty() {
            self.scratch.extend_from_slice(encoding.preamble());
        }
        encoding.encode_into(entry.text(), &mut self.scratch);

        let result = match target.stream.write_all(&self.scratch).await {
            Ok(()) => target.stream.flush().await,
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.target = None;
        }
        result
    }
}

#[cfg(test)]
#[path = "log_file_tests.rs"]
mod tests;
