// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path resolution for pending entries.
//!
//! A [`PathStrategy`] decides which concrete file an entry goes to. It runs
//! inside the file's worker, so it may mutate the descriptor (counter,
//! open target) and touch the file system without further locking.

use crate::log_file::LogFile;
use async_trait::async_trait;
use chrono::Local;
use fl_core::LogFileEntry;
use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Chooses the target path for an entry.
#[async_trait]
pub trait PathStrategy: Send + Sync + 'static {
    async fn resolve(&self, file: &mut LogFile, entry: &LogFileEntry) -> io::Result<PathBuf>;
}

/// Formats the rolling counter into a file name postfix.
pub trait CounterFormatter: Send + Sync + 'static {
    fn format_counter(&self, counter: u64, pattern: &str, out: &mut String);
}

/// Pads the counter with zeros to the width of the pattern. Wider values
/// are printed in full.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPaddedCounter;

impl CounterFormatter for ZeroPaddedCounter {
    fn format_counter(&self, counter: u64, pattern: &str, out: &mut String) {
        let _ = write!(out, "{:0width$}", counter, width = pattern.chars().count());
    }
}

/// `stem[-date][-counter].ext` naming with size-based splitting.
#[derive(Clone)]
pub struct PostfixPathStrategy {
    counter: Arc<dyn CounterFormatter>,
}

impl Default for PostfixPathStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PostfixPathStrategy {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(ZeroPaddedCounter),
        }
    }

    pub fn with_counter_formatter(counter: Arc<dyn CounterFormatter>) -> Self {
        Self { counter }
    }

    pub fn has_postfix(file: &LogFile) -> bool {
        file.settings().has_postfix()
    }

    /// Append `-<date>` and `-<counter>` to `out`, each only when its
    /// setting is active.
    pub fn build_postfix(&self, file: &LogFile, entry: &LogFileEntry, out: &mut String) {
        let settings = file.settings();
        if let Some(format) = settings.date_format.as_deref() {
            let local = entry.timestamp().with_timezone(&Local);
            out.push('-');
            let _ = write!(out, "{}", local.format(format));
        }
        if settings.max_file_size > 0 {
            out.push('-');
            self.counter
                .format_counter(file.counter(), &settings.counter_format, out);
        }
    }

    /// Whether `entry` still fits into `path`. Bumps the counter when it
    /// does not.
    pub async fn check_log_file(
        &self,
        file: &mut LogFile,
        path: &Path,
        entry: &LogFileEntry,
    ) -> io::Result<bool> {
        let max = file.settings().max_file_size;
        if max == 0 {
            return Ok(true);
        }
        let accepted = match file.stat(path).await? {
            // A file that does not exist yet takes any entry, which ends
            // the search even for an oversized entry.
            None => true,
            Some(stat) if stat.is_dir => false,
            Some(stat) => {
                let encoding = file.settings().encoding;
                let len = if stat.len > 0 {
                    stat.len
                } else {
                    encoding.preamble().len() as u64
                };
                len.saturating_add(encoding.byte_count(entry.text())) <= max
            }
        };
        if !accepted {
            file.increment_counter();
        }
        Ok(accepted)
    }
}

#[async_trait]
impl PathStrategy for PostfixPathStrategy {
    async fn resolve(&self, file: &mut LogFile, entry: &LogFileEntry) -> io::Result<PathBuf> {
        if !Self::has_postfix(file) {
            return Ok(file.file_path(""));
        }
        let mut postfix = String::new();
        loop {
            postfix.clear();
            self.build_postfix(file, entry, &mut postfix);
            let path = file.file_path(&postfix);
            if self.check_log_file(file, &path, entry).await? {
                return Ok(path);
            }
        }
    }
}

/// Writes to a fixed `stem.ext` and shifts full files to numbered
/// archives: `stem.1.ext` is the newest, `stem.<max_files>.ext` the oldest.
#[derive(Debug, Clone, Copy)]
pub struct ShiftingPathStrategy {
    max_files: u32,
}

impl ShiftingPathStrategy {
    pub fn new(max_files: u32) -> Self {
        Self { max_files }
    }

    pub fn max_files(&self) -> u32 {
        self.max_files
    }

    async fn needs_rotation(
        file: &LogFile,
        path: &Path,
        entry: &LogFileEntry,
    ) -> io::Result<bool> {
        let max = file.settings().max_file_size;
        if max == 0 {
            return Ok(false);
        }
        Ok(match file.stat(path).await? {
            Some(stat) if !stat.is_dir && stat.len > 0 => {
                let encoding = file.settings().encoding;
                stat.len.saturating_add(encoding.byte_count(entry.text())) > max
            }
            _ => false,
        })
    }

    async fn rotate(&self, file: &mut LogFile, live: &Path) -> io::Result<()> {
        if let Err(err) = file.close().await {
            tracing::warn!(file = %file.id(), error = %err, "flush before rotation failed");
        }
        let appender = Arc::clone(file.appender());
        let archive = |n: u32| file.file_path(&format!(".{}", n));

        if self.max_files == 0 {
            return appender.remove(live).await;
        }
        appender.remove(&archive(self.max_files)).await?;
        for n in (1..self.max_files).rev() {
            let from = archive(n);
            if appender.stat(&from).await?.is_some() {
                appender.rename(&from, &archive(n + 1)).await?;
            }
        }
        appender.rename(live, &archive(1)).await?;
        tracing::debug!(file = %file.id(), max_files = self.max_files, "rotated log file");
        Ok(())
    }
}

#[async_trait]
impl PathStrategy for ShiftingPathStrategy {
    async fn resolve(&self, file: &mut LogFile, entry: &LogFileEntry) -> io::Result<PathBuf> {
        let path = file.file_path("");
        if Self::needs_rotation(file, &path, entry).await? {
            self.rotate(file, &path).await?;
            file.set_counter(0);
        }
        Ok(path)
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
