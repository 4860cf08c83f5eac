// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake appender for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AppendStream, FileAppender, FileStat, MemoryFileAppender};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Recorded appender call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppenderCall {
    EnsureDirectory { path: PathBuf },
    Stat { path: PathBuf },
    OpenAppend { path: PathBuf },
    Write { path: PathBuf, len: usize },
    Rename { from: PathBuf, to: PathBuf },
    Remove { path: PathBuf },
}

#[derive(Debug, Clone, Copy)]
struct Failure {
    /// `None` fails forever.
    remaining: Option<usize>,
    kind: io::ErrorKind,
}

impl Failure {
    /// Consume one failure, returning the error to raise.
    fn take(slot: &mut Option<Failure>, what: &str, path: &Path) -> Option<io::Error> {
        let failure = slot.as_mut()?;
        let kind = failure.kind;
        match failure.remaining.as_mut() {
            Some(0) => {
                *slot = None;
                return None;
            }
            Some(n) => *n -= 1,
            None => {}
        }
        Some(io::Error::new(
            kind,
            format!("injected {} failure: {}", what, path.display()),
        ))
    }
}

#[derive(Debug, Default)]
struct FakeAppenderState {
    calls: Vec<AppenderCall>,
    open_failure: Option<Failure>,
    write_failure: Option<Failure>,
    write_delay: Option<Duration>,
}

/// Appender over in-memory storage with scripted failures and call
/// recording.
#[derive(Debug, Clone, Default)]
pub struct FakeAppender {
    storage: MemoryFileAppender,
    inner: Arc<Mutex<FakeAppenderState>>,
}

impl FakeAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying storage, for reading written files.
    pub fn storage(&self) -> &MemoryFileAppender {
        &self.storage
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<AppenderCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `open_append` calls for `path`.
    pub fn open_count(&self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, AppenderCall::OpenAppend { path: p } if p == path))
            .count()
    }

    /// Fail the next `count` opens with `kind`.
    pub fn fail_opens(&self, count: usize, kind: io::ErrorKind) {
        self.inner.lock().open_failure = Some(Failure {
            remaining: Some(count),
            kind,
        });
    }

    /// Fail every open with `kind` until `heal()`.
    pub fn fail_opens_forever(&self, kind: io::ErrorKind) {
        self.inner.lock().open_failure = Some(Failure {
            remaining: None,
            kind,
        });
    }

    /// Fail the next `count` writes with `kind`.
    pub fn fail_writes(&self, count: usize, kind: io::ErrorKind) {
        self.inner.lock().write_failure = Some(Failure {
            remaining: Some(count),
            kind,
        });
    }

    /// Clear all scripted failures.
    pub fn heal(&self) {
        let mut inner = self.inner.lock();
        inner.open_failure = None;
        inner.write_failure = None;
    }

    /// Delay every write by `delay`.
    pub fn set_write_delay(&self, delay: Duration) {
        self.inner.lock().write_delay = Some(delay);
    }

    fn record(&self, call: AppenderCall) {
        self.inner.lock().calls.push(call);
    }
}

#[async_trait]
impl FileAppender for FakeAppender {
    async fn ensure_directory(&self, dir: &Path) -> io::Result<bool> {
        self.record(AppenderCall::EnsureDirectory {
            path: dir.to_path_buf(),
        });
        self.storage.ensure_directory(dir).await
    }

    async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        self.record(AppenderCall::Stat {
            path: path.to_path_buf(),
        });
        self.storage.stat(path).await
    }

    async fn open_append(&self, path: &Path) -> io::Result<Box<dyn AppendStream>> {
        let failure = {
            let mut inner = self.inner.lock();
            inner.calls.push(AppenderCall::OpenAppend {
                path: path.to_path_buf(),
            });
            Failure::take(&mut inner.open_failure, "open", path)
        };
        if let Some(err) = failure {
            return Err(err);
        }
        let stream = self.storage.open_append(path).await?;
        Ok(Box::new(FakeAppendStream {
            stream,
            path: path.to_path_buf(),
            inner: Arc::clone(&self.inner),
        }))
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record(AppenderCall::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        self.storage.rename(from, to).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        self.record(AppenderCall::Remove {
            path: path.to_path_buf(),
        });
        self.storage.remove(path).await
    }
}

struct FakeAppendStream {
    stream: Box<dyn AppendStream>,
    path: PathBuf,
    inner: Arc<Mutex<FakeAppenderState>>,
}

#[async_trait]
impl AppendStream for FakeAppendStream {
    fn len(&self) -> u64 {
        self.stream.len()
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let (failure, delay) = {
            let mut inner = self.inner.lock();
            inner.calls.push(AppenderCall::Write {
                path: self.path.clone(),
                len: bytes.len(),
            });
            (
                Failure::take(&mut inner.write_failure, "write", &self.path),
                inner.write_delay,
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = failure {
            return Err(err);
        }
        self.stream.write_all(bytes).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.stream.flush().await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
