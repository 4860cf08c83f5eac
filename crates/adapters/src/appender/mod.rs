// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File appender capability.
//!
//! An appender binds a logical path namespace to a storage medium. Paths
//! handed to an appender are relative to its root.
//!
//! Callers guarantee at most one concurrent append stream per path;
//! appenders do not lock across paths. Readers may open a file while it
//! is being appended to.

mod memory;
mod physical;

pub use memory::MemoryFileAppender;
pub use physical::PhysicalFileAppender;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AppenderCall, FakeAppender};

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Metadata of an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub len: u64,
    pub is_dir: bool,
}

/// Open append-only handle to one file.
#[async_trait]
pub trait AppendStream: Send + Sync {
    /// Current length of the file in bytes, including bytes written
    /// through this stream.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    async fn flush(&mut self) -> io::Result<()>;
}

/// Storage medium for log files.
#[async_trait]
pub trait FileAppender: Send + Sync + 'static {
    /// Create `dir` (and parents) if missing. Returns whether anything was
    /// created.
    async fn ensure_directory(&self, dir: &Path) -> io::Result<bool>;

    /// Metadata for `path`, or `None` if nothing exists there.
    async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>>;

    /// Open `path` for appending, creating the file if needed. The parent
    /// directory must exist.
    async fn open_append(&self, path: &Path) -> io::Result<Box<dyn AppendStream>>;

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file. Removing a missing file succeeds.
    async fn remove(&self, path: &Path) -> io::Result<()>;

    /// Append `bytes` in one open/write/flush cycle.
    async fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut stream = self.open_append(path).await?;
        stream.write_all(bytes).await?;
        stream.flush().await
    }
}
