// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced appender wrapper for consistent observability

use crate::appender::{AppendStream, FileAppender, FileStat};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any FileAppender
#[derive(Debug, Clone)]
pub struct TracedAppender<A> {
    inner: A,
}

impl<A> TracedAppender<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: FileAppender> FileAppender for TracedAppender<A> {
    async fn ensure_directory(&self, dir: &Path) -> io::Result<bool> {
        let result = self.inner.ensure_directory(dir).await;
        match &result {
            Ok(true) => tracing::info!(dir = %dir.display(), "created log directory"),
            Ok(false) => {}
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "ensure_directory failed"),
        }
        result
    }

    async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        let result = self.inner.stat(path).await;
        if let Err(ref e) = result {
            tracing::warn!(path = %path.display(), error = %e, "stat failed");
        }
        result
    }

    async fn open_append(&self, path: &Path) -> io::Result<Box<dyn AppendStream>> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.open_append(path).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(stream) => tracing::debug!(len = stream.len(), elapsed_ms, "opened"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "open failed"),
            }
            result
        }
        .instrument(tracing::debug_span!("appender.open", path = %path.display()))
        .await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let result = self.inner.rename(from, to).await;
        match &result {
            Ok(()) => tracing::debug!(from = %from.display(), to = %to.display(), "renamed"),
            Err(e) => tracing::warn!(
                from = %from.display(),
                to = %to.display(),
                error = %e,
                "rename failed"
            ),
        }
        result
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        let result = self.inner.remove(path).await;
        if let Err(ref e) = result {
            tracing::warn!(path = %path.display(), error = %e, "remove failed");
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
