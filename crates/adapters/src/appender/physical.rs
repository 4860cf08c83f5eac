// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appender backed by the local file system.

use super::{AppendStream, FileAppender, FileStat};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Appender rooted at a directory on disk.
///
/// Files are opened write-only in append mode; other processes may read
/// them concurrently.
#[derive(Debug, Clone)]
pub struct PhysicalFileAppender {
    root: PathBuf,
}

impl PhysicalFileAppender {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Appender rooted at the process working directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl FileAppender for PhysicalFileAppender {
    async fn ensure_directory(&self, dir: &Path) -> io::Result<bool> {
        let full = self.resolve(dir);
        match fs::metadata(&full).await {
            Ok(meta) if meta.is_dir() => return Ok(false),
            Ok(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} exists and is not a directory", full.display()),
                ))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(&full).await?;
        Ok(true)
    }

    async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        match fs::metadata(self.resolve(path)).await {
            Ok(meta) => Ok(Some(FileStat {
                len: meta.len(),
                is_dir: meta.is_dir(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn open_append(&self, path: &Path) -> io::Result<Box<dyn AppendStream>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.resolve(path))
            .await?;
        let len = file.metadata().await?.len();
        Ok(Box::new(PhysicalAppendStream { file, len }))
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(self.resolve(from), self.resolve(to)).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(self.resolve(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

struct PhysicalAppendStream {
    file: File,
    len: u64,
}

#[async_trait]
impl AppendStream for PhysicalAppendStream {
    fn len(&self) -> u64 {
        self.len
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.file.write_all(bytes).await?;
        self.len += bytes.len() as u64;
        Ok(())
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.file.flush().await
    }
}

#[cfg(test)]
#[path = "physical_tests.rs"]
mod tests;
