// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory appender.
//!
//! Models a small directory tree: files can only be created inside
//! existing directories, mirroring the physical appender's not-found
//! behavior so directory auto-creation can be exercised without disk I/O.

use super::{AppendStream, FileAppender, FileStat};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryFs {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    fn dir_exists(&self, dir: &Path) -> bool {
        dir.as_os_str().is_empty() || self.dirs.contains(dir)
    }
}

/// Virtual file system shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileAppender {
    fs: Arc<Mutex<MemoryFs>>,
}

impl MemoryFileAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a file, if it exists.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.fs.lock().files.get(&normalize(path.as_ref())).cloned()
    }

    /// Contents of a file decoded as UTF-8 (lossy).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.fs.lock().files.keys().cloned().collect()
    }

    pub fn dir_exists(&self, dir: impl AsRef<Path>) -> bool {
        self.fs.lock().dir_exists(&normalize(dir.as_ref()))
    }

    /// Seed a file (parent directories are created).
    pub fn insert_file(&self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut fs = self.fs.lock();
        if let Some(parent) = path.parent() {
            insert_dirs(&mut fs, parent);
        }
        fs.files.insert(path, bytes.into());
    }
}

/// Lexically normalize a relative path: drops `.` and resolves `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

fn insert_dirs(fs: &mut MemoryFs, dir: &Path) -> bool {
    let mut created = false;
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        created |= fs.dirs.insert(ancestor.to_path_buf());
    }
    created
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

#[async_trait]
impl FileAppender for MemoryFileAppender {
    async fn ensure_directory(&self, dir: &Path) -> io::Result<bool> {
        let dir = normalize(dir);
        let mut fs = self.fs.lock();
        if fs.files.contains_key(&dir) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", dir.display()),
            ));
        }
        Ok(insert_dirs(&mut fs, &dir))
    }

    async fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        let path = normalize(path);
        let fs = self.fs.lock();
        if let Some(bytes) = fs.files.get(&path) {
            return Ok(Some(FileStat {
                len: bytes.len() as u64,
                is_dir: false,
            }));
        }
        if fs.dir_exists(&path) {
            return Ok(Some(FileStat {
                len: 0,
                is_dir: true,
            }));
        }
        Ok(None)
    }

    async fn open_append(&self, path: &Path) -> io::Result<Box<dyn AppendStream>> {
        let path = normalize(path);
        let mut fs = self.fs.lock();
        if fs.dir_exists(&path) {
            return Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            )));
        }
        let parent = path.parent().unwrap_or(Path::new(""));
        if !fs.dir_exists(parent) {
            return Err(not_found(&path));
        }
        let len = fs.files.entry(path.clone()).or_default().len() as u64;
        Ok(Box::new(MemoryAppendStream {
            fs: Arc::clone(&self.fs),
            path,
            len,
        }))
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        let mut fs = self.fs.lock();
        let parent = to.parent().unwrap_or(Path::new(""));
        if !fs.dir_exists(parent) {
            return Err(not_found(&to));
        }
        let bytes = fs.files.remove(&from).ok_or_else(|| not_found(&from))?;
        fs.files.insert(to, bytes);
        Ok(())
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        self.fs.lock().files.remove(&normalize(path));
        Ok(())
    }
}

struct MemoryAppendStream {
    fs: Arc<Mutex<MemoryFs>>,
    path: PathBuf,
    len: u64,
}

#[async_trait]
impl AppendStream for MemoryAppendStream {
    fn len(&self) -> u64 {
        self.len
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut fs = self.fs.lock();
        // A file renamed away keeps receiving writes on disk; here the
        // stream recreates its path instead.
        let file = fs.files.entry(self.path.clone()).or_default();
        file.extend_from_slice(bytes);
        self.len = file.len() as u64;
        Ok(())
    }

    async fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
