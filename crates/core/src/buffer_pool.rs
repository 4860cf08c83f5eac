// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reusable scratch buffers for formatting entries.
//!
//! Buffers are grouped by capacity class. Renting picks the smallest class
//! that fits the hint; dropping a `PooledBuffer` clears it and returns it
//! to its class unless the class is already full or the buffer grew far
//! past the largest class.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

const SIZE_CLASSES: [usize; 4] = [256, 1024, 4096, 16384];

/// Buffers retained per class.
const MAX_PER_CLASS: usize = 32;

#[derive(Debug, Default)]
struct PoolInner {
    classes: [Mutex<Vec<String>>; SIZE_CLASSES.len()],
}

/// Pool of `String` scratch buffers keyed by size class.
#[derive(Debug, Clone, Default)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rent an empty buffer with at least `size_hint` capacity.
    pub fn rent(&self, size_hint: usize) -> PooledBuffer {
        let class = class_for(size_hint);
        let mut buf = self.inner.classes[class]
            .lock()
            .pop()
            .unwrap_or_else(|| String::with_capacity(SIZE_CLASSES[class].max(size_hint)));
        buf.reserve(size_hint);
        PooledBuffer {
            buf,
            pool: Arc::clone(&self.inner),
        }
    }

    /// Number of idle buffers currently held.
    pub fn idle(&self) -> usize {
        self.inner.classes.iter().map(|c| c.lock().len()).sum()
    }
}

fn class_for(size: usize) -> usize {
    SIZE_CLASSES
        .iter()
        .position(|&class| size <= class)
        .unwrap_or(SIZE_CLASSES.len() - 1)
}

/// A rented buffer; returned to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer {
    buf: String,
    pool: Arc<PoolInner>,
}

impl Deref for PooledBuffer {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let capacity = self.buf.capacity();
        if capacity > SIZE_CLASSES[SIZE_CLASSES.len() - 1] * 4 {
            return;
        }
        // File under the largest class the buffer can fully serve.
        let Some(class) = SIZE_CLASSES.iter().rposition(|&class| capacity >= class) else {
            return;
        };
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let mut slot = self.pool.classes[class].lock();
        if slot.len() < MAX_PER_CLASS {
            slot.push(buf);
        }
    }
}

#[cfg(test)]
#[path = "buffer_pool_tests.rs"]
mod tests;
