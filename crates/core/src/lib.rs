// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-core: value types shared by the filelog pipeline

pub mod buffer_pool;
pub mod clock;
pub mod diagnostic;
pub mod encoding;
pub mod entry;
pub mod options;
pub mod scope;
pub mod text;

pub use buffer_pool::{BufferPool, PooledBuffer};
pub use clock::{Clock, SystemClock};
pub use diagnostic::DiagnosticEvent;
pub use encoding::TextEncoding;
pub use entry::{LogFileEntry, LogLevel};
pub use options::{
    normalize_file_id, ConfigError, FileOptions, LogFileOptions, LoggerOptions,
    DEFAULT_COMPLETION_TIMEOUT, DEFAULT_WRITE_RETRY_DELAY,
};
pub use scope::ScopeStack;
pub use text::{JsonTextBuilder, LogRecord, PlainTextBuilder, TextBuilder, LINE_ENDING};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
