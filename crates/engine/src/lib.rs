// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl-engine: asynchronous per-file write pipeline

pub mod context;
pub mod diagnostics;
mod error;
pub mod log_file;
pub mod logger;
pub mod path;
pub mod processor;
mod queue;
pub mod settings;

pub use context::{DrainHandle, FileLoggerContext};
pub use diagnostics::{DiagnosticSink, TracingDiagnostics};
pub use error::ProcessorError;
pub use log_file::LogFile;
pub use logger::FileLogger;
pub use path::{
    CounterFormatter, PathStrategy, PostfixPathStrategy, ShiftingPathStrategy, ZeroPaddedCounter,
};
pub use processor::{FileLogProcessor, ProcessorBuilder};
pub use settings::{FileSettings, FrozenSettings};

#[cfg(any(test, feature = "test-support"))]
pub use diagnostics::RecordingDiagnostics;
