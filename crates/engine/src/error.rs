// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the file log processor

use fl_core::ConfigError;
use thiserror::Error;

/// Errors surfaced synchronously to callers of the processor API.
///
/// Write failures are never reported here; they become diagnostic events.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("file log processor has been disposed")]
    Disposed,
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}
