// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

/// Config file from FL_CONFIG, used when `--config` is not given.
pub fn config_path() -> Option<PathBuf> {
    std::env::var("FL_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Tracing filter for the logger's own diagnostics (FL_LOG, default `warn`).
pub fn log_filter() -> String {
    std::env::var("FL_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
