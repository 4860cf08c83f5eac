// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route the pipeline's own tracing output to stderr.
pub fn setup_logging() {
    let filter =
        EnvFilter::try_new(crate::env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
