// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires options into a context, a processor and a logger.

use fl_adapters::FileAppender;
use fl_core::{
    normalize_file_id, JsonTextBuilder, LogLevel, LoggerOptions, PlainTextBuilder, ScopeStack,
};
use fl_engine::{
    DrainHandle, FileLogProcessor, FileLogger, FileLoggerContext, FrozenSettings, ProcessorError,
};
use std::collections::HashSet;
use std::sync::Arc;

/// File used when neither flags nor config name one.
pub const DEFAULT_FILE: &str = "fl.log";

/// Output choices taken from the command line.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub files: Vec<String>,
    pub category: String,
    pub level: LogLevel,
    pub json: bool,
    pub single_line: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            category: "fl".to_string(),
            level: LogLevel::Information,
            json: false,
            single_line: false,
        }
    }
}

/// Running pipeline for one invocation.
pub struct Host {
    context: Arc<FileLoggerContext>,
    processor: Arc<FileLogProcessor>,
    logger: FileLogger,
    level: LogLevel,
    scopes: ScopeStack,
    appender: Option<Arc<dyn FileAppender>>,
}

impl Host {
    /// Start the pipeline. `appender` replaces the physical file system.
    pub fn start(
        options: &LoggerOptions,
        config: &HostConfig,
        appender: Option<Arc<dyn FileAppender>>,
    ) -> Result<Self, ProcessorError> {
        let settings = FrozenSettings::freeze(options, appender.clone())?;
        let context = Arc::new(FileLoggerContext::from_options(options));
        let processor = Arc::new(
            FileLogProcessor::builder(Arc::clone(&context), settings)
                .name("fl")
                .build()?,
        );

        let mut logger = FileLogger::new(
            Arc::clone(&processor),
            &config.category,
            target_files(options, &config.files),
        );
        if config.json {
            logger = logger.with_text_builder(Arc::new(JsonTextBuilder));
        } else if config.single_line {
            logger = logger.with_text_builder(Arc::new(PlainTextBuilder::single_line()));
        }
        tracing::debug!(files = ?logger.files(), "file logger ready");

        Ok(Self {
            context,
            processor,
            logger,
            level: config.level,
            scopes: ScopeStack::new(),
            appender,
        })
    }

    pub fn files(&self) -> &[String] {
        self.logger.files()
    }

    /// Scope attached to every following message.
    pub fn push_scope(&mut self, scope: &str) {
        self.scopes = self.scopes.push(scope);
    }

    pub fn log(&self, message: &str) -> Result<(), ProcessorError> {
        self.logger.log(self.level, &self.scopes, message)
    }

    /// Drain current files and continue under `options`.
    pub fn reload(&self, options: &LoggerOptions) -> Result<DrainHandle, ProcessorError> {
        let settings = FrozenSettings::freeze(options, self.appender.clone())?;
        tracing::info!("reloading logger settings");
        self.processor.complete(Some(settings))
    }

    /// Signal shutdown and wait for every queue to drain.
    pub async fn finish(self) {
        self.context.shutdown_and_wait().await;
        self.processor.dispose();
    }
}

/// Requested files, else the configured ones, else [`DEFAULT_FILE`].
pub fn target_files(options: &LoggerOptions, requested: &[String]) -> Vec<String> {
    let mut files: Vec<String> = if requested.is_empty() {
        options.resolved_files().map(|(id, _)| id).collect()
    } else {
        requested.iter().map(|id| normalize_file_id(id)).collect()
    };
    let mut seen = HashSet::new();
    files.retain(|id| !id.is_empty() && seen.insert(id.clone()));
    if files.is_empty() {
        files.push(DEFAULT_FILE.to_string());
    }
    files
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
