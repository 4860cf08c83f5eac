// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fl - append log lines to rotating files

mod env;
mod host;
mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fl_core::{LogLevel, LoggerOptions};
use host::{Host, HostConfig};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "fl",
    version,
    about = "filelog - write log lines to rotating files",
    long_about = "Reads lines from stdin and appends each one as a log entry.\n\
                  Files, rotation and encoding come from a TOML config (--config or FL_CONFIG)."
)]
struct Cli {
    /// Logger configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Target file id, relative to the base path (repeatable)
    #[arg(short = 'f', long = "file", global = true)]
    files: Vec<String>,

    /// Category recorded with every entry
    #[arg(long, default_value = "fl", global = true)]
    category: String,

    /// Level recorded with every entry
    #[arg(short, long, value_enum, default_value_t, global = true)]
    level: Level,

    /// Scope attached to every entry (repeatable, outermost first)
    #[arg(long = "scope", global = true)]
    scopes: Vec<String>,

    /// Write one JSON object per entry
    #[arg(long, global = true, conflicts_with = "single_line")]
    json: bool,

    /// Write each entry on a single line
    #[arg(long, global = true)]
    single_line: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log messages to one file
    Write(WriteArgs),
}

#[derive(Args)]
struct WriteArgs {
    /// File id to write to
    file: String,

    /// Messages, one entry each
    #[arg(required = true)]
    messages: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Level {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Information,
            Level::Warn => LogLevel::Warning,
            Level::Error => LogLevel::Error,
            Level::Critical => LogLevel::Critical,
        }
    }
}

#[tokio::main]
async fn main() {
    logging::setup_logging();
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an anyhow error, skipping causes already shown in the top message.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn load_options(path: Option<&Path>) -> Result<LoggerOptions> {
    match path {
        Some(path) => LoggerOptions::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(LoggerOptions::default()),
    }
}

fn host_config(cli: &Cli) -> HostConfig {
    let files = match &cli.command {
        Some(Commands::Write(args)) => vec![args.file.clone()],
        None => cli.files.clone(),
    };
    HostConfig {
        files,
        category: cli.category.clone(),
        level: cli.level.into(),
        json: cli.json,
        single_line: cli.single_line,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(env::config_path);
    let options = load_options(config_path.as_deref())?;
    let mut host = Host::start(&options, &host_config(&cli), None)?;
    for scope in &cli.scopes {
        host.push_scope(scope);
    }

    let result = match &cli.command {
        Some(Commands::Write(args)) => args
            .messages
            .iter()
            .try_for_each(|message| host.log(message))
            .map_err(anyhow::Error::from),
        None => pump_stdin(&host, config_path.as_deref()).await,
    };

    host.finish().await;
    result
}

/// Log stdin lines until EOF or Ctrl-C. On unix, SIGHUP reloads the config.
async fn pump_stdin(host: &Host, config_path: Option<&Path>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut reload = ReloadSignal::new()?;

    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("failed to read stdin")? {
                Some(line) => host.log(&line)?,
                None => break,
            },
            _ = &mut ctrl_c => {
                tracing::debug!("interrupted");
                break;
            }
            _ = reload.recv() => {
                let Some(path) = config_path else {
                    tracing::warn!("no config file to reload");
                    continue;
                };
                match LoggerOptions::load(path) {
                    Ok(options) => {
                        host.reload(&options)?;
                    }
                    Err(e) => tracing::warn!(error = %e, "config reload failed"),
                }
            }
        }
    }
    Ok(())
}

#[cfg(unix)]
struct ReloadSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl ReloadSignal {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self(signal(SignalKind::hangup())?))
    }

    async fn recv(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
struct ReloadSignal;

#[cfg(not(unix))]
impl ReloadSignal {
    fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        std::future::pending::<()>().await
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
