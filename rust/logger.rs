use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "program.log";

/// Installs the process-wide subscriber: one layer on stdout, one appending
/// to `LOG_FILE`. Must be called once, before anything logs.
pub fn init_logging() -> Result<()> {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "DEBUG".to_string());
    let level = level.to_lowercase();

    let filter = match env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(level),
    };

    let path = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {path}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
