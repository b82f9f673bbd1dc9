//! Tracing setup.
//!
//! The TUI owns stdout, so interactive sessions log to a file. Headless
//! commands log to stderr. `RUST_LOG` takes precedence over the configured filter.

use crate::config::LoggingConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "docsum.log";

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Log to `<directory>/docsum.log`. Keep the guard alive until exit so buffered lines are flushed.
pub fn init_file(config: &LoggingConfig) -> anyhow::Result<(WorkerGuard, PathBuf)> {
    let directory = config.directory();
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::never(&directory, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter(config))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()?;

    Ok((guard, directory.join(LOG_FILE_NAME)))
}

/// Log to stderr
pub fn init_stderr(config: &LoggingConfig) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(filter(config))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}
