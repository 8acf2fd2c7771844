//! Tracing setup. Events go to a log file in the data directory because the
//! terminal UI owns stdout.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Config;

pub(crate) fn init(config: &Config) -> Result<()> {
    let path = config.log_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file: {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_log)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
