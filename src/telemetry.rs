//! Logging setup for the binaries
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate plus any extra directives the binary passes. Output goes to stderr
//! (stdout belongs to command output) or to the configured file.

use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(config: &LoggingConfig, extra: &[&str]) -> String {
    let mut directives = vec![format!("rentdesk={}", config.level)];
    directives.extend(extra.iter().map(|d| d.to_string()));
    directives.join(",")
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig, extra: &[&str]) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config, extra)));

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format.as_str() {
        "json" => registry.with(fmt_layer.json()).try_init(),
        _ => registry.with(fmt_layer).try_init(),
    };
    result.context("Failed to install tracing subscriber")
}
