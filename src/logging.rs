//! Tracing setup.
//!
//! Commands that print to the terminal log to stderr. The editor owns the
//! terminal, so it logs to the configured file or not at all.

use std::path::Path;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr at the configured level. `RUST_LOG` wins when set.
pub fn init_stderr(config: &LoggingConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(layer)
        .try_init();
}

/// Log to `logging.file` if one is configured. Returns an error only when the
/// file cannot be opened.
pub fn init_editor(config: &LoggingConfig) -> Result<(), InitError> {
    let Some(path) = config.file() else {
        return Ok(());
    };
    let Some(file_name) = path.file_name() else {
        return Ok(());
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)?;

    let layer = fmt::layer().with_writer(appender).with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(layer)
        .try_init();

    Ok(())
}
