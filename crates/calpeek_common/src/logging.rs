//! Logging utilities for the calpeek services.
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and a formatted stdout
//! layer, optionally mirrored to a daily rolling file.

use calpeek_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{config_error, CalpeekError};

const LOG_FILE_PREFIX: &str = "calpeek.log";

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured; `level` is added for the `calpeek`
/// crates on top of them. Calling this twice is harmless: the second call
/// leaves the existing subscriber in place.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// When `directory` is set, a daily rolling file is written there as well. The
/// returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Result<Option<WorkerGuard>, CalpeekError> {
    let level = parse_level(&config.level)?;

    let Some(directory) = config.directory.as_deref() else {
        init_with_level(level);
        return Ok(None);
    };

    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file output in {})",
            level, directory
        );
    }
    Ok(Some(guard))
}

fn parse_level(raw: &str) -> Result<Level, CalpeekError> {
    Level::from_str(raw.trim()).map_err(|_| config_error(format!("invalid log level '{raw}'")))
}

fn stdout_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("calpeek={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
