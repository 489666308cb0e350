//! Process-wide tracing setup for the shell

use crate::config::LoggingConfig;
use crate::error::{Result, ShellError};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Default directory for the rolling log files.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".waypost/logs")
}

/// Install the global subscriber: a daily rolling file named after
/// `component`, plus stderr when configured.
///
/// `RUST_LOG` overrides `config.level`. Fails if a global subscriber is
/// already installed. Keep the returned guard alive until shutdown or
/// buffered lines are lost.
pub fn init_logging(component: &str, config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = config.directory.clone().unwrap_or_else(log_dir);
    std::fs::create_dir_all(&dir)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ShellError::Config(format!("invalid logging.level '{}': {e}", config.level))
        })?,
    };

    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, component));
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = config.to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| ShellError::Internal(format!("logging already initialized: {e}")))?;

    Ok(guard)
}
