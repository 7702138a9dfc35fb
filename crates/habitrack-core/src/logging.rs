//! Tracing setup.
//!
//! The TUI owns the terminal, so events go to a daily-rolling file under
//! `${HABITRACK_HOME}/logs` instead of stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::paths;

/// Env var holding the filter directives (e.g. `debug`, `habitrack_core=trace`).
pub const LOG_ENV: &str = "HABITRACK_LOG";
const LOG_FILE_PREFIX: &str = "habitrack.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `${HABITRACK_HOME}/logs`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes buffered events.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init() -> Result<WorkerGuard> {
    init_in(&paths::logs_dir())
}

/// Installs the global subscriber writing to `dir`.
///
/// # Errors
/// Returns an error if `dir` cannot be created or a subscriber is already
/// installed.
pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
