//! Process-wide log sinks.
//!
//! Library code only talks to the `tracing` facade. Which sinks receive the
//! events is decided here, by whoever owns the process: console plus an
//! append-only log file by default, or a capturing subscriber in tests.

use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::layer::{Identity, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{LogConfig, LogFormat};

/// Errors that can occur while installing log sinks.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    LogFile(#[from] io::Error),

    /// A global subscriber was already installed.
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Build the level filter.
///
/// `RUST_LOG` wins when set, so per-module directives keep working.
/// Otherwise `config.level` is used; an unparsable level falls back to
/// `info`.
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(config.level.to_ascii_lowercase())
            .unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Open the configured log file for appending, if any.
///
/// # Errors
///
/// Returns error if the file cannot be created or opened.
pub fn open_log_file(config: &LogConfig) -> Result<Option<Arc<File>>, TelemetryError> {
    let Some(path) = &config.file else {
        return Ok(None);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Some(Arc::new(file)))
}

/// Install the default sinks: console (text or JSON) and the log file.
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init(config: &LogConfig) -> Result<(), TelemetryError> {
    init_with(config, Identity::new())
}

/// Install the default sinks plus one extra layer, such as an error
/// tracker's.
///
/// # Errors
///
/// Returns error if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_with<L>(config: &LogConfig, extra: L) -> Result<(), TelemetryError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let file_layer = open_log_file(config)?.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file)
    });
    let json_layer = (config.format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (config.format == LogFormat::Text).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(extra)
        .with(env_filter(config))
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TelemetryError::Install(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_configured() {
        let config = LogConfig {
            file: None,
            ..LogConfig::default()
        };
        assert!(open_log_file(&config).unwrap().is_none());
    }

    #[test]
    fn test_opens_file_for_append() {
        let path = std::env::temp_dir().join(format!("slack-clients-{}.log", std::process::id()));
        let config = LogConfig {
            file: Some(path.clone()),
            ..LogConfig::default()
        };
        assert!(open_log_file(&config).unwrap().is_some());
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unopenable_file() {
        let config = LogConfig {
            file: Some(std::env::temp_dir().join("missing-dir").join("nested").join("x.log")),
            ..LogConfig::default()
        };
        assert!(matches!(open_log_file(&config), Err(TelemetryError::LogFile(_))));
    }
}
