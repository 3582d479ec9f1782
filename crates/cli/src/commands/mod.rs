//! Subcommand implementations.

pub mod canvas;
pub mod list;
pub mod message;

use slack_clients::{SlackConfig, SlackError, SlackTransport};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A feature was used without its environment variables.
    #[error("Missing configuration: {0}")]
    NotConfigured(&'static str),

    /// Slack request failed.
    #[error(transparent)]
    Slack(#[from] SlackError),

    /// Input file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Output could not be serialized.
    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),

    /// Sync was given no item names.
    #[error("No item names given; use `clear` to empty the list")]
    NoNames,

    /// Some list mutations failed.
    #[error("{0} list change(s) failed")]
    Partial(usize),
}

/// Build the shared transport from configuration.
fn transport(config: &SlackConfig) -> Result<SlackTransport, CommandError> {
    Ok(SlackTransport::from_config(config)?)
}

/// Read a UTF-8 file, naming it in the error.
fn read_file(path: &std::path::Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::ReadFile {
        path: path.display().to_string(),
        source,
    })
}
