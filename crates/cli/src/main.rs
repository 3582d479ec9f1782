//! Slack list automation CLI.
//!
//! # Usage
//!
//! ```bash
//! # Show the list
//! slack-lists items
//!
//! # Make the list contain exactly these items, reopening completed ones
//! slack-lists sync "Milk" "Eggs" "Bread"
//! slack-lists sync --file groceries.txt --keep-completed
//!
//! # Single items
//! slack-lists add "Milk"
//! slack-lists complete "Milk"
//! slack-lists complete "Milk" --undo
//!
//! # Canvas and messages
//! slack-lists canvas update --file standup.md
//! slack-lists message --channel C0123456 "Deploy finished"
//! ```
//!
//! Configuration is read from the environment and `.env`; see
//! `slack_clients::config` for the variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use slack_clients::{LogConfig, SlackConfig, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "slack-lists")]
#[command(author, version, about = "Slack list, canvas and message automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the list items
    Items {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item if it is not on the list
    Add {
        /// Item name
        name: String,
    },
    /// Delete an item if it is on the list
    Delete {
        /// Item name
        name: String,
    },
    /// Mark an item completed
    Complete {
        /// Item name
        name: String,

        /// Reopen the item instead
        #[arg(long)]
        undo: bool,
    },
    /// Make the list contain exactly the given items
    Sync {
        /// Item names
        #[arg(required_unless_present = "file")]
        names: Vec<String>,

        /// Read item names from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Leave completed items completed
        #[arg(long)]
        keep_completed: bool,
    },
    /// Delete every item on the list
    Clear,
    /// Post a message to a channel
    Message {
        /// Message text
        text: String,

        /// Channel ID (defaults to `SLACK_CHANNEL_ID`)
        #[arg(short, long)]
        channel: Option<String>,
    },
    /// Edit or inspect the configured canvas
    Canvas {
        #[command(subcommand)]
        action: CanvasAction,
    },
}

#[derive(Subcommand)]
enum CanvasAction {
    /// Replace the canvas content with a markdown file
    Update {
        /// Markdown file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print the canvas metadata as JSON
    Info,
    /// Print the canvas permalink
    Permalink,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SlackConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match SlackConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // No configuration means no configured sinks; log to the console.
            let console = LogConfig {
                file: None,
                ..LogConfig::default()
            };
            let _ = telemetry::init(&console);
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the subscriber
    let sentry_guard = init_sentry(&config);
    let sentry_layer = sentry_guard
        .is_some()
        .then(|| sentry_tracing::layer().event_filter(sentry_event_filter));

    if let Err(e) = telemetry::init_with(&config.log, sentry_layer) {
        // Fall back to console only.
        let _ = telemetry::init(&LogConfig {
            file: None,
            ..config.log.clone()
        });
        tracing::warn!("Logging to file disabled: {e}");
    }

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &SlackConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Items { json } => commands::list::items(config, json).await?,
        Commands::Add { name } => commands::list::add(config, &name).await?,
        Commands::Delete { name } => commands::list::delete(config, &name).await?,
        Commands::Complete { name, undo } => {
            commands::list::complete(config, &name, !undo).await?;
        }
        Commands::Sync {
            names,
            file,
            keep_completed,
        } => commands::list::sync(config, names, file.as_deref(), !keep_completed).await?,
        Commands::Clear => commands::list::clear(config).await?,
        Commands::Message { text, channel } => {
            commands::message::send(config, channel, &text).await?;
        }
        Commands::Canvas { action } => match action {
            CanvasAction::Update { file } => commands::canvas::update(config, &file).await?,
            CanvasAction::Info => commands::canvas::info(config).await?,
            CanvasAction::Permalink => commands::canvas::permalink(config).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_requires_names_or_file() {
        assert!(Cli::try_parse_from(["slack-lists", "sync"]).is_err());
        assert!(Cli::try_parse_from(["slack-lists", "sync", "Milk"]).is_ok());
        assert!(Cli::try_parse_from(["slack-lists", "sync", "--file", "names.txt"]).is_ok());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
