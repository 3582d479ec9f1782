//! Slack client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SLACK_BOT_TOKEN` - Slack bot or user token (xoxb-... / xoxp-...)
//!
//! ## Optional
//! - `SLACK_API_BASE` - Web API base URL (default: <https://slack.com/api>)
//! - `SLACK_HTTP_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `SLACK_CHANNEL_ID` - Default channel for `message`
//! - `SLACK_CANVAS_ID` - Canvas edited by the `canvas` commands
//!
//! ## Optional (Lists - all three must be set together)
//! - `SLACK_LIST_ID` - List file ID (F...)
//! - `SLACK_WEBHOOK_ADD` - Trigger URL of the "add item" workflow
//! - `SLACK_WEBHOOK_DELETE` - Trigger URL of the "delete item" workflow
//! - `SLACK_WEBHOOK_COMPLETE` - Trigger URL of the "complete item" workflow
//!   (optional, enables completing and un-completing items)
//!
//! ## Optional (Logging)
//! - `LOG_LEVEL` - Log level or filter directive (default: info)
//! - `LOG_FILE` - Log file path (default: debug.log, `none` disables it)
//! - `LOG_FORMAT` - Console format, `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN (CLI only)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use slack_clients_core::{CanvasId, ChannelId, ListId};
use thiserror::Error;
use url::Url;

use crate::transport::SLACK_API_BASE;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "debug.log";

/// Token prefixes issued by Slack (bot, user, app-level, rotating).
const TOKEN_PREFIXES: &[&str] = &["xoxb-", "xoxp-", "xoxa-", "xoxe", "xapp-"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Slack client configuration.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Slack API token
    pub bot_token: SecretString,
    /// Web API base URL
    pub api_base: Url,
    /// Per-request timeout, `None` for the HTTP client default
    pub http_timeout: Option<Duration>,
    /// Default channel for messages (optional)
    pub channel_id: Option<ChannelId>,
    /// Canvas to edit (optional)
    pub canvas_id: Option<CanvasId>,
    /// List and workflow webhooks (optional)
    pub list: Option<ListConfig>,
    /// Logging sinks
    pub log: LogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Slack list configuration.
///
/// Webhook URLs are kept as raw strings here and validated when the list
/// client is constructed, so a malformed URL fails there with a
/// `SlackError::Config` naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// List file ID
    pub list_id: ListId,
    /// Trigger URL of the "add item" workflow
    pub webhook_add: String,
    /// Trigger URL of the "delete item" workflow
    pub webhook_delete: String,
    /// Trigger URL of the "complete item" workflow (optional)
    pub webhook_complete: Option<String>,
}

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level or `EnvFilter` directive, e.g. `info` or `slack_clients=debug`
    pub level: String,
    /// Log file, `None` for console only
    pub file: Option<PathBuf>,
    /// Console format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            format: LogFormat::Text,
        }
    }
}

impl SlackConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let bot_token = env.required("SLACK_BOT_TOKEN")?;
        if !TOKEN_PREFIXES.iter().any(|p| bot_token.starts_with(p)) {
            tracing::warn!("SLACK_BOT_TOKEN does not look like a Slack token");
        }

        let api_base_raw = env.or_default("SLACK_API_BASE", SLACK_API_BASE);
        let api_base = Url::parse(&api_base_raw)
            .map_err(|e| ConfigError::InvalidEnvVar("SLACK_API_BASE".to_string(), e.to_string()))?;

        let http_timeout = env
            .optional("SLACK_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("SLACK_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            api_base,
            http_timeout,
            channel_id: env.optional("SLACK_CHANNEL_ID").map(ChannelId::from),
            canvas_id: env.optional("SLACK_CANVAS_ID").map(CanvasId::from),
            list: ListConfig::from_env(&env)?,
            log: LogConfig::from_env(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }

    /// Returns the list configuration, if all list variables were set.
    #[must_use]
    pub const fn list(&self) -> Option<&ListConfig> {
        self.list.as_ref()
    }
}

impl ListConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Option<Self>, ConfigError> {
        let list_id = env.optional("SLACK_LIST_ID");
        let webhook_add = env.optional("SLACK_WEBHOOK_ADD");
        let webhook_delete = env.optional("SLACK_WEBHOOK_DELETE");
        let webhook_complete = env.optional("SLACK_WEBHOOK_COMPLETE");

        match (list_id, webhook_add, webhook_delete) {
            (Some(id), Some(add), Some(delete)) => Ok(Some(Self {
                list_id: ListId::from(id),
                webhook_add: add,
                webhook_delete: delete,
                webhook_complete,
            })),
            (None, None, None) if webhook_complete.is_none() => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "SLACK_LIST_ID/SLACK_WEBHOOK_*".to_string(),
                "SLACK_LIST_ID, SLACK_WEBHOOK_ADD and SLACK_WEBHOOK_DELETE must be set together"
                    .to_string(),
            )),
        }
    }
}

impl LogConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let format = match env.optional("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        let file = match env.optional("LOG_FILE") {
            Some(path) if path.eq_ignore_ascii_case("none") => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        Ok(Self {
            level: env.or_default("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            file,
            format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup that treats empty values as unset.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
