//! Slack client errors.

use thiserror::Error;

/// Errors that can occur when interacting with Slack.
///
/// Read paths propagate every variant. Mutation paths inside a list
/// reconciliation log and skip `Transport` and `Webhook` failures, but
/// configuration errors always propagate.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP request failed before a response arrived.
    #[error("Slack request failed: {0}")]
    Transport(String),

    /// Failed to read or decode a response.
    #[error("Slack response error: {0}")]
    Response(String),

    /// Slack API answered `ok: false` or omitted a required field.
    #[error("Slack API error: {0}")]
    Api(String),

    /// A workflow trigger answered with a status other than 200.
    #[error("Webhook returned {status}: {body}")]
    Webhook {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The list export could not be located or fetched.
    #[error("List snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    /// Invalid configuration, such as a malformed webhook URL.
    #[error("Slack configuration error: {0}")]
    Config(String),

    /// An optional feature was used without configuring it.
    #[error("Slack capability not configured: {0}")]
    CapabilityUnavailable(&'static str),
}

impl SlackError {
    /// Whether this is a configuration problem rather than a runtime failure.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::CapabilityUnavailable(_))
    }
}
