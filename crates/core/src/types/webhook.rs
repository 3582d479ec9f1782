//! Slack workflow webhook URL type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Workflow trigger URLs look like
/// `https://hooks.slack.com/triggers/T0AB12CD3/8123456789012/0f1e2d3c4b5a69788796a5b4c3d2e1f0`.
static WEBHOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://hooks\.slack\.com/triggers/[A-Za-z0-9]+/[0-9]+/[A-Fa-f0-9]+$")
        .expect("Invalid regex")
});

/// Errors that can occur when parsing a [`WebhookUrl`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookUrlError {
    /// The input string is empty.
    #[error("webhook URL cannot be empty")]
    Empty,
    /// The input is not a Slack workflow trigger URL.
    #[error("not a Slack workflow trigger URL: {0}")]
    Malformed(String),
}

/// Returns `true` if `url` is a Slack workflow trigger URL.
///
/// The expected shape is
/// `https://hooks.slack.com/triggers/<alphanumeric>/<digits>/<hex>`.
#[must_use]
pub fn is_valid_webhook(url: &str) -> bool {
    WEBHOOK_RE.is_match(url)
}

/// A validated Slack workflow trigger URL.
///
/// Webhooks are obtained by editing the "Start the workflow..." step of a
/// Slack workflow. Each list operation (add, delete, complete) is bound to
/// its own workflow, so a list client carries two or three of these.
///
/// ## Examples
///
/// ```
/// use slack_clients_core::WebhookUrl;
///
/// assert!(WebhookUrl::parse("https://hooks.slack.com/triggers/T01ABC/123456/abcdef01").is_ok());
///
/// // Wrong scheme and a non-hex suffix
/// assert!(WebhookUrl::parse("http://hooks.slack.com/triggers/abc/123/xyz").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WebhookUrl(String);

impl WebhookUrl {
    /// Parse a `WebhookUrl` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or does not match the Slack
    /// workflow trigger pattern.
    pub fn parse(s: &str) -> Result<Self, WebhookUrlError> {
        if s.is_empty() {
            return Err(WebhookUrlError::Empty);
        }
        if !is_valid_webhook(s) {
            return Err(WebhookUrlError::Malformed(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebhookUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WebhookUrl {
    type Err = WebhookUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WebhookUrl {
    type Error = WebhookUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WebhookUrl> for String {
    fn from(url: WebhookUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for WebhookUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID: &str =
        "https://hooks.slack.com/triggers/T01ABCDEF/8123456789012/0f1e2d3c4b5a69788796a5b4c3d2e1f0";

    #[test]
    fn test_parse_valid() {
        let url = WebhookUrl::parse(VALID).unwrap();
        assert_eq!(url.as_str(), VALID);
        assert!(is_valid_webhook(VALID));
    }

    #[test]
    fn test_parse_uppercase_hex() {
        assert!(WebhookUrl::parse("https://hooks.slack.com/triggers/abc123/42/ABCDEF0123").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(WebhookUrl::parse(""), Err(WebhookUrlError::Empty));
    }

    #[test]
    fn test_wrong_scheme_and_non_hex_suffix() {
        let result = WebhookUrl::parse("http://hooks.slack.com/triggers/abc/123/xyz");
        assert!(matches!(result, Err(WebhookUrlError::Malformed(_))));
    }

    #[test]
    fn test_rejects_non_digit_middle_segment() {
        assert!(!is_valid_webhook("https://hooks.slack.com/triggers/abc/12a/abcdef"));
    }

    #[test]
    fn test_rejects_other_hosts() {
        assert!(!is_valid_webhook("https://hooks.example.com/triggers/abc/123/abcdef"));
        assert!(!is_valid_webhook("https://hooks.slack.com/services/abc/123/abcdef"));
    }

    #[test]
    fn test_rejects_trailing_content() {
        let trailing = format!("{VALID}/extra");
        assert!(!is_valid_webhook(&trailing));
        let query = format!("{VALID}?x=1");
        assert!(!is_valid_webhook(&query));
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let parsed: Result<WebhookUrl, _> = serde_json::from_str("\"https://example.com\"");
        assert!(parsed.is_err());

        let parsed: WebhookUrl = serde_json::from_str(&format!("\"{VALID}\"")).unwrap();
        assert_eq!(parsed.as_str(), VALID);
    }
}
