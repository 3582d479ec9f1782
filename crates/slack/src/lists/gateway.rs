//! Item mutations through workflow webhooks.
//!
//! A list can only be written by triggering Slack workflows. Each trigger
//! answers with a status code and nothing else: 200 means the workflow was
//! started, not that the list changed.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use slack_clients_core::WebhookUrl;
use tracing::{error, info, instrument};
use url::Url;

use crate::error::SlackError;
use crate::types::WebhookPayload;

/// Name of the optional completion capability, used in error messages.
pub const COMPLETION_CAPABILITY: &str = "webhook_complete";

/// Write side of a list.
///
/// Implementations do not check preconditions; callers decide whether a
/// mutation is needed.
#[async_trait]
pub trait ItemMutations: Send + Sync {
    /// Add an item.
    async fn add(&self, name: &str) -> Result<(), SlackError>;

    /// Delete an item.
    async fn delete(&self, name: &str) -> Result<(), SlackError>;

    /// Mark an item completed or not completed.
    ///
    /// Fails with `SlackError::CapabilityUnavailable` without any network
    /// call if completion is not configured.
    async fn set_completed(&self, name: &str, completed: bool) -> Result<(), SlackError>;

    /// Whether [`Self::set_completed`] can succeed.
    fn supports_completion(&self) -> bool;
}

/// Trigger URLs of the list workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoints {
    pub add: Url,
    pub delete: Url,
    pub complete: Option<Url>,
}

impl WebhookEndpoints {
    /// Build endpoints from arbitrary URLs.
    ///
    /// No trigger URL validation is done here.
    #[must_use]
    pub const fn new(add: Url, delete: Url, complete: Option<Url>) -> Self {
        Self {
            add,
            delete,
            complete,
        }
    }

    /// Build endpoints from validated trigger URLs.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Config` if a URL fails to parse.
    pub fn from_webhooks(
        add: &WebhookUrl,
        delete: &WebhookUrl,
        complete: Option<&WebhookUrl>,
    ) -> Result<Self, SlackError> {
        let parse = |field: &str, webhook: &WebhookUrl| {
            Url::parse(webhook.as_str())
                .map_err(|e| SlackError::Config(format!("{field} is not a URL: {e}")))
        };

        Ok(Self {
            add: parse("webhook_add", add)?,
            delete: parse("webhook_delete", delete)?,
            complete: complete
                .map(|c| parse(COMPLETION_CAPABILITY, c))
                .transpose()?,
        })
    }
}

/// Item mutations over Slack workflow webhooks.
#[derive(Debug, Clone)]
pub struct WebhookGateway {
    client: Client,
    endpoints: WebhookEndpoints,
}

impl WebhookGateway {
    /// Create a gateway. Webhooks are unauthenticated, so any HTTP client
    /// works; pass the transport's to share its connection pool.
    #[must_use]
    pub const fn new(client: Client, endpoints: WebhookEndpoints) -> Self {
        Self { client, endpoints }
    }

    #[must_use]
    pub const fn endpoints(&self) -> &WebhookEndpoints {
        &self.endpoints
    }

    /// POST a payload to a trigger and map the status code.
    async fn trigger(
        &self,
        action: &'static str,
        url: &Url,
        payload: &WebhookPayload<'_>,
    ) -> Result<(), SlackError> {
        let response = match self.client.post(url.clone()).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(action, name = payload.name, error = %e, "Webhook request failed");
                return Err(SlackError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            info!(action, name = payload.name, "Webhook triggered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            action,
            name = payload.name,
            status = status.as_u16(),
            body = %body,
            "Webhook returned an error"
        );
        Err(SlackError::Webhook {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ItemMutations for WebhookGateway {
    #[instrument(skip(self))]
    async fn add(&self, name: &str) -> Result<(), SlackError> {
        self.trigger("add", &self.endpoints.add, &WebhookPayload::name(name))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> Result<(), SlackError> {
        self.trigger("delete", &self.endpoints.delete, &WebhookPayload::name(name))
            .await
    }

    #[instrument(skip(self))]
    async fn set_completed(&self, name: &str, completed: bool) -> Result<(), SlackError> {
        let Some(url) = &self.endpoints.complete else {
            return Err(SlackError::CapabilityUnavailable(COMPLETION_CAPABILITY));
        };
        self.trigger(
            "complete",
            url,
            &WebhookPayload::completion(name, completed),
        )
        .await
    }

    fn supports_completion(&self) -> bool {
        self.endpoints.complete.is_some()
    }
}
