//! Slack list client.
//!
//! A list is read through its CSV export and written through three workflow
//! webhooks (add, delete, complete). Nothing confirms that a triggered
//! workflow actually changed the list, so every decision is taken against a
//! fresh [`Snapshot`] and success is judged by status codes alone.
//!
//! # Example
//!
//! ```rust,ignore
//! use slack_clients::lists::SlackListClient;
//!
//! let client = SlackListClient::new(&transport, config.list().unwrap())?;
//! let report = client.update_list(["Milk", "Eggs"], true).await?;
//! if !report.is_complete() {
//!     tracing::warn!(failed = report.failed.len(), "Partial sync");
//! }
//! ```

mod export;
mod gateway;
mod reconcile;
mod snapshot;

pub use export::{parse_assignee, parse_completed, parse_due_date, parse_list_csv};
pub use gateway::{COMPLETION_CAPABILITY, ItemMutations, WebhookEndpoints, WebhookGateway};
pub use reconcile::{DesiredState, ListAction, SyncPolicy, plan, plan_clear};
pub use snapshot::{ApiSnapshotReader, SnapshotSource};

use slack_clients_core::{Snapshot, WebhookUrl};
use tracing::{error, info, instrument, warn};

use crate::config::ListConfig;
use crate::error::SlackError;
use crate::transport::SlackTransport;

/// Result of a guarded single-item call.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The webhook accepted the mutation.
    Applied,
    /// The list was already in the requested state; nothing was sent.
    Skipped,
    /// The webhook call failed. The failure has already been logged.
    Failed(SlackError),
}

impl ItemOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Summary of an [`SlackListClient::update_list`] or
/// [`SlackListClient::clear_list`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of mutations planned.
    pub planned: usize,
    /// Number of mutations the webhooks accepted.
    pub applied: usize,
    /// Mutations whose webhook call failed, in plan order.
    pub failed: Vec<ListAction>,
}

impl SyncReport {
    /// Whether every planned mutation was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Client for one Slack list.
///
/// Generic over the read and write sides so either can be replaced; the
/// defaults talk to Slack.
#[derive(Debug, Clone)]
pub struct SlackListClient<R = ApiSnapshotReader, G = WebhookGateway> {
    reader: R,
    gateway: G,
}

impl SlackListClient {
    /// Create a client for the configured list.
    ///
    /// The webhook HTTP calls share the transport's connection pool.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Config` naming the field if a webhook URL is not
    /// a Slack workflow trigger URL.
    pub fn new(transport: &SlackTransport, config: &ListConfig) -> Result<Self, SlackError> {
        let add = validate_webhook("webhook_add", &config.webhook_add)?;
        let delete = validate_webhook("webhook_delete", &config.webhook_delete)?;
        let complete = config
            .webhook_complete
            .as_deref()
            .map(|url| validate_webhook(COMPLETION_CAPABILITY, url))
            .transpose()?;

        let endpoints = WebhookEndpoints::from_webhooks(&add, &delete, complete.as_ref())?;

        Ok(Self::from_parts(
            ApiSnapshotReader::new(transport.clone(), config.list_id.clone()),
            WebhookGateway::new(transport.http().clone(), endpoints),
        ))
    }
}

fn validate_webhook(field: &str, url: &str) -> Result<WebhookUrl, SlackError> {
    WebhookUrl::parse(url)
        .map_err(|e| SlackError::Config(format!("{field} is an invalid Slack webhook URL: {e}")))
}

impl<R: SnapshotSource, G: ItemMutations> SlackListClient<R, G> {
    /// Assemble a client from any reader and gateway.
    pub const fn from_parts(reader: R, gateway: G) -> Self {
        Self { reader, gateway }
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Read the list.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::SnapshotUnavailable` if the list cannot be read.
    pub async fn get_list_items(&self) -> Result<Snapshot, SlackError> {
        self.snapshot().await
    }

    /// Add an item unless one with that name exists.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be read.
    #[instrument(skip(self))]
    pub async fn add_item(&self, name: &str) -> Result<ItemOutcome, SlackError> {
        if self.snapshot().await?.contains(name) {
            warn!("Item already exists, not adding");
            return Ok(ItemOutcome::Skipped);
        }
        outcome(self.gateway.add(name).await)
    }

    /// Delete an item if one with that name exists.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be read.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, name: &str) -> Result<ItemOutcome, SlackError> {
        if !self.snapshot().await?.contains(name) {
            warn!("Item not found, not deleting");
            return Ok(ItemOutcome::Skipped);
        }
        outcome(self.gateway.delete(name).await)
    }

    /// Mark an item completed (`complete = true`) or open again.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::CapabilityUnavailable` before any network call if
    /// no complete webhook is configured, or error if the list cannot be read.
    #[instrument(skip(self))]
    pub async fn complete_item(
        &self,
        name: &str,
        complete: bool,
    ) -> Result<ItemOutcome, SlackError> {
        if !self.gateway.supports_completion() {
            error!("No complete webhook configured, cannot change completion");
            return Err(SlackError::CapabilityUnavailable(COMPLETION_CAPABILITY));
        }

        let snapshot = self.snapshot().await?;
        match snapshot.find(name) {
            None => {
                warn!("Item not found, not changing completion");
                Ok(ItemOutcome::Skipped)
            }
            Some(item) if item.completed == complete => {
                info!("Item already in requested state");
                Ok(ItemOutcome::Skipped)
            }
            Some(_) => outcome(self.gateway.set_completed(name, complete).await),
        }
    }

    /// Make the list contain exactly `names`.
    ///
    /// Reads the list once, deletes rows not in `names`, reopens completed
    /// rows that stay (if `uncomplete` is set) and adds missing names. A
    /// failed webhook call is recorded in the report and the run continues.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be read, or
    /// `SlackError::CapabilityUnavailable` before any mutation if a row would
    /// need reopening without a complete webhook.
    #[instrument(skip(self, names))]
    pub async fn update_list<I, S>(
        &self,
        names: I,
        uncomplete: bool,
    ) -> Result<SyncReport, SlackError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let desired: DesiredState = names.into_iter().collect();
        let snapshot = self.snapshot().await?;
        let policy = SyncPolicy {
            uncomplete_on_sync: uncomplete,
        };

        let actions = plan(&desired, &snapshot, policy);
        if actions.iter().any(ListAction::needs_completion) && !self.gateway.supports_completion() {
            error!("No complete webhook configured, cannot reopen completed items");
            return Err(SlackError::CapabilityUnavailable(COMPLETION_CAPABILITY));
        }

        info!(
            desired = desired.len(),
            current = snapshot.len(),
            planned = actions.len(),
            "Synchronizing list"
        );
        let report = self.apply(actions).await?;
        info!(
            applied = report.applied,
            failed = report.failed.len(),
            "List synchronized"
        );
        Ok(report)
    }

    /// Delete every row of the list.
    ///
    /// # Errors
    ///
    /// Returns error if the list cannot be read.
    #[instrument(skip(self))]
    pub async fn clear_list(&self) -> Result<SyncReport, SlackError> {
        let snapshot = self.snapshot().await?;
        info!(items = snapshot.len(), "Clearing list");
        let report = self.apply(plan_clear(&snapshot)).await?;
        info!(
            deleted = report.applied,
            failed = report.failed.len(),
            "List cleared"
        );
        Ok(report)
    }

    /// Apply actions in order, one call at a time.
    async fn apply(&self, actions: Vec<ListAction>) -> Result<SyncReport, SlackError> {
        let mut report = SyncReport {
            planned: actions.len(),
            ..SyncReport::default()
        };

        for action in actions {
            let result = match &action {
                ListAction::Delete(name) => self.gateway.delete(name).await,
                ListAction::Uncomplete(name) => self.gateway.set_completed(name, false).await,
                ListAction::Add(name) => self.gateway.add(name).await,
            };
            match result {
                Ok(()) => report.applied += 1,
                Err(e) if e.is_configuration() => return Err(e),
                // Already logged by the gateway.
                Err(_) => report.failed.push(action),
            }
        }

        Ok(report)
    }

    async fn snapshot(&self) -> Result<Snapshot, SlackError> {
        let snapshot = self.reader.read().await?;
        let duplicates = snapshot.duplicate_names();
        if !duplicates.is_empty() {
            warn!(?duplicates, "List has duplicate item names");
        }
        Ok(snapshot)
    }
}

fn outcome(result: Result<(), SlackError>) -> Result<ItemOutcome, SlackError> {
    match result {
        Ok(()) => Ok(ItemOutcome::Applied),
        Err(e) if e.is_configuration() => Err(e),
        Err(e) => Ok(ItemOutcome::Failed(e)),
    }
}
