//! Reading the current list state.

use async_trait::async_trait;
use slack_clients_core::{ListId, Snapshot};
use tracing::{debug, instrument};

use super::export::parse_list_csv;
use crate::error::SlackError;
use crate::transport::SlackTransport;
use crate::types::FileInfoResponse;

/// Metadata field holding the export URL of a list file.
const CSV_DOWNLOAD_FIELD: &str = "list_csv_download_url";

/// Source of list snapshots.
///
/// Implementations must re-fetch on every call; callers rely on reads never
/// being cached.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Read the whole list as it is now.
    async fn read(&self) -> Result<Snapshot, SlackError>;
}

/// Reads a list through `files.info` and its CSV export.
#[derive(Debug, Clone)]
pub struct ApiSnapshotReader {
    transport: SlackTransport,
    list_id: ListId,
}

impl ApiSnapshotReader {
    /// Create a reader for the given list.
    #[must_use]
    pub const fn new(transport: SlackTransport, list_id: ListId) -> Self {
        Self { transport, list_id }
    }

    /// The list this reader fetches.
    #[must_use]
    pub const fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Resolve the export URL from the list's file metadata.
    async fn export_url(&self) -> Result<String, SlackError> {
        let info: FileInfoResponse = self
            .transport
            .call_form("files.info", &[("file", self.list_id.as_str())])
            .await
            .map_err(|e| SlackError::SnapshotUnavailable(format!("List metadata lookup failed: {e}")))?;

        info.str_field(CSV_DOWNLOAD_FIELD)
            .map(String::from)
            .ok_or_else(|| {
                SlackError::SnapshotUnavailable(format!(
                    "files.info for {} has no {CSV_DOWNLOAD_FIELD}",
                    self.list_id
                ))
            })
    }
}

#[async_trait]
impl SnapshotSource for ApiSnapshotReader {
    #[instrument(skip(self))]
    async fn read(&self) -> Result<Snapshot, SlackError> {
        let url = self.export_url().await?;

        let body = self
            .transport
            .download_text(&url)
            .await
            .map_err(|e| SlackError::SnapshotUnavailable(format!("List export download failed: {e}")))?;

        let snapshot = parse_list_csv(&body)?;
        debug!(list_id = %self.list_id, items = snapshot.len(), "Read list snapshot");
        Ok(snapshot)
    }
}
