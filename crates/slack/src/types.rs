//! Slack Web API request and response bodies.
//!
//! Only the fields the clients read are modelled. The `ok`/`error`
//! envelope is checked by the transport before these are decoded.
//!
//! See: <https://api.slack.com/web>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A plain text chat message.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage<'a> {
    /// Channel ID to post to.
    pub channel: &'a str,
    /// Message text (mrkdwn is rendered by Slack).
    pub text: &'a str,
}

/// Response from `chat.postMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    /// Channel ID where the message was posted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Message timestamp (unique ID).
    pub ts: String,
}

/// Response from `files.info`.
///
/// The `file` object differs between canvases, lists and uploads, so it is
/// kept as a raw JSON map.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfoResponse {
    /// File metadata.
    pub file: Map<String, Value>,
}

impl FileInfoResponse {
    /// Read a string field from the file metadata.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.file.get(key).and_then(Value::as_str)
    }
}

// =============================================================================
// Canvas Editing
// =============================================================================

/// Body of a `canvases.edit` call.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasEdit<'a> {
    /// Canvas to edit.
    pub canvas_id: &'a str,
    /// Edits to apply, in order.
    pub changes: Vec<CanvasChange<'a>>,
}

/// A single canvas edit operation.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasChange<'a> {
    /// Edit operation (`replace`, `insert_after`, ...).
    pub operation: &'static str,
    /// New document content.
    pub document_content: DocumentContent<'a>,
}

/// Canvas document content.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentContent<'a> {
    /// Content type, always `markdown`.
    #[serde(rename = "type")]
    pub content_type: &'static str,
    /// Markdown source.
    pub markdown: &'a str,
}

impl<'a> CanvasEdit<'a> {
    /// Build an edit that replaces the whole canvas with `markdown`.
    #[must_use]
    pub fn replace_all(canvas_id: &'a str, markdown: &'a str) -> Self {
        Self {
            canvas_id,
            changes: vec![CanvasChange {
                operation: "replace",
                document_content: DocumentContent {
                    content_type: "markdown",
                    markdown,
                },
            }],
        }
    }
}

// =============================================================================
// Workflow Webhooks
// =============================================================================

/// Parameters sent to a list workflow trigger.
///
/// The add and delete workflows take only `name`; the complete workflow also
/// takes `completed`, which Slack expects as `"Yes"` or `"No"`.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload<'a> {
    /// Item name.
    pub name: &'a str,
    /// Completion flag for the complete workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<&'static str>,
}

impl<'a> WebhookPayload<'a> {
    /// Payload for the add and delete workflows.
    #[must_use]
    pub const fn name(name: &'a str) -> Self {
        Self {
            name,
            completed: None,
        }
    }

    /// Payload for the complete workflow.
    #[must_use]
    pub const fn completion(name: &'a str, completed: bool) -> Self {
        Self {
            name,
            completed: Some(if completed { "Yes" } else { "No" }),
        }
    }
}
