//! Canvas editing and metadata.

use serde::de::IgnoredAny;
use serde_json::{Map, Value};
use slack_clients_core::CanvasId;
use tracing::{error, info, instrument};

use crate::error::SlackError;
use crate::transport::SlackTransport;
use crate::types::{CanvasEdit, FileInfoResponse};

/// Client bound to a single canvas.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    transport: SlackTransport,
    canvas_id: CanvasId,
}

impl CanvasClient {
    /// Create a canvas client on top of a transport handle.
    #[must_use]
    pub const fn new(transport: SlackTransport, canvas_id: CanvasId) -> Self {
        Self {
            transport,
            canvas_id,
        }
    }

    /// The canvas this client edits.
    #[must_use]
    pub const fn canvas_id(&self) -> &CanvasId {
        &self.canvas_id
    }

    /// Replace the whole canvas with the given markdown.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Api` if Slack rejects the edit (for example
    /// `canvas_not_found`), or a transport error if the request fails.
    #[instrument(skip(self, markdown), fields(canvas_id = %self.canvas_id))]
    pub async fn update_canvas(&self, markdown: &str) -> Result<(), SlackError> {
        let edit = CanvasEdit::replace_all(self.canvas_id.as_str(), markdown);

        match self
            .transport
            .call_json::<_, IgnoredAny>("canvases.edit", &edit)
            .await
        {
            Ok(_) => {
                info!("Canvas updated");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error updating canvas");
                Err(e)
            }
        }
    }

    /// Fetch the canvas file metadata from `files.info`.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Api` if Slack rejects the lookup, or a transport
    /// error if the request fails.
    #[instrument(skip(self), fields(canvas_id = %self.canvas_id))]
    pub async fn canvas_info(&self) -> Result<Map<String, Value>, SlackError> {
        match self
            .transport
            .call_form::<FileInfoResponse>("files.info", &[("file", self.canvas_id.as_str())])
            .await
        {
            Ok(response) => Ok(response.file),
            Err(e) => {
                error!(error = %e, "Error fetching canvas info");
                Err(e)
            }
        }
    }

    /// The canvas permalink.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Api` if the metadata has no `permalink` field,
    /// or any error from [`Self::canvas_info`].
    pub async fn permalink(&self) -> Result<String, SlackError> {
        let info = self.canvas_info().await?;
        info.get("permalink")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| SlackError::Api("Canvas does not have a permalink".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> CanvasClient {
        let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
        let transport =
            SlackTransport::with_options(SecretString::from("xoxb-test"), &base, None).unwrap();
        CanvasClient::new(transport, CanvasId::new("F0CANVAS"))
    }

    #[tokio::test]
    async fn test_update_canvas_replaces_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/canvases.edit"))
            .and(body_json(json!({
                "canvas_id": "F0CANVAS",
                "changes": [{
                    "operation": "replace",
                    "document_content": {"type": "markdown", "markdown": "# Standup\n- ship it"}
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .update_canvas("# Standup\n- ship it")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_canvas_bad_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": false, "error": "canvas_not_found"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).update_canvas("x").await;
        assert!(matches!(result, Err(SlackError::Api(code)) if code == "canvas_not_found"));
    }

    #[tokio::test]
    async fn test_permalink() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files.info"))
            .and(body_string_contains("file=F0CANVAS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "file": {
                    "id": "F0CANVAS",
                    "title": "Standup",
                    "permalink": "https://acme.slack.com/docs/T0/F0CANVAS"
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let info = client.canvas_info().await.unwrap();
        assert_eq!(info["title"], "Standup");
        assert_eq!(
            client.permalink().await.unwrap(),
            "https://acme.slack.com/docs/T0/F0CANVAS"
        );
    }

    #[tokio::test]
    async fn test_permalink_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "file": {"id": "F0CANVAS"}})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).permalink().await;
        assert!(matches!(result, Err(SlackError::Api(msg)) if msg.contains("permalink")));
    }
}
