//! Chat messaging.

use slack_clients_core::ChannelId;
use tracing::{error, info, instrument};

use crate::error::SlackError;
use crate::transport::SlackTransport;
use crate::types::{PostMessageResponse, SlackMessage};

/// Client for posting chat messages.
#[derive(Debug, Clone)]
pub struct MessageClient {
    transport: SlackTransport,
}

impl MessageClient {
    /// Create a message client on top of a transport handle.
    #[must_use]
    pub const fn new(transport: SlackTransport) -> Self {
        Self { transport }
    }

    /// Post a plain text message to a channel.
    ///
    /// # Errors
    ///
    /// Returns `SlackError::Api` carrying Slack's error code (for example
    /// `channel_not_found`) if Slack rejects the message, or a transport
    /// error if the request fails.
    #[instrument(skip(self, text), fields(channel = %channel))]
    pub async fn send_message(
        &self,
        channel: &ChannelId,
        text: &str,
    ) -> Result<PostMessageResponse, SlackError> {
        let message = SlackMessage {
            channel: channel.as_str(),
            text,
        };

        match self
            .transport
            .call_json::<_, PostMessageResponse>("chat.postMessage", &message)
            .await
        {
            Ok(response) => {
                info!(ts = %response.ts, "Message sent successfully");
                Ok(response)
            }
            Err(e) => {
                error!(error = %e, "Error sending message");
                Err(e)
            }
        }
    }
}
