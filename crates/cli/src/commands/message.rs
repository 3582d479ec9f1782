//! Message command.

use slack_clients::{MessageClient, SlackConfig};
use slack_clients_core::ChannelId;

use super::{CommandError, transport};

/// Post `text` to `channel`, or to `SLACK_CHANNEL_ID` when no channel is
/// given.
#[allow(clippy::print_stdout)]
pub async fn send(
    config: &SlackConfig,
    channel: Option<String>,
    text: &str,
) -> Result<(), CommandError> {
    let channel = channel
        .map(ChannelId::from)
        .or_else(|| config.channel_id.clone())
        .ok_or(CommandError::NotConfigured("--channel or SLACK_CHANNEL_ID"))?;

    let response = MessageClient::new(transport(config)?)
        .send_message(&channel, text)
        .await?;
    println!("{}", response.ts);
    Ok(())
}
