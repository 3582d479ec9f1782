//! Canvas commands. Require `SLACK_CANVAS_ID`.

use std::path::Path;

use slack_clients::{CanvasClient, SlackConfig};

use super::{CommandError, read_file, transport};

fn client(config: &SlackConfig) -> Result<CanvasClient, CommandError> {
    let canvas_id = config
        .canvas_id
        .clone()
        .ok_or(CommandError::NotConfigured("SLACK_CANVAS_ID"))?;
    Ok(CanvasClient::new(transport(config)?, canvas_id))
}

/// Replace the canvas content with the markdown in `file`.
pub async fn update(config: &SlackConfig, file: &Path) -> Result<(), CommandError> {
    let markdown = read_file(file)?;
    client(config)?.update_canvas(&markdown).await?;
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn info(config: &SlackConfig) -> Result<(), CommandError> {
    let info = client(config)?.canvas_info().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn permalink(config: &SlackConfig) -> Result<(), CommandError> {
    println!("{}", client(config)?.permalink().await?);
    Ok(())
}
