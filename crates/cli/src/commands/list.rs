//! List commands.
//!
//! # Environment Variables
//!
//! - `SLACK_LIST_ID` - List file ID
//! - `SLACK_WEBHOOK_ADD`, `SLACK_WEBHOOK_DELETE` - Workflow trigger URLs
//! - `SLACK_WEBHOOK_COMPLETE` - Needed by `complete`, and by `sync` when a
//!   completed item has to be reopened

use std::fmt::Write as _;
use std::path::Path;

use slack_clients::{ItemOutcome, SlackConfig, SlackListClient, SyncReport};
use slack_clients_core::ListItem;
use tracing::error;

use super::{CommandError, read_file, transport};

fn client(config: &SlackConfig) -> Result<SlackListClient, CommandError> {
    let list = config
        .list()
        .ok_or(CommandError::NotConfigured("SLACK_LIST_ID and SLACK_WEBHOOK_*"))?;
    Ok(SlackListClient::new(&transport(config)?, list)?)
}

/// Print every item, one per line, or the snapshot as JSON.
#[allow(clippy::print_stdout)]
pub async fn items(config: &SlackConfig, json: bool) -> Result<(), CommandError> {
    let snapshot = client(config)?.get_list_items().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for item in &snapshot {
        println!("{}", format_item(item));
    }
    Ok(())
}

pub async fn add(config: &SlackConfig, name: &str) -> Result<(), CommandError> {
    finish(client(config)?.add_item(name).await?)
}

pub async fn delete(config: &SlackConfig, name: &str) -> Result<(), CommandError> {
    finish(client(config)?.delete_item(name).await?)
}

pub async fn complete(config: &SlackConfig, name: &str, complete: bool) -> Result<(), CommandError> {
    finish(client(config)?.complete_item(name, complete).await?)
}

/// Synchronize the list to the names given on the command line and in
/// `file`, command line first.
pub async fn sync(
    config: &SlackConfig,
    mut names: Vec<String>,
    file: Option<&Path>,
    uncomplete: bool,
) -> Result<(), CommandError> {
    if let Some(path) = file {
        names.extend(parse_names(&read_file(path)?));
    }
    if names.is_empty() {
        return Err(CommandError::NoNames);
    }

    let report = client(config)?.update_list(names, uncomplete).await?;
    check(&report)
}

pub async fn clear(config: &SlackConfig) -> Result<(), CommandError> {
    let report = client(config)?.clear_list().await?;
    check(&report)
}

/// One name per line; blank lines and `#` comments are ignored.
fn parse_names(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
}

fn format_item(item: &ListItem) -> String {
    let mut line = format!(
        "[{}] {}",
        if item.completed { "x" } else { " " },
        item.name
    );
    if let Some(assignee) = &item.assignee {
        let _ = write!(line, " @{assignee}");
    }
    if let Some(due) = item.due_date {
        let _ = write!(line, " (due {due})");
    }
    line
}

fn finish(outcome: ItemOutcome) -> Result<(), CommandError> {
    match outcome {
        ItemOutcome::Applied | ItemOutcome::Skipped => Ok(()),
        ItemOutcome::Failed(e) => Err(e.into()),
    }
}

fn check(report: &SyncReport) -> Result<(), CommandError> {
    if report.is_complete() {
        return Ok(());
    }
    for action in &report.failed {
        error!(%action, "List change failed");
    }
    Err(CommandError::Partial(report.failed.len()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slack_clients::lists::ListAction;

    use super::*;

    #[test]
    fn test_parse_names() {
        let names: Vec<String> = parse_names("Milk\n\n  Eggs  \n# pantry\nBread\n").collect();
        assert_eq!(names, vec!["Milk", "Eggs", "Bread"]);
    }

    #[tokio::test]
    async fn test_sync_rejects_empty_name_file() {
        let path = std::env::temp_dir().join(format!("slack-lists-empty-{}.txt", std::process::id()));
        std::fs::write(&path, "# nothing yet\n\n").unwrap();
        let config = SlackConfig::from_lookup(|key| {
            (key == "SLACK_BOT_TOKEN").then(|| "xoxb-test".to_string())
        })
        .unwrap();

        let result = sync(&config, Vec::new(), Some(path.as_path()), true).await;
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(CommandError::NoNames)));
    }

    #[test]
    fn test_check_reports_failed_actions() {
        let report = SyncReport {
            planned: 2,
            applied: 1,
            failed: vec![ListAction::Delete("Milk".to_string())],
        };
        assert!(matches!(check(&report), Err(CommandError::Partial(1))));
    }

    #[test]
    fn test_format_item() {
        let mut item = ListItem::new("Milk").with_completed(true);
        assert_eq!(format_item(&item), "[x] Milk");

        item.completed = false;
        item.assignee = Some("ana@example.com".to_string());
        assert_eq!(format_item(&item), "[ ] Milk @ana@example.com");
    }
}
