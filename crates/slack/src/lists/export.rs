//! Parsing of the list CSV export.
//!
//! Slack exports every cell as a string. Each field has exactly one
//! normalization function, and none of them fail: bad values degrade to a
//! default and, for dates, a warning.

use chrono::NaiveDate;
use slack_clients_core::{ListItem, Snapshot};
use tracing::warn;

use crate::error::SlackError;

const NAME_COLUMN: &str = "Name";
const COMPLETED_COLUMN: &str = "Completed";
const ASSIGNEE_COLUMN: &str = "Assignee";
const DUE_DATE_COLUMN: &str = "Due Date";

/// Formats accepted for due dates, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",  // extended calendar date
    "%Y%m%d",    // basic calendar date
    "%Y-%j",     // ordinal date
    "%G-W%V-%u", // week date
    "%GW%V%u",
];

/// `"true"` in any case is completed, anything else (including empty) is not.
#[must_use]
pub fn parse_completed(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Empty assignee cells mean unassigned.
#[must_use]
pub fn parse_assignee(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_owned())
}

/// Parse an ISO 8601 date. Empty cells are `None`; unparsable ones are
/// `None` plus a warning.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }

    let parsed = parse_reduced_precision(raw).or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    });

    if parsed.is_none() {
        warn!(value = %raw, "Invalid date format");
    }
    parsed
}

/// Reduced-precision dates: `YYYY` resolves to January 1st and `YYYY-MM`
/// to the first of the month.
///
/// Checked before the ordinal format, which would otherwise read `2025-03`
/// as the third day of the year.
fn parse_reduced_precision(raw: &str) -> Option<NaiveDate> {
    match raw.len() {
        4 if raw.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1)
        }
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Parse a list export into a snapshot.
///
/// Columns are located by header name, so their order does not matter and
/// extra columns are ignored. Missing optional columns read as empty.
/// Rows the CSV reader cannot decode are skipped with a warning.
///
/// # Errors
///
/// Returns `SlackError::SnapshotUnavailable` if the header row cannot be
/// read or has no `Name` column.
pub fn parse_list_csv(body: &str) -> Result<Snapshot, SlackError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SlackError::SnapshotUnavailable(format!("Unreadable export header: {e}")))?
        .clone();

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let name_idx = column(NAME_COLUMN).ok_or_else(|| {
        SlackError::SnapshotUnavailable("Export has no Name column".to_string())
    })?;
    let completed_idx = column(COMPLETED_COLUMN);
    let assignee_idx = column(ASSIGNEE_COLUMN);
    let due_date_idx = column(DUE_DATE_COLUMN);

    let mut items = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "Skipping unreadable list row");
                continue;
            }
        };
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        items.push(ListItem {
            name: cell(Some(name_idx)).to_owned(),
            completed: parse_completed(cell(completed_idx)),
            assignee: parse_assignee(cell(assignee_idx)),
            due_date: parse_due_date(cell(due_date_idx)),
        });
    }

    Ok(Snapshot::new(items))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing::Level;

    use super::*;
    use crate::testing::LogCapture;

    #[test]
    fn test_parse_completed() {
        assert!(parse_completed("true"));
        assert!(parse_completed("TRUE"));
        assert!(parse_completed("True"));
        assert!(!parse_completed("false"));
        assert!(!parse_completed(""));
        assert!(!parse_completed("yes"));
        assert!(!parse_completed(" true"));
    }

    #[test]
    fn test_parse_assignee() {
        assert_eq!(parse_assignee(""), None);
        assert_eq!(parse_assignee("ana@example.com"), Some("ana@example.com".to_string()));
    }

    #[test]
    fn test_parse_due_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 4);
        assert_eq!(parse_due_date("2025-03-04"), expected);
        assert_eq!(parse_due_date("20250304"), expected);
        assert_eq!(parse_due_date("2025-063"), expected);
        assert_eq!(parse_due_date("2025-W10-2"), expected);
        assert_eq!(parse_due_date("2025-03"), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(parse_due_date("2025"), NaiveDate::from_ymd_opt(2025, 1, 1));
    }

    #[test]
    fn test_parse_due_date_degrades() {
        assert_eq!(parse_due_date("2025-02-30"), None);
        assert_eq!(parse_due_date("20x5"), None);
    }

    #[test]
    fn test_unparsable_due_date_warns_once() {
        let (logs, _guard) = LogCapture::install();

        assert_eq!(parse_due_date(""), None);
        assert!(logs.lines_at(Level::WARN).is_empty());

        assert_eq!(parse_due_date("next tuesday"), None);
        let warnings = logs.lines_at(Level::WARN);
        assert_eq!(warnings.len(), 1, "{}", logs.contents());
        assert!(warnings[0].contains("next tuesday"));
    }

    #[test]
    fn test_parse_list_csv() {
        let body = "Name,Completed,Assignee,Due Date\n\
                    Write report,false,ana@example.com,2025-03-04\n\
                    Book venue,TRUE,,\n\
                    \"Milk, oat\",,,someday\n";
        let snapshot = parse_list_csv(body).unwrap();
        assert_eq!(snapshot.len(), 3);

        let items = snapshot.items();
        assert_eq!(
            items[0],
            ListItem {
                name: "Write report".to_string(),
                completed: false,
                assignee: Some("ana@example.com".to_string()),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 4),
            }
        );
        assert_eq!(items[1], ListItem::new("Book venue").with_completed(true));
        assert_eq!(items[2], ListItem::new("Milk, oat"));
    }

    #[test]
    fn test_parse_list_csv_reordered_and_extra_columns() {
        let body = "\u{feff}Due Date,Priority,Name,Completed\n2025-01-02,High,Ship,true\n";
        let snapshot = parse_list_csv(body).unwrap();
        let item = &snapshot.items()[0];
        assert_eq!(item.name, "Ship");
        assert!(item.completed);
        assert_eq!(item.assignee, None);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn test_parse_list_csv_short_rows() {
        let body = "Name,Completed,Assignee,Due Date\nOnly name\n";
        let snapshot = parse_list_csv(body).unwrap();
        assert_eq!(snapshot.items(), &[ListItem::new("Only name")]);
    }

    #[test]
    fn test_parse_list_csv_header_only() {
        let snapshot = parse_list_csv("Name,Completed,Assignee,Due Date\n").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_parse_list_csv_without_name_column() {
        let result = parse_list_csv("Title,Completed\nx,true\n");
        assert!(matches!(result, Err(SlackError::SnapshotUnavailable(_))));
    }
}
