//! List item and snapshot types.
//!
//! A [`Snapshot`] is the whole remote list as read at one instant. It is
//! materialized fresh on every read and never mutated in place: all changes
//! happen remotely and are observed again through a later read.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a Slack list.
///
/// Items have no identity beyond their `name`. Slack assigns row IDs
/// internally, but the CSV export does not expose them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item name, the key used by every list workflow.
    pub name: String,
    /// Whether the "Completed" checkbox is ticked.
    pub completed: bool,
    /// Assignee email, `None` when unassigned.
    pub assignee: Option<String>,
    /// Due date, `None` when unset or unparsable.
    pub due_date: Option<NaiveDate>,
}

impl ListItem {
    /// Create an open, unassigned item with no due date.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
            assignee: None,
            due_date: None,
        }
    }

    /// Builder-style setter for the completed flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// The full contents of a remote list at the moment it was read.
///
/// Slack offers no version number or `ETag` for lists, so a snapshot can be
/// stale by the time it is acted upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    items: Vec<ListItem>,
}

impl Snapshot {
    /// Wrap the rows of a list read.
    #[must_use]
    pub const fn new(items: Vec<ListItem>) -> Self {
        Self { items }
    }

    /// Rows in export order.
    #[must_use]
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First row with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Whether any row has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Distinct item names.
    #[must_use]
    pub fn names(&self) -> HashSet<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    /// Names that appear on more than one row, in first-seen order.
    ///
    /// Slack does not enforce unique names, but every list workflow selects
    /// rows by name, so duplicates can only be addressed one at a time.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for item in &self.items {
            let name = item.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}

impl From<Vec<ListItem>> for Snapshot {
    fn from(items: Vec<ListItem>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<ListItem> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ListItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Snapshot {
    type Item = ListItem;
    type IntoIter = std::vec::IntoIter<ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
