//! Planning list synchronization.
//!
//! [`plan`] is a pure function from (desired names, snapshot, policy) to the
//! ordered mutations that make the list match. Applying the plan is the
//! client's job.

use std::collections::HashSet;
use std::fmt;

use slack_clients_core::Snapshot;

/// Target membership of a list.
///
/// Duplicate names collapse to their first occurrence; iteration follows
/// the order names were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredState {
    names: Vec<String>,
    index: HashSet<String>,
}

impl DesiredState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains(&name) {
            return false;
        }
        self.index.insert(name.clone());
        self.names.push(name);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DesiredState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut desired = Self::new();
        for name in iter {
            desired.insert(name);
        }
        desired
    }
}

/// Options for [`plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Reopen completed items that are still desired.
    pub uncomplete_on_sync: bool,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            uncomplete_on_sync: true,
        }
    }
}

/// A single list mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListAction {
    Delete(String),
    Uncomplete(String),
    Add(String),
}

impl ListAction {
    /// The item this action targets.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Delete(name) | Self::Uncomplete(name) | Self::Add(name) => name,
        }
    }

    #[must_use]
    pub const fn needs_completion(&self) -> bool {
        matches!(self, Self::Uncomplete(_))
    }
}

impl fmt::Display for ListAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Delete(_) => "delete",
            Self::Uncomplete(_) => "uncomplete",
            Self::Add(_) => "add",
        };
        write!(f, "{verb} {:?}", self.name())
    }
}

/// Compute the mutations that make `snapshot` match `desired`.
///
/// Deletions and un-completions come from the snapshot, one per row and in
/// row order. Additions come from `desired`, in its order, for every name
/// missing from the snapshot. A row whose name repeats is planned once per
/// row.
#[must_use]
pub fn plan(desired: &DesiredState, snapshot: &Snapshot, policy: SyncPolicy) -> Vec<ListAction> {
    let mut actions = Vec::new();

    for item in snapshot {
        if !desired.contains(&item.name) {
            actions.push(ListAction::Delete(item.name.clone()));
        } else if item.completed && policy.uncomplete_on_sync {
            actions.push(ListAction::Uncomplete(item.name.clone()));
        }
    }

    let existing = snapshot.names();
    actions.extend(
        desired
            .names()
            .filter(|name| !existing.contains(name))
            .map(|name| ListAction::Add(name.to_owned())),
    );

    actions
}

/// Delete every row of the snapshot.
#[must_use]
pub fn plan_clear(snapshot: &Snapshot) -> Vec<ListAction> {
    snapshot
        .items()
        .iter()
        .map(|item| ListAction::Delete(item.name.clone()))
        .collect()
}
