use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable per-session identifier for a task or backlog entry.
///
/// Minted by `AppState` from a monotonic counter. Never persisted; ids are
/// reassigned on load. All structural mutations address entries by id, so a
/// stale positional snapshot (e.g. a double-submitted delete) can never hit
/// the wrong element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task on today's list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    /// Session-local identity
    #[serde(skip)]
    pub id: EntryId,
    /// Task text (non-empty, trimmed)
    #[serde(rename = "task")]
    pub label: String,
    /// Checked off?
    pub done: bool,
}

impl TaskItem {
    /// Create a new open task (no id yet; `AppState` assigns one)
    pub fn new(label: String) -> Self {
        TaskItem {
            id: EntryId::default(),
            label,
            done: false,
        }
    }
}

impl PartialEq for TaskItem {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.done == other.done
    }
}

impl Eq for TaskItem {}

/// A deferred task with a due date, not yet promoted to today
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacklogItem {
    /// Session-local identity
    #[serde(skip)]
    pub id: EntryId,
    /// Task text (non-empty, trimmed)
    #[serde(rename = "task")]
    pub label: String,
    /// Due date, `YYYY-MM-DD` on the wire
    pub due: NaiveDate,
}

impl BacklogItem {
    pub fn new(label: String, due: NaiveDate) -> Self {
        BacklogItem {
            id: EntryId::default(),
            label,
            due,
        }
    }
}

impl PartialEq for BacklogItem {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.due == other.due
    }
}

impl Eq for BacklogItem {}
