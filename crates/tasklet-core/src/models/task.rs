//! Task model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Subtask;

/// Generates a fresh opaque identifier for a task or subtask.
///
/// Identifiers are random (UUID v4), so they are never reused after a
/// deletion.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A user-visible to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Title as entered by the user
    pub title: String,

    /// Whether the task has been marked complete
    #[serde(default)]
    pub completed: bool,

    /// Optional ISO-8601 start date-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Optional ISO-8601 end date-time, used as the due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered checklist items
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Creates an open task with the given identity and title and no
    /// subtasks, dates or description.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            start_date: None,
            end_date: None,
            description: None,
            subtasks: Vec::new(),
        }
    }

    /// Parses the due date into an absolute timestamp.
    ///
    /// Returns `None` when no due date is set or the stored string is not a
    /// valid RFC 3339 instant.
    pub fn due_at(&self) -> Option<Timestamp> {
        self.end_date.as_deref()?.parse().ok()
    }

    /// Calendar day (`YYYY-MM-DD`) of the due date, taken verbatim from the
    /// stored string.
    pub fn due_day(&self) -> Option<&str> {
        self.end_date
            .as_deref()
            .map(|date| date.split('T').next().unwrap_or(date))
    }

    /// Looks up a subtask by ID.
    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }

    /// Returns `(done, total)` subtask counts.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.done).count();
        (done, self.subtasks.len())
    }
}
