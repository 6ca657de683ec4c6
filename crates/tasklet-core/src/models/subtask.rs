//! Subtask model definition.

use serde::{Deserialize, Serialize};

use super::new_id;

/// A checklist item belonging to exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    /// Identifier, unique within the parent task
    pub id: String,

    /// Text of the checklist item
    pub text: String,

    /// Whether the item is checked off
    #[serde(default)]
    pub done: bool,
}

impl Subtask {
    /// Creates an unchecked subtask with a freshly generated ID.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(new_id(), text)
    }

    /// Creates an unchecked subtask with a caller-supplied ID.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
        }
    }
}
