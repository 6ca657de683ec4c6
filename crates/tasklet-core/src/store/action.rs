//! Intents the presentation layer can dispatch to the store.

use crate::models::{Subtask, TaskDetailsUpdate};

/// A single state transition request.
///
/// Actions carry everything the transition needs, including freshly
/// generated IDs, so that [`super::reduce`] stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTask { id: String, title: String },
    ToggleTask { id: String },
    DeleteTask { id: String },
    UpdateTaskDetails { id: String, update: TaskDetailsUpdate },
    AddSubtask { task_id: String, subtask: Subtask },
    ToggleSubtask { task_id: String, subtask_id: String },
    DeleteSubtask { task_id: String, subtask_id: String },
}

impl Action {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddTask { .. } => "add_task",
            Action::ToggleTask { .. } => "toggle_task",
            Action::DeleteTask { .. } => "delete_task",
            Action::UpdateTaskDetails { .. } => "update_task_details",
            Action::AddSubtask { .. } => "add_subtask",
            Action::ToggleSubtask { .. } => "toggle_subtask",
            Action::DeleteSubtask { .. } => "delete_subtask",
        }
    }
}
