//! Pure state transitions over the task collection.

use super::{Action, TaskState};
use crate::models::{Task, TaskDetailsUpdate};

/// Applies `action` to `state` in place.
///
/// Returns `true` if the state changed. Unknown task or subtask IDs, blank
/// titles and duplicate IDs leave the state untouched and return `false`.
pub fn reduce(state: &mut TaskState, action: Action) -> bool {
    match action {
        Action::AddTask { id, title } => {
            if title.trim().is_empty() || state.task(&id).is_some() {
                return false;
            }
            state.tasks.push(Task::new(id, title));
            true
        }
        Action::ToggleTask { id } => match state.task_mut(&id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        },
        Action::DeleteTask { id } => {
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            state.tasks.len() != before
        }
        Action::UpdateTaskDetails { id, update } => match state.task_mut(&id) {
            Some(task) => apply_details(task, update),
            None => false,
        },
        Action::AddSubtask { task_id, subtask } => {
            let Some(task) = state.task_mut(&task_id) else {
                return false;
            };
            if task.subtask(&subtask.id).is_some() {
                return false;
            }
            task.subtasks.push(subtask);
            true
        }
        Action::ToggleSubtask {
            task_id,
            subtask_id,
        } => {
            let Some(task) = state.task_mut(&task_id) else {
                return false;
            };
            match task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                Some(subtask) => {
                    subtask.done = !subtask.done;
                    true
                }
                None => false,
            }
        }
        Action::DeleteSubtask {
            task_id,
            subtask_id,
        } => {
            let Some(task) = state.task_mut(&task_id) else {
                return false;
            };
            let before = task.subtasks.len();
            task.subtasks.retain(|s| s.id != subtask_id);
            task.subtasks.len() != before
        }
    }
}

fn apply_details(task: &mut Task, update: TaskDetailsUpdate) -> bool {
    let mut changed = false;
    changed |= overwrite(&mut task.start_date, update.start_date);
    changed |= overwrite(&mut task.end_date, update.end_date);
    changed |= overwrite(&mut task.description, update.description);
    changed
}

fn overwrite(field: &mut Option<String>, value: Option<String>) -> bool {
    match value {
        Some(value) if field.as_deref() != Some(value.as_str()) => {
            *field = Some(value);
            true
        }
        _ => false,
    }
}
