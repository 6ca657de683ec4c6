//! The task store: canonical in-memory task collection.
//!
//! ```text
//! ┌───────────────┐  Action   ┌───────────────┐  watch   ┌───────────────┐
//! │ Presentation  │──────────▶│   TaskStore   │─────────▶│  Subscribers  │
//! │   (CLI, UI)   │           │ (pure reduce) │          │ (Persister..) │
//! └───────────────┘           └───────────────┘          └───────────────┘
//! ```
//!
//! Every mutation goes through [`TaskStore::dispatch`], which runs the pure
//! [`reduce`] function under the channel's write lock and wakes subscribers
//! only when the state actually changed. The store never performs I/O;
//! persistence and reminders are driven from [`crate::app`].
//!
//! Mutations take `&mut self`, so one transition completes before the next
//! begins and later transitions always observe earlier ones.
//!
//! ```rust
//! use tasklet_core::{models::Subtask, TaskStore};
//!
//! let mut store = TaskStore::default();
//! let id = store.add_task("Plan trip").unwrap();
//!
//! store.add_subtask(&id, Subtask::with_id("s1", "Book flight"));
//! store.toggle_subtask(&id, "s1");
//! assert!(store.task(&id).unwrap().subtasks[0].done);
//!
//! store.delete_subtask(&id, "s1");
//! assert!(store.task(&id).unwrap().subtasks.is_empty());
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::{new_id, Subtask, Task, TaskDetailsUpdate};

pub mod action;
pub mod reducer;


pub use action::Action;
pub use reducer::reduce;

/// The whole task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    pub tasks: Vec<Task>,
}

impl TaskState {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Finds a task by ID (linear scan).
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// Single owned state container with snapshot, dispatch and subscribe.
pub struct TaskStore {
    state: watch::Sender<TaskState>,
}

impl TaskStore {
    /// Creates a store seeded with `initial`.
    pub fn new(initial: TaskState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Applies a transition. Returns `true` if the collection changed.
    ///
    /// Unknown IDs are silently ignored; the return value exists so that
    /// callers can skip side effects for no-ops, not to report errors.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let name = action.name();
        let changed = self.state.send_if_modified(|state| reduce(state, action));
        debug!("{name}: changed={changed}");
        changed
    }

    /// Appends a new open task and returns its freshly generated ID.
    ///
    /// Blank titles are rejected and return `None`.
    pub fn add_task(&mut self, title: impl Into<String>) -> Option<String> {
        let id = new_id();
        let added = self.dispatch(Action::AddTask {
            id: id.clone(),
            title: title.into(),
        });
        added.then_some(id)
    }

    pub fn toggle_task(&mut self, id: &str) -> bool {
        self.dispatch(Action::ToggleTask { id: id.to_string() })
    }

    /// Removes a task together with all of its subtasks.
    pub fn delete_task(&mut self, id: &str) -> bool {
        self.dispatch(Action::DeleteTask { id: id.to_string() })
    }

    /// Overwrites the fields set in `update`, leaving the rest untouched.
    pub fn update_task_details(&mut self, id: &str, update: TaskDetailsUpdate) -> bool {
        self.dispatch(Action::UpdateTaskDetails {
            id: id.to_string(),
            update,
        })
    }

    /// Appends a caller-built subtask to a task.
    pub fn add_subtask(&mut self, task_id: &str, subtask: Subtask) -> bool {
        self.dispatch(Action::AddSubtask {
            task_id: task_id.to_string(),
            subtask,
        })
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.dispatch(Action::ToggleSubtask {
            task_id: task_id.to_string(),
            subtask_id: subtask_id.to_string(),
        })
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.dispatch(Action::DeleteSubtask {
            task_id: task_id.to_string(),
            subtask_id: subtask_id.to_string(),
        })
    }

    /// Read access to the current collection.
    ///
    /// The guard holds the channel's read lock; drop it before dispatching.
    pub fn state(&self) -> watch::Ref<'_, TaskState> {
        self.state.borrow()
    }

    /// Owned copy of the current tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    /// Owned copy of a single task, if present.
    pub fn task(&self, id: &str) -> Option<Task> {
        self.state.borrow().task(id).cloned()
    }

    /// Owned copy of the whole state.
    pub fn snapshot(&self) -> TaskState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every accepted transition.
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(TaskState::default())
    }
}
