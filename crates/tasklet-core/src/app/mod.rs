//! Orchestration of the task store and its side effects.
//!
//! ```text
//! ┌──────────────┐  intent  ┌──────────────┐  watch  ┌──────────────┐
//! │ Presentation │─────────▶│  TaskStore   │────────▶│  Persister   │──▶ storage
//! └──────────────┘          └──────────────┘         └──────────────┘
//!         │                        due date
//!         └──────────────────────────────────────────▶ ReminderScheduler ──▶ notifier
//! ```
//!
//! [`App`] is the context object handed to a front-end. Mutations apply to
//! the store synchronously and return at once; persistence and reminder
//! requests run as background tasks whose failures are logged and
//! swallowed. Call [`App::shutdown`] before exiting to let them land.
//!
//! ```rust,no_run
//! use tasklet_core::AppBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = AppBuilder::new()
//!     .with_database_path(Some("tasks.db"))
//!     .build()
//!     .await?;
//!
//! let id = app.add_task("Buy milk").expect("title is not blank");
//! app.toggle_task(&id);
//!
//! app.shutdown().await;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use jiff::Timestamp;
use log::{debug, warn};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinSet,
};

use crate::{
    calendar::{self, DayMark},
    error::{Result, TaskletError},
    models::{CompletionFilter, Subtask, Task, TaskDetailsUpdate},
    persist::Persister,
    reminder::{ReminderScheduler, ScheduleOutcome, ScheduledNotification, SqliteNotifier},
    store::{TaskState, TaskStore},
};

pub mod builder;


pub use builder::AppBuilder;

/// Formats a due date the way it is stored: RFC 3339 in UTC with
/// millisecond precision, e.g. `2025-12-01T00:00:00.000Z`.
pub fn format_due_date(date: Timestamp) -> String {
    let millis = date.as_millisecond().rem_euclid(1000);
    format!("{}.{millis:03}Z", date.strftime("%Y-%m-%dT%H:%M:%S"))
}

/// The running application: store plus side-effect plumbing.
pub struct App {
    store: TaskStore,
    persister: Persister,
    reminders: ReminderScheduler,
    outbox: Option<SqliteNotifier>,
    pending: JoinSet<()>,
    runtime: Handle,
}

impl App {
    pub(crate) fn new(
        store: TaskStore,
        persister: Persister,
        reminders: ReminderScheduler,
        outbox: Option<SqliteNotifier>,
        runtime: Handle,
    ) -> Self {
        Self {
            store,
            persister,
            reminders,
            outbox,
            pending: JoinSet::new(),
            runtime,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Adds a task; returns its ID, or `None` for a blank title.
    pub fn add_task(&mut self, title: &str) -> Option<String> {
        self.store.add_task(title)
    }

    pub fn toggle_task(&mut self, id: &str) -> bool {
        self.store.toggle_task(id)
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        self.store.delete_task(id)
    }

    pub fn update_task_details(&mut self, id: &str, update: TaskDetailsUpdate) -> bool {
        self.store.update_task_details(id, update)
    }

    pub fn add_subtask(&mut self, task_id: &str, subtask: Subtask) -> bool {
        self.store.add_subtask(task_id, subtask)
    }

    /// Adds a subtask from user-entered text.
    ///
    /// Blank text is ignored. Returns the new subtask's ID if it was added.
    pub fn add_subtask_text(&mut self, task_id: &str, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let subtask = Subtask::new(text);
        let id = subtask.id.clone();
        self.store.add_subtask(task_id, subtask).then_some(id)
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.store.toggle_subtask(task_id, subtask_id)
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.store.delete_subtask(task_id, subtask_id)
    }

    /// Sets a task's due date and, when `remind` is set, requests a reminder
    /// for that instant.
    ///
    /// The reminder request runs in the background. A past date, a refused
    /// permission or any other scheduling failure is logged; the due date
    /// is stored regardless. Earlier reminders for the same task are left in
    /// place. Returns `false` if the task does not exist.
    pub fn set_due_date(&mut self, task_id: &str, due: Timestamp, remind: bool) -> bool {
        let Some(title) = self.store.task(task_id).map(|t| t.title) else {
            return false;
        };

        self.store
            .update_task_details(task_id, TaskDetailsUpdate::end_date(format_due_date(due)));

        if remind {
            self.spawn_reminder(due, title);
        }
        true
    }

    fn spawn_reminder(&mut self, due: Timestamp, title: String) {
        self.reap_reminders();
        let reminders = self.reminders.clone();
        self.pending.spawn_blocking_on(
            move || match reminders.schedule_due_reminder(due, &title) {
                Ok(ScheduleOutcome::Scheduled(id)) => debug!("Reminder {id} scheduled for {due}"),
                Ok(ScheduleOutcome::Rejected) => debug!("Reminder for {due} not scheduled"),
                Err(e) => warn!("Failed to schedule reminder: {e}"),
            },
            &self.runtime,
        );
    }

    /// Drops reminder requests that have already finished.
    fn reap_reminders(&mut self) {
        while let Some(joined) = self.pending.try_join_next() {
            if let Err(e) = joined {
                warn!("Reminder task failed: {e}");
            }
        }
    }

    /// Number of reminder requests still tracked by the app.
    pub fn reminders_in_flight(&self) -> usize {
        self.pending.len()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Owned copy of the current tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.store.tasks()
    }

    /// Tasks passing `filter`, in collection order.
    pub fn tasks_filtered(&self, filter: CompletionFilter) -> Vec<Task> {
        self.store
            .state()
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.store.task(id)
    }

    /// Like [`Self::task`] but reports a missing ID as an error.
    pub fn require_task(&self, id: &str) -> Result<Task> {
        self.task(id)
            .ok_or_else(|| TaskletError::TaskNotFound { id: id.to_string() })
    }

    /// Checks that `subtask_id` exists in `task_id`.
    pub fn require_subtask(&self, task_id: &str, subtask_id: &str) -> Result<Subtask> {
        let task = self.require_task(task_id)?;
        task.subtask(subtask_id)
            .cloned()
            .ok_or_else(|| TaskletError::SubtaskNotFound {
                task_id: task_id.to_string(),
                id: subtask_id.to_string(),
            })
    }

    pub fn snapshot(&self) -> TaskState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.store.subscribe()
    }

    /// Calendar days with tasks due.
    pub fn marked_dates(&self) -> BTreeMap<String, DayMark> {
        calendar::marked_dates(&self.store.state().tasks)
    }

    /// Tasks due on `day` (`YYYY-MM-DD`).
    pub fn tasks_on(&self, day: &str) -> Vec<Task> {
        calendar::tasks_on(&self.store.state().tasks, day)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Reminders still waiting in the database outbox.
    ///
    /// # Errors
    ///
    /// Returns `TaskletError::Configuration` when the app was built with a
    /// custom notifier and has no outbox.
    pub async fn pending_reminders(&self) -> Result<Vec<ScheduledNotification>> {
        let outbox = self.require_outbox()?;
        tokio::task::spawn_blocking(move || outbox.pending())
            .await
            .map_err(TaskletError::join)?
    }

    /// Pops reminders from the outbox that are due at `now`.
    pub async fn take_due_reminders(&self, now: Timestamp) -> Result<Vec<ScheduledNotification>> {
        let outbox = self.require_outbox()?;
        tokio::task::spawn_blocking(move || outbox.take_due(now))
            .await
            .map_err(TaskletError::join)?
    }

    fn require_outbox(&self) -> Result<SqliteNotifier> {
        self.outbox.clone().ok_or_else(|| TaskletError::Configuration {
            message: "No reminder outbox configured".to_string(),
        })
    }

    /// Waits for in-flight reminder requests and the final state write.
    pub async fn shutdown(self) {
        let Self {
            store,
            persister,
            mut pending,
            ..
        } = self;

        drop(store);
        while let Some(joined) = pending.join_next().await {
            if let Err(e) = joined {
                warn!("Reminder task failed: {e}");
            }
        }
        persister.finish().await;
    }
}
