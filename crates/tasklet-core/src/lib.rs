//! Core library for the Tasklet to-do application.
//!
//! Tasklet keeps a personal task list: tasks with subtasks, optional start
//! and due dates, a description, and a completion flag. This crate holds
//! everything below the user interface:
//!
//! - **Task store** ([`store`]): the canonical collection and its pure state
//!   transitions
//! - **Persistence** ([`persist`]): mirrors the store into key-value storage
//!   after every accepted mutation and restores it at launch
//! - **Reminders** ([`reminder`]): one-shot notifications at a task's due
//!   date
//! - **Calendar** ([`calendar`]): tasks grouped by due day
//! - **App** ([`app`]): the context object that wires the three together and
//!   runs side effects in the background
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tasklet_core::{persist::MemoryStorage, reminder::SqliteNotifier, AppBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = AppBuilder::new()
//!     .with_storage(Arc::new(MemoryStorage::new()))
//!     .with_notifier(Arc::new(SqliteNotifier::new("reminders.db")))
//!     .build()
//!     .await?;
//!
//! let id = app.add_task("Buy milk").expect("title is not blank");
//! app.toggle_task(&id);
//! assert!(app.task(&id).unwrap().completed);
//!
//! app.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod calendar;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod persist;
pub mod reminder;
pub mod store;

// Re-export commonly used types
pub use app::{App, AppBuilder};
pub use db::Database;
pub use error::{Result, TaskletError};
pub use models::{CompletionFilter, Subtask, Task, TaskDetailsUpdate};
pub use persist::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use reminder::{NotificationRequest, Notifier, ReminderScheduler, ScheduleOutcome};
pub use store::{Action, TaskState, TaskStore};
