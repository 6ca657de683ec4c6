//! Data models for tasks and subtasks.
//!
//! These are plain data: the state transitions that mutate them live in
//! [`crate::store`], and their markdown rendering lives in
//! [`crate::display::models`].
//!
//! The serde encoding uses camelCase field names and omits absent optional
//! fields, which is the layout of the persisted blob:
//!
//! ```rust
//! use tasklet_core::models::{Subtask, Task};
//!
//! let mut task = Task::new("t1", "Plan trip");
//! task.subtasks.push(Subtask::with_id("s1", "Book flight"));
//!
//! let json = serde_json::to_string(&task).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"id":"t1","title":"Plan trip","completed":false,"subtasks":[{"id":"s1","text":"Book flight","done":false}]}"#
//! );
//! ```

pub mod details;
pub mod filters;
pub mod subtask;
pub mod task;

#[cfg(test)]
mod tests;

pub use details::TaskDetailsUpdate;
pub use filters::CompletionFilter;
pub use subtask::Subtask;
pub use task::{new_id, Task};
