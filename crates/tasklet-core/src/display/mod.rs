//! Markdown formatting for tasks, calendars and reminders.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers format collections ([`collections`]) and operation
//! outcomes ([`results`]). The CLI renders the markdown with termimad or
//! prints it as plain text.

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{CalendarDays, DayAgenda, Reminders, Tasks};
pub use datetime::{LocalDateTime, StoredDate};
pub use results::{CreateResult, DeleteResult, UpdateResult};
