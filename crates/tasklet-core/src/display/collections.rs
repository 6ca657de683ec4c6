//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper renders a markdown list and handles the empty case with a
//! one-line notice.

use std::{collections::BTreeMap, fmt};

use super::datetime::{LocalDateTime, StoredDate};
use crate::{calendar::DayMark, models::Task, reminder::ScheduledNotification};

/// Newtype wrapper for displaying a task list.
///
/// ```rust
/// use tasklet_core::{display::Tasks, models::Task};
///
/// let mut task = Task::new("abc", "Buy milk");
/// task.completed = true;
///
/// let output = Tasks(vec![task]).to_string();
/// assert!(output.contains("- ✓ Buy milk (ID: abc)"));
/// ```
pub struct Tasks(pub Vec<Task>);

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }

        for task in &self.0 {
            write!(f, "- {} {} (ID: {})", task.status_icon(), task.title, task.id)?;
            let (done, total) = task.subtask_progress();
            if total > 0 {
                write!(f, " [{done}/{total}]")?;
            }
            if let Some(due) = &task.end_date {
                write!(f, " due {}", StoredDate(due))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Calendar overview: one line per day that has tasks due.
pub struct CalendarDays(pub BTreeMap<String, DayMark>);

impl fmt::Display for CalendarDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No due dates set.");
        }

        writeln!(f, "# Calendar")?;
        writeln!(f)?;
        for (day, mark) in &self.0 {
            let dot = if mark.completed { "●" } else { "○" };
            let noun = if mark.count == 1 { "task" } else { "tasks" };
            writeln!(f, "- {dot} {day}: {} {noun}", mark.count)?;
        }
        Ok(())
    }
}

/// Tasks due on one calendar day.
pub struct DayAgenda<'a> {
    pub day: &'a str,
    pub tasks: Vec<Task>,
}

impl fmt::Display for DayAgenda<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Tasks on {}", self.day)?;
        writeln!(f)?;
        if self.tasks.is_empty() {
            return writeln!(f, "Nothing due.");
        }
        for task in &self.tasks {
            writeln!(f, "- {} {}", task.status_icon(), task.title)?;
        }
        Ok(())
    }
}

/// Scheduled or delivered reminders.
pub struct Reminders(pub Vec<ScheduledNotification>);

impl fmt::Display for Reminders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No reminders.");
        }
        for reminder in &self.0 {
            writeln!(
                f,
                "- {}: **{}** {}",
                LocalDateTime(&reminder.fire_at),
                reminder.title,
                reminder.body
            )?;
        }
        Ok(())
    }
}
