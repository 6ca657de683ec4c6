//! Display implementations for domain models.
//!
//! Output is markdown: the detail view of a task uses headers and a
//! checklist, list rows are rendered by [`super::collections`].

use std::fmt;

use super::datetime::StoredDate;
use crate::models::{Subtask, Task};

impl Task {
    /// Completion icon used in lists and headers.
    pub fn status_icon(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", self.status_icon(), self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(
            f,
            "- Status: {}",
            if self.completed { "Done" } else { "Open" }
        )?;
        if let Some(start) = &self.start_date {
            writeln!(f, "- Start: {}", StoredDate(start))?;
        }
        match &self.end_date {
            Some(due) => writeln!(f, "- Due: {}", StoredDate(due))?,
            None => writeln!(f, "- Due: not set")?,
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.subtasks.is_empty() {
            writeln!(f, "\nNo subtasks.")?;
        } else {
            let (done, total) = self.subtask_progress();
            writeln!(f, "\n## Subtasks ({done}/{total})")?;
            writeln!(f)?;
            for subtask in &self.subtasks {
                write!(f, "{subtask}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "x" } else { " " };
        writeln!(f, "- [{mark}] {} (ID: {})", self.text, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let mut task = Task::new("t1", "Plan trip");
        task.description = Some("Two weeks in Lisbon".to_string());
        task.end_date = Some("not a date".to_string());
        task.subtasks = vec![
            Subtask {
                id: "s1".to_string(),
                text: "Book flight".to_string(),
                done: true,
            },
            Subtask::with_id("s2", "Pack"),
        ];
        task
    }

    #[test]
    fn test_task_detail_view() {
        let output = sample_task().to_string();

        assert!(output.contains("# ○ Plan trip"));
        assert!(output.contains("- ID: t1"));
        assert!(output.contains("- Status: Open"));
        assert!(output.contains("- Due: not a date"));
        assert!(output.contains("Two weeks in Lisbon"));
        assert!(output.contains("## Subtasks (1/2)"));
        assert!(output.contains("- [x] Book flight (ID: s1)"));
        assert!(output.contains("- [ ] Pack (ID: s2)"));
    }

    #[test]
    fn test_task_without_extras() {
        let mut task = Task::new("t2", "Buy milk");
        task.completed = true;
        let output = task.to_string();

        assert!(output.contains("# ✓ Buy milk"));
        assert!(output.contains("- Status: Done"));
        assert!(output.contains("- Due: not set"));
        assert!(output.contains("No subtasks."));
        assert!(!output.contains("- Start:"));
    }
}
