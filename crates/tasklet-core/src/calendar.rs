//! Calendar placement of tasks by due date.
//!
//! Days are the `YYYY-MM-DD` prefix of a task's `end_date` string, taken as
//! stored (no timezone conversion).

use std::collections::BTreeMap;

use crate::models::Task;

/// Marker for a calendar day that has at least one task due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMark {
    /// Completion flag of the last task placed on this day
    pub completed: bool,
    /// Number of tasks due on this day
    pub count: usize,
}

/// Days that carry a due task, in calendar order.
pub fn marked_dates(tasks: &[Task]) -> BTreeMap<String, DayMark> {
    let mut marks: BTreeMap<String, DayMark> = BTreeMap::new();
    for task in tasks {
        let Some(day) = task.due_day() else {
            continue;
        };
        let mark = marks.entry(day.to_string()).or_insert(DayMark {
            completed: task.completed,
            count: 0,
        });
        mark.completed = task.completed;
        mark.count += 1;
    }
    marks
}

/// Tasks whose due date falls on `day`, in collection order.
pub fn tasks_on<'a>(tasks: &'a [Task], day: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| {
            task.end_date
                .as_deref()
                .is_some_and(|date| date.starts_with(day))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(id: &str, end_date: Option<&str>, completed: bool) -> Task {
        let mut task = Task::new(id, format!("Task {id}"));
        task.end_date = end_date.map(String::from);
        task.completed = completed;
        task
    }

    #[test]
    fn test_marked_dates_groups_by_day() {
        let tasks = vec![
            due("a", Some("2025-12-01T00:00:00.000Z"), false),
            due("b", None, false),
            due("c", Some("2025-11-15T08:00:00.000Z"), true),
            due("d", Some("2025-12-01T18:30:00.000Z"), true),
        ];

        let marks = marked_dates(&tasks);
        let days: Vec<&String> = marks.keys().collect();
        assert_eq!(days, vec!["2025-11-15", "2025-12-01"]);

        assert_eq!(
            marks["2025-12-01"],
            DayMark {
                completed: true,
                count: 2
            }
        );
        assert!(marks["2025-11-15"].completed);
    }

    #[test]
    fn test_last_task_on_a_day_sets_completion() {
        let tasks = vec![
            due("a", Some("2025-12-01T00:00:00.000Z"), true),
            due("b", Some("2025-12-01T10:00:00.000Z"), false),
        ];
        assert!(!marked_dates(&tasks)["2025-12-01"].completed);
    }

    #[test]
    fn test_tasks_on_day() {
        let tasks = vec![
            due("a", Some("2025-12-01T00:00:00.000Z"), false),
            due("b", Some("2025-12-02T00:00:00.000Z"), false),
            due("c", Some("2025-12-01T23:59:00.000Z"), true),
            due("d", None, false),
        ];

        let ids: Vec<&str> = tasks_on(&tasks, "2025-12-01")
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(tasks_on(&tasks, "2024-01-01").is_empty());
    }

    #[test]
    fn test_empty_collection() {
        assert!(marked_dates(&[]).is_empty());
        assert!(tasks_on(&[], "2025-12-01").is_empty());
    }
}
