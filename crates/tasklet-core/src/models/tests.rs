#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::models::{new_id, CompletionFilter, Subtask, Task, TaskDetailsUpdate};

    fn create_test_task() -> Task {
        let mut task = Task::new("task-1", "Plan trip");
        task.end_date = Some("2025-12-01T09:30:00.000Z".to_string());
        task.subtasks = vec![
            Subtask {
                id: "s1".to_string(),
                text: "Book flight".to_string(),
                done: true,
            },
            Subtask::with_id("s2", "Pack bags"),
        ];
        task
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("abc", "Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert!(task.start_date.is_none());
        assert!(task.end_date.is_none());
        assert!(task.description.is_none());
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn test_new_ids_are_distinct() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_ne!(Subtask::new("x").id, Subtask::new("x").id);
    }

    #[test]
    fn test_due_at_parses_iso_string() {
        let task = create_test_task();
        let expected: Timestamp = "2025-12-01T09:30:00Z".parse().unwrap();
        assert_eq!(task.due_at(), Some(expected));
    }

    #[test]
    fn test_due_at_ignores_garbage() {
        let mut task = Task::new("abc", "Broken");
        task.end_date = Some("next tuesday".to_string());
        assert_eq!(task.due_at(), None);
    }

    #[test]
    fn test_due_day() {
        let task = create_test_task();
        assert_eq!(task.due_day(), Some("2025-12-01"));
        assert_eq!(Task::new("a", "b").due_day(), None);
    }

    #[test]
    fn test_subtask_lookup_and_progress() {
        let task = create_test_task();
        assert_eq!(task.subtask("s2").map(|s| s.text.as_str()), Some("Pack bags"));
        assert!(task.subtask("missing").is_none());
        assert_eq!(task.subtask_progress(), (1, 2));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let task = Task::new("abc", "Buy milk");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["completed"], false);
        assert!(json.get("endDate").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["subtasks"], serde_json::json!([]));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let task = create_test_task();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["endDate"], "2025-12-01T09:30:00.000Z");
        assert_eq!(json["subtasks"][0]["done"], true);
    }

    #[test]
    fn test_missing_subtasks_decode_as_empty() {
        let task: Task =
            serde_json::from_str(r#"{"id":"x","title":"Old","completed":true}"#).unwrap();
        assert!(task.completed);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn test_details_update_helpers() {
        assert!(TaskDetailsUpdate::default().is_empty());
        let update = TaskDetailsUpdate::end_date("2025-12-01T00:00:00.000Z");
        assert!(!update.is_empty());
        assert!(update.start_date.is_none());
        assert!(update.description.is_none());
    }

    #[test]
    fn test_completion_filter() {
        let mut done = Task::new("a", "Done");
        done.completed = true;
        let open = Task::new("b", "Open");

        assert!(CompletionFilter::All.matches(&done));
        assert!(CompletionFilter::All.matches(&open));
        assert!(CompletionFilter::Pending.matches(&open));
        assert!(!CompletionFilter::Pending.matches(&done));
        assert!(CompletionFilter::Completed.matches(&done));
        assert!(!CompletionFilter::Completed.matches(&open));
    }
}
