//! Parameter structures for tasklet operations.
//!
//! Front-ends (the CLI today) build these from their own argument types and
//! pass them to the [`crate::App`]. They carry no framework derives beyond
//! serde, so a different interface can reuse them unchanged:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │      App        │
//! │  (clap derives) │───▶│ (validation)    │───▶│  (transitions)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::{civil, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TaskletError},
    models::TaskDetailsUpdate,
};

/// Parameters for operations requiring just a task ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
}

/// Parameters for addressing one subtask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtaskRef {
    pub task_id: String,
    pub subtask_id: String,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddTask {
    pub title: String,
}

impl AddTask {
    /// Rejects blank titles before they reach the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TaskletError::invalid_input("title").with_reason("must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for adding a subtask from text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSubtask {
    pub task_id: String,
    pub text: String,
}

impl AddSubtask {
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(TaskletError::invalid_input("text").with_reason("must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for a partial details update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDetails {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateDetails {
    /// Splits off the task ID and the fields to write.
    ///
    /// # Errors
    ///
    /// Returns `TaskletError::InvalidInput` when no field is set.
    pub fn into_update(self) -> Result<(String, TaskDetailsUpdate)> {
        let update = TaskDetailsUpdate {
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
        };
        if update.is_empty() {
            return Err(TaskletError::invalid_input("details")
                .with_reason("provide at least one of start date, end date or description"));
        }
        Ok((self.id, update))
    }
}

/// Parameters for setting a due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetDueDate {
    pub id: String,
    /// RFC 3339 instant, local `YYYY-MM-DDTHH:MM[:SS]`, or local `YYYY-MM-DD`
    pub date: String,
    /// Whether to request a reminder at the due instant
    #[serde(default = "default_remind")]
    pub remind: bool,
}

fn default_remind() -> bool {
    true
}

impl SetDueDate {
    /// Parses the date into an absolute instant.
    ///
    /// Dates without an offset are read in the system timezone; a bare date
    /// means the start of that day.
    ///
    /// # Errors
    ///
    /// Returns `TaskletError::InvalidInput` if the string is none of the
    /// accepted forms.
    ///
    /// ```rust
    /// use tasklet_core::params::SetDueDate;
    ///
    /// let params = SetDueDate {
    ///     id: "abc".to_string(),
    ///     date: "2025-12-01T00:00:00Z".to_string(),
    ///     remind: true,
    /// };
    /// assert_eq!(params.due_at()?.as_second(), 1_764_547_200);
    /// # Ok::<(), tasklet_core::TaskletError>(())
    /// ```
    pub fn due_at(&self) -> Result<Timestamp> {
        parse_due_date(&self.date)
    }
}

/// Parses user-entered due dates. See [`SetDueDate::due_at`].
pub fn parse_due_date(input: &str) -> Result<Timestamp> {
    let input = input.trim();
    if let Ok(ts) = input.parse::<Timestamp>() {
        return Ok(ts);
    }

    let local = if let Ok(datetime) = input.parse::<civil::DateTime>() {
        datetime.to_zoned(TimeZone::system())
    } else if let Ok(date) = input.parse::<civil::Date>() {
        date.to_zoned(TimeZone::system())
    } else {
        return Err(TaskletError::invalid_input("date").with_reason(format!(
            "'{input}' is not a date (expected YYYY-MM-DD or an RFC 3339 timestamp)"
        )));
    };

    local
        .map(|zoned| zoned.timestamp())
        .map_err(|e| TaskletError::invalid_input("date").with_reason(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_task_validation() {
        assert!(AddTask {
            title: "Buy milk".to_string()
        }
        .validate()
        .is_ok());

        let err = AddTask {
            title: "  ".to_string(),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, TaskletError::InvalidInput { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_add_subtask_validation() {
        let params = AddSubtask {
            task_id: "t".to_string(),
            text: String::new(),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_details_requires_a_field() {
        let params = UpdateDetails {
            id: "t".to_string(),
            ..UpdateDetails::default()
        };
        assert!(params.into_update().is_err());

        let params = UpdateDetails {
            id: "t".to_string(),
            description: Some("x".to_string()),
            ..UpdateDetails::default()
        };
        let (id, update) = params.into_update().unwrap();
        assert_eq!(id, "t");
        assert_eq!(update, TaskDetailsUpdate::description("x"));
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_due_date("2025-12-01T00:00:00.000Z").unwrap();
        assert_eq!(ts.as_second(), 1_764_547_200);
    }

    #[test]
    fn test_parse_local_forms() {
        let day = parse_due_date("2025-12-01").unwrap();
        let morning = parse_due_date("2025-12-01T09:00").unwrap();
        assert_eq!(morning.as_second() - day.as_second(), 9 * 3600);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_due_date("tomorrow-ish").unwrap_err();
        assert!(matches!(err, TaskletError::InvalidInput { .. }));
    }

    #[test]
    fn test_set_due_date_defaults_to_reminding() {
        let params: SetDueDate =
            serde_json::from_str(r#"{"id":"t","date":"2025-12-01"}"#).unwrap();
        assert!(params.remind);
    }
}
