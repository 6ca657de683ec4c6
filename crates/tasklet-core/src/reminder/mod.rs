//! Reminder scheduling through a host notification service.
//!
//! A reminder is a one-shot local notification that fires at an absolute
//! instant. [`ReminderScheduler`] validates the instant and hands a
//! [`NotificationRequest`] to a [`Notifier`]; requests for instants at or
//! before "now" are rejected without touching the notifier.
//!
//! The request encodes as the notification service expects:
//!
//! ```rust
//! use jiff::Timestamp;
//! use tasklet_core::reminder::NotificationRequest;
//!
//! let at = Timestamp::from_millisecond(1_764_547_200_000).unwrap();
//! let request = NotificationRequest::at(at, "Reminder", "Your task is due soon!");
//!
//! let json = serde_json::to_string(&request).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"content":{"title":"Reminder","body":"Your task is due soon!"},"trigger":{"type":"date","date":1764547200000}}"#
//! );
//! ```
//!
//! Previously scheduled reminders are never cancelled or deduplicated when a
//! due date changes again.

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskletError};

pub mod sqlite;

pub use sqlite::SqliteNotifier;

/// Body used for every due-date reminder.
pub const DUE_REMINDER_BODY: &str = "Your task is due soon!";

/// Visible text of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    /// Content of the reminder fired when a task falls due.
    pub fn due_reminder(task_title: &str) -> Self {
        Self {
            title: format!("Reminder for \"{task_title}\""),
            body: DUE_REMINDER_BODY.to_string(),
        }
    }
}

/// When a notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotificationTrigger {
    /// Absolute instant in Unix epoch milliseconds
    Date { date: i64 },
}

/// One-shot request handed to the notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub content: NotificationContent,
    pub trigger: NotificationTrigger,
}

impl NotificationRequest {
    /// Request that fires exactly at `date`.
    pub fn at(date: Timestamp, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content: NotificationContent {
                title: title.into(),
                body: body.into(),
            },
            trigger: NotificationTrigger::Date {
                date: date.as_millisecond(),
            },
        }
    }

    /// The instant this request fires at.
    pub fn fire_at(&self) -> Result<Timestamp> {
        let NotificationTrigger::Date { date } = self.trigger;
        Timestamp::from_millisecond(date).map_err(|e| {
            TaskletError::invalid_input("trigger.date").with_reason(e.to_string())
        })
    }
}

/// Host notification service.
///
/// Calls are blocking; [`crate::app::App`] runs them on the blocking pool.
pub trait Notifier: Send + Sync {
    /// Schedules a one-shot notification and returns its identifier.
    fn schedule(&self, request: &NotificationRequest) -> Result<String>;
}

/// Result of asking for a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The notifier accepted the request under this identifier
    Scheduled(String),
    /// The instant was not in the future; nothing was requested
    Rejected,
}

type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Turns due dates into notification requests.
#[derive(Clone)]
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    clock: Clock,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            clock: Arc::new(Timestamp::now),
        }
    }

    /// Replaces the wall clock used for the past-date check.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> Timestamp + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Requests a notification at `date`.
    ///
    /// Dates at or before the current time are rejected and logged; the
    /// notifier is not called. Otherwise exactly one request is issued.
    ///
    /// # Errors
    ///
    /// Returns whatever the notifier reports when it fails to schedule.
    pub fn schedule_notification(
        &self,
        date: Timestamp,
        title: &str,
        body: &str,
    ) -> Result<ScheduleOutcome> {
        let now = (self.clock)();
        if date <= now {
            warn!("Cannot schedule a notification in the past ({date} <= {now})");
            return Ok(ScheduleOutcome::Rejected);
        }

        let request = NotificationRequest::at(date, title, body);
        let id = self.notifier.schedule(&request)?;
        debug!("Scheduled notification {id} for {date}");
        Ok(ScheduleOutcome::Scheduled(id))
    }

    /// Schedules the standard due-date reminder for a task.
    pub fn schedule_due_reminder(&self, due: Timestamp, task_title: &str) -> Result<ScheduleOutcome> {
        let content = NotificationContent::due_reminder(task_title);
        self.schedule_notification(due, &content.title, &content.body)
    }
}

impl fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReminderScheduler").finish_non_exhaustive()
    }
}

/// A reminder recorded by a notifier, as listed back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub fire_at: Timestamp,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        requests: Mutex<Vec<NotificationRequest>>,
    }

    impl Notifier for RecordingNotifier {
        fn schedule(&self, request: &NotificationRequest) -> Result<String> {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            Ok(format!("n{}", requests.len()))
        }
    }

    struct RefusingNotifier;

    impl Notifier for RefusingNotifier {
        fn schedule(&self, _request: &NotificationRequest) -> Result<String> {
            Err(TaskletError::Notification {
                message: "permission denied".to_string(),
            })
        }
    }

    fn fixed_now() -> Timestamp {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn scheduler(notifier: Arc<dyn Notifier>) -> ReminderScheduler {
        ReminderScheduler::new(notifier).with_clock(fixed_now)
    }

    #[test]
    fn test_past_date_never_reaches_notifier() {
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = scheduler(notifier.clone());

        let past: Timestamp = "2025-05-31T12:00:00Z".parse().unwrap();
        let outcome = scheduler.schedule_notification(past, "t", "b").unwrap();

        assert_eq!(outcome, ScheduleOutcome::Rejected);
        assert!(notifier.requests.lock().is_empty());
    }

    #[test]
    fn test_current_instant_is_rejected() {
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = scheduler(notifier.clone());

        let outcome = scheduler
            .schedule_notification(fixed_now(), "t", "b")
            .unwrap();

        assert_eq!(outcome, ScheduleOutcome::Rejected);
        assert!(notifier.requests.lock().is_empty());
    }

    #[test]
    fn test_future_date_issues_one_absolute_request() {
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = scheduler(notifier.clone());

        let due: Timestamp = "2025-12-01T00:00:00Z".parse().unwrap();
        let outcome = scheduler.schedule_due_reminder(due, "Buy milk").unwrap();

        assert_eq!(outcome, ScheduleOutcome::Scheduled("n1".to_string()));
        let requests = notifier.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].content.title, "Reminder for \"Buy milk\"");
        assert_eq!(requests[0].content.body, DUE_REMINDER_BODY);
        assert_eq!(
            requests[0].trigger,
            NotificationTrigger::Date {
                date: due.as_millisecond()
            }
        );
        assert_eq!(requests[0].fire_at().unwrap(), due);
    }

    #[test]
    fn test_rescheduling_does_not_deduplicate() {
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = scheduler(notifier.clone());

        let first: Timestamp = "2025-07-01T00:00:00Z".parse().unwrap();
        let second: Timestamp = "2025-08-01T00:00:00Z".parse().unwrap();
        scheduler.schedule_due_reminder(first, "Trip").unwrap();
        scheduler.schedule_due_reminder(second, "Trip").unwrap();

        assert_eq!(notifier.requests.lock().len(), 2);
    }

    #[test]
    fn test_notifier_failure_is_returned() {
        let scheduler = scheduler(Arc::new(RefusingNotifier));
        let due: Timestamp = "2025-12-01T00:00:00Z".parse().unwrap();

        let err = scheduler.schedule_notification(due, "t", "b").unwrap_err();
        assert!(matches!(err, TaskletError::Notification { .. }));
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let due: Timestamp = "2025-12-01T00:00:00Z".parse().unwrap();
        let request = NotificationRequest::at(due, "title", "body");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["trigger"]["type"], "date");
        assert_eq!(json["trigger"]["date"], due.as_millisecond());

        let back: NotificationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }
}
