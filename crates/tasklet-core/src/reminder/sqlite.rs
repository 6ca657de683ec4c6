//! Notifier backed by the SQLite notification outbox.

use std::path::{Path, PathBuf};

use jiff::Timestamp;

use super::{NotificationRequest, Notifier, ScheduledNotification};
use crate::{db::Database, error::Result};

/// Records reminders in the `scheduled_notifications` table.
///
/// Front-ends without an OS notification service poll [`Self::take_due`] to
/// deliver reminders whose time has come.
#[derive(Debug, Clone)]
pub struct SqliteNotifier {
    db_path: PathBuf,
}

impl SqliteNotifier {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Reminders that have not fired yet, earliest first.
    pub fn pending(&self) -> Result<Vec<ScheduledNotification>> {
        Database::new(&self.db_path)?.pending_notifications()
    }

    /// Pops every reminder due at or before `now`.
    pub fn take_due(&self, now: Timestamp) -> Result<Vec<ScheduledNotification>> {
        Database::new(&self.db_path)?.take_due_notifications(now)
    }
}

impl Notifier for SqliteNotifier {
    fn schedule(&self, request: &NotificationRequest) -> Result<String> {
        Database::new(&self.db_path)?.insert_notification(request)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_test_notifier() -> (TempDir, SqliteNotifier) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let notifier = SqliteNotifier::new(temp_dir.path().join("test.db"));
        (temp_dir, notifier)
    }

    fn at(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_schedule_then_list_pending() {
        let (_temp_dir, notifier) = create_test_notifier();

        let late = NotificationRequest::at(at("2030-02-01T00:00:00Z"), "late", "b");
        let early = NotificationRequest::at(at("2030-01-01T00:00:00Z"), "early", "b");
        let late_id = notifier.schedule(&late).unwrap();
        let early_id = notifier.schedule(&early).unwrap();

        let pending = notifier.pending().unwrap();
        let ids: Vec<&str> = pending.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![early_id.as_str(), late_id.as_str()]);
        assert_eq!(pending[0].title, "early");
        assert_eq!(pending[0].fire_at, at("2030-01-01T00:00:00Z"));
    }

    #[test]
    fn test_take_due_pops_only_due_reminders() {
        let (_temp_dir, notifier) = create_test_notifier();

        notifier
            .schedule(&NotificationRequest::at(at("2030-01-01T00:00:00Z"), "first", "b"))
            .unwrap();
        notifier
            .schedule(&NotificationRequest::at(at("2030-03-01T00:00:00Z"), "second", "b"))
            .unwrap();

        let due = notifier.take_due(at("2030-02-01T00:00:00Z")).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "first");

        // Delivered reminders do not come back
        assert!(notifier.take_due(at("2030-02-01T00:00:00Z")).unwrap().is_empty());

        let pending = notifier.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "second");
    }
}
