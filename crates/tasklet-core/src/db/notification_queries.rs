//! Notification outbox queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    reminder::{NotificationRequest, ScheduledNotification},
};

const INSERT_NOTIFICATION_SQL: &str = "INSERT INTO scheduled_notifications \
     (id, title, body, fire_at, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PENDING_SQL: &str = "SELECT id, title, body, fire_at, created_at \
     FROM scheduled_notifications WHERE delivered_at IS NULL ORDER BY fire_at, created_at";
const SELECT_DUE_SQL: &str = "SELECT id, title, body, fire_at, created_at \
     FROM scheduled_notifications WHERE delivered_at IS NULL AND fire_at <= ?1 \
     ORDER BY fire_at, created_at";
const MARK_DELIVERED_SQL: &str =
    "UPDATE scheduled_notifications SET delivered_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to build a ScheduledNotification from a database row
    fn build_notification_from_row(row: &rusqlite::Row) -> rusqlite::Result<ScheduledNotification> {
        let fire_at_ms: i64 = row.get(3)?;
        Ok(ScheduledNotification {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            fire_at: Timestamp::from_millisecond(fire_at_ms).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
            })?,
            created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Records a notification request and returns its generated ID.
    pub fn insert_notification(&mut self, request: &NotificationRequest) -> Result<String> {
        let id = crate::models::new_id();
        let fire_at = request.fire_at()?;
        let now_str = Timestamp::now().to_string();

        self.connection
            .execute(
                INSERT_NOTIFICATION_SQL,
                params![
                    id,
                    request.content.title,
                    request.content.body,
                    fire_at.as_millisecond(),
                    now_str
                ],
            )
            .db_context("Failed to insert notification")?;

        Ok(id)
    }

    /// Lists notifications that have not been delivered yet.
    pub fn pending_notifications(&self) -> Result<Vec<ScheduledNotification>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PENDING_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], Self::build_notification_from_row)
            .db_context("Failed to query pending notifications")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read notification row")
    }

    /// Marks every notification due at or before `now` as delivered and
    /// returns them in firing order.
    pub fn take_due_notifications(&mut self, now: Timestamp) -> Result<Vec<ScheduledNotification>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let due = {
            let mut stmt = tx.prepare(SELECT_DUE_SQL).db_context("Failed to prepare query")?;
            let rows = stmt
                .query_map(params![now.as_millisecond()], Self::build_notification_from_row)
                .db_context("Failed to query due notifications")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read notification row")?
        };

        let now_str = now.to_string();
        for notification in &due {
            tx.execute(MARK_DELIVERED_SQL, params![now_str, notification.id])
                .db_context("Failed to mark notification delivered")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(due)
    }
}
