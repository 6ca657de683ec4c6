//! Key-value storage queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_ITEM_SQL: &str = "SELECT value FROM kv_store WHERE key = ?1";
const UPSERT_ITEM_SQL: &str = "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_ITEM_SQL: &str = "DELETE FROM kv_store WHERE key = ?1";

impl super::Database {
    /// Reads the value stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_ITEM_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read storage item")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let now_str = Timestamp::now().to_string();
        self.connection
            .execute(UPSERT_ITEM_SQL, params![key, value, now_str])
            .db_context("Failed to write storage item")?;
        Ok(())
    }

    /// Removes `key`. Returns true if an entry existed.
    pub fn remove_item(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_ITEM_SQL, params![key])
            .db_context("Failed to remove storage item")?;
        Ok(removed > 0)
    }
}
