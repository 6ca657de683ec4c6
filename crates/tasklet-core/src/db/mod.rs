//! SQLite management for the host services.
//!
//! The database backs two things a phone would otherwise provide: the
//! key-value storage used by [`crate::persist`] and the notification outbox
//! used by [`crate::reminder`]. Connections are short-lived; callers open one
//! per operation on the blocking pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod kv_queries;
pub mod migrations;
pub mod notification_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
