//! Storage backed by the `kv_store` table.

use std::path::{Path, PathBuf};

use super::KeyValueStorage;
use crate::{db::Database, error::Result};

/// Device-local key-value storage in the app database.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Database::new(&self.db_path)?.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Database::new(&self.db_path)?.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Database::new(&self.db_path)?.remove_item(key).map(|_| ())
    }
}
