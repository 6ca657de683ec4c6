//! Builder for creating and configuring App instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::{runtime::Handle, task};

use super::App;
use crate::{
    db::Database,
    error::{Result, TaskletError},
    persist::{restore_state, KeyValueStorage, Persister, SqliteStorage},
    reminder::{Notifier, ReminderScheduler, SqliteNotifier},
    store::TaskStore,
};

/// Builder for creating and configuring App instances.
///
/// Storage and notifier default to the SQLite-backed implementations in
/// the app database; either can be swapped for an in-process one.
#[derive(Default)]
pub struct AppBuilder {
    database_path: Option<PathBuf>,
    storage: Option<Arc<dyn KeyValueStorage>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tasklet/tasklet.db` or `~/.local/share/tasklet/tasklet.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `storage` instead of the database for persisted state.
    pub fn with_storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Uses `notifier` instead of the database outbox for reminders.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Opens storage, restores the task collection and starts the persister.
    ///
    /// Must be called from within a tokio runtime; the runtime is kept for
    /// the fire-and-forget side effects of later mutations.
    ///
    /// # Errors
    ///
    /// Returns `TaskletError::FileSystem` if the database directory cannot be
    /// created and `TaskletError::Database` if schema initialization fails.
    /// A corrupt or unreadable persisted state is not an error; the app
    /// starts with an empty collection.
    pub async fn build(self) -> Result<App> {
        let needs_database = self.storage.is_none() || self.notifier.is_none();
        let db_path = if needs_database {
            let path = match self.database_path {
                Some(path) => path,
                None => Self::default_database_path()?,
            };
            Self::prepare_database(&path).await?;
            Some(path)
        } else {
            None
        };

        let outbox = match (&self.notifier, &db_path) {
            (None, Some(path)) => Some(SqliteNotifier::new(path)),
            _ => None,
        };

        let storage: Arc<dyn KeyValueStorage> = match (self.storage, &db_path) {
            (Some(storage), _) => storage,
            (None, Some(path)) => Arc::new(SqliteStorage::new(path)),
            (None, None) => return Err(Self::missing_database("storage")),
        };

        let notifier: Arc<dyn Notifier> = match (self.notifier, &outbox) {
            (Some(notifier), _) => notifier,
            (None, Some(outbox)) => Arc::new(outbox.clone()),
            (None, None) => return Err(Self::missing_database("notifier")),
        };

        let state = restore_state(storage.clone()).await;
        debug!("Starting with {} task(s)", state.tasks.len());

        let store = TaskStore::new(state);
        let persister = Persister::spawn(storage, store.subscribe());

        Ok(App::new(
            store,
            persister,
            ReminderScheduler::new(notifier),
            outbox,
            Handle::current(),
        ))
    }

    async fn prepare_database(db_path: &Path) -> Result<()> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TaskletError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path = db_path.to_path_buf();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path)?;
            Ok::<(), TaskletError>(())
        })
        .await
        .map_err(TaskletError::join)?
    }

    fn missing_database(service: &str) -> TaskletError {
        TaskletError::Configuration {
            message: format!("No database available for the default {service}"),
        }
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tasklet")
            .place_data_file("tasklet.db")
            .map_err(|e| TaskletError::XdgDirectory(e.to_string()))
    }
}
