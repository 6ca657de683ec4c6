//! Persistence adapter: mirrors the task store into key-value storage.
//!
//! The whole collection is written as one JSON blob under [`STORAGE_KEY`],
//! wrapped in a [`PersistedState`] envelope:
//!
//! ```json
//! {"key":"root","version":1,"tasks":[{"id":"…","title":"Buy milk","completed":false,"subtasks":[]}]}
//! ```
//!
//! [`Persister`] subscribes to the store and writes the newest snapshot
//! after every accepted transition. Writes run on the blocking pool and
//! never feed back into the store: a failed write is logged and the
//! in-memory state stays authoritative for the rest of the session.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task};

use crate::{
    error::{Result, TaskletError},
    models::Task,
    store::TaskState,
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Fixed key the task collection is stored under.
pub const STORAGE_KEY: &str = "persist:root";

/// Envelope key written into every blob.
pub const ENVELOPE_KEY: &str = "root";

/// Current envelope version.
pub const ENVELOPE_VERSION: u32 = 1;

/// Platform key-value storage.
///
/// Calls are blocking; async callers go through `spawn_blocking`.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Versioned envelope around the serialized collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub key: String,
    pub version: u32,
    pub tasks: Vec<Task>,
}

impl PersistedState {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            key: ENVELOPE_KEY.to_string(),
            version: ENVELOPE_VERSION,
            tasks,
        }
    }
}

/// Encodes the state into its stored form.
pub fn encode_state(state: &TaskState) -> Result<String> {
    Ok(serde_json::to_string(&PersistedState::new(state.tasks.clone()))?)
}

/// Decodes a stored blob, checking the envelope.
pub fn decode_state(blob: &str) -> Result<TaskState> {
    let envelope: PersistedState = serde_json::from_str(blob)?;
    if envelope.key != ENVELOPE_KEY || envelope.version != ENVELOPE_VERSION {
        return Err(TaskletError::Configuration {
            message: format!(
                "Unsupported persisted state '{}' version {}",
                envelope.key, envelope.version
            ),
        });
    }
    Ok(TaskState::new(envelope.tasks))
}

/// Reads the persisted state. A missing entry yields an empty collection.
///
/// # Errors
///
/// Storage read failures and undecodable blobs are returned as errors.
pub fn load_state(storage: &dyn KeyValueStorage) -> Result<TaskState> {
    match storage.get_item(STORAGE_KEY)? {
        Some(blob) => decode_state(&blob),
        None => Ok(TaskState::default()),
    }
}

/// Writes the whole collection under [`STORAGE_KEY`].
pub fn save_state(storage: &dyn KeyValueStorage, state: &TaskState) -> Result<()> {
    let blob = encode_state(state)?;
    storage.set_item(STORAGE_KEY, &blob)
}

/// Rehydrates the store at launch.
///
/// Never fails: unreadable or corrupt state is logged and the session starts
/// empty. The stored blob is left alone until the next accepted mutation.
pub async fn restore_state(storage: Arc<dyn KeyValueStorage>) -> TaskState {
    let loaded = task::spawn_blocking(move || load_state(storage.as_ref()))
        .await
        .map_err(TaskletError::join)
        .and_then(|res| res);

    match loaded {
        Ok(state) => {
            debug!("Restored {} task(s)", state.tasks.len());
            state
        }
        Err(e) => {
            warn!("Failed to restore tasks, starting empty: {e}");
            TaskState::default()
        }
    }
}

/// Background writer that follows the store.
///
/// Uses latest-value semantics: when several transitions land while a write
/// is in flight only the newest snapshot is written next.
pub struct Persister {
    handle: task::JoinHandle<()>,
}

impl Persister {
    /// Spawns the writer on the current tokio runtime.
    pub fn spawn(storage: Arc<dyn KeyValueStorage>, mut updates: watch::Receiver<TaskState>) -> Self {
        let handle = tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                let storage = storage.clone();
                let written = task::spawn_blocking(move || save_state(storage.as_ref(), &snapshot))
                    .await
                    .map_err(TaskletError::join)
                    .and_then(|res| res);

                match written {
                    Ok(()) => debug!("Persisted task state"),
                    Err(e) => warn!("Failed to persist tasks: {e}"),
                }
            }
            debug!("Store closed, persister exiting");
        });

        Self { handle }
    }

    /// Waits for the final snapshot to be written.
    ///
    /// Returns once the store has been dropped and every pending write has
    /// completed.
    pub async fn finish(self) {
        if let Err(e) = self.handle.await {
            warn!("Persister task failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Subtask, TaskDetailsUpdate},
        store::TaskStore,
    };

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(TaskletError::Configuration {
                message: "disk unavailable".to_string(),
            })
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TaskletError::Configuration {
                message: "quota exceeded".to_string(),
            })
        }

        fn remove_item(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn sample_state() -> TaskState {
        let mut plain = Task::new("a", "Buy milk");
        plain.completed = true;

        let mut detailed = Task::new("b", "Plan trip");
        detailed.start_date = Some("2025-11-01T00:00:00.000Z".to_string());
        detailed.end_date = Some("2025-12-01T00:00:00.000Z".to_string());
        detailed.description = Some("Two weeks".to_string());
        detailed.subtasks = vec![
            Subtask {
                id: "s1".to_string(),
                text: "Book flight".to_string(),
                done: true,
            },
            Subtask::with_id("s2", "Pack"),
        ];

        TaskState::new(vec![plain, detailed])
    }

    #[test]
    fn test_round_trip_preserves_collection() {
        let storage = MemoryStorage::new();
        let state = sample_state();

        save_state(&storage, &state).unwrap();
        let restored = load_state(&storage).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let storage = MemoryStorage::new();
        save_state(&storage, &TaskState::default()).unwrap();
        assert_eq!(load_state(&storage).unwrap(), TaskState::default());
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let storage = MemoryStorage::new();
        assert!(load_state(&storage).unwrap().tasks.is_empty());
    }

    #[test]
    fn test_blob_carries_envelope() {
        let blob = encode_state(&sample_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["key"], "root");
        assert_eq!(value["version"], 1);
        assert_eq!(value["tasks"].as_array().unwrap().len(), 2);
        assert!(value["tasks"][0].get("endDate").is_none());
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let blob = r#"{"key":"root","version":99,"tasks":[]}"#;
        let err = decode_state(blob).unwrap_err();
        assert!(matches!(err, TaskletError::Configuration { .. }));
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        let err = load_state(&storage).unwrap_err();
        assert!(matches!(err, TaskletError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_restore_falls_back_to_empty() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(BrokenStorage);
        assert!(restore_state(storage).await.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_persister_writes_latest_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = TaskStore::default();
        let persister = Persister::spawn(storage.clone(), store.subscribe());

        let id = store.add_task("Buy milk").unwrap();
        store.toggle_task(&id);
        store.update_task_details(&id, TaskDetailsUpdate::description("2 litres"));
        let expected = store.snapshot();

        drop(store);
        persister.finish().await;

        assert_eq!(load_state(storage.as_ref()).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_persister_survives_write_failures() {
        let mut store = TaskStore::default();
        let persister = Persister::spawn(Arc::new(BrokenStorage), store.subscribe());

        let id = store.add_task("Still here").unwrap();
        store.toggle_task(&id);

        assert!(store.task(&id).unwrap().completed);
        drop(store);
        persister.finish().await;
    }

    #[tokio::test]
    async fn test_no_write_without_mutation() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TaskStore::default();
        let persister = Persister::spawn(storage.clone(), store.subscribe());

        drop(store);
        persister.finish().await;

        assert!(storage.get_item(STORAGE_KEY).unwrap().is_none());
    }
}
