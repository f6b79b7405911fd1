//! Persistence collaborator: a synchronous local string key-value store
//!
//! The engine persists one JSON document per subsystem under a dedicated key
//! (`ledger`, `gamification`, `spaced_repetition`, `daily_challenge`).
//! Reads fall back to a typed default on a missing or corrupt document;
//! writes are best-effort and a failure is logged and absorbed. No storage
//! fault ever crosses the engine boundary.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Storage-layer failure. Contained inside the store module; callers of the
/// JSON helpers below never see it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key-value store with silent-failure write semantics.
pub trait KvStore: Send + Sync {
    /// Read the raw document stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`. Best-effort; errors are absorbed.
    fn set(&self, key: &str, value: &str);
}

/// SQLite-backed store with a single `kv` table.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the store at the default location
    /// (`~/.speakdrill/progress.db`).
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(".speakdrill");
        Self::open(&dir.join("progress.db"))
    }

    /// Open or create the store at a specific path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Delete every stored document (full reset).
    pub fn clear(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store lock poisoned");
        conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().expect("store lock poisoned");
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .ok()
    }

    fn set(&self, key: &str, value: &str) {
        let conn = self.conn.lock().expect("store lock poisoned");
        let now = chrono::Utc::now().timestamp_millis();
        if let Err(e) = conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            rusqlite::params![key, value, now],
        ) {
            warn!("store write failed for key '{}': {}", key, e);
        }
    }
}

/// In-memory store for tests and simulations.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().expect("store lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
    }
}

/// Load a JSON document, falling back to the type's default on a missing key
/// or a decode failure.
pub fn load_json<T>(store: &dyn KvStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("corrupt document under key '{}', using default: {}", key, e);
                T::default()
            }
        },
        None => T::default(),
    }
}

/// Serialize and store a JSON document. Best-effort.
pub fn save_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => warn!("failed to encode document for key '{}': {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("test.db")).unwrap();

        assert!(store.get("ledger").is_none());
        store.set("ledger", "{\"sessions\":[]}");
        assert_eq!(store.get("ledger").unwrap(), "{\"sessions\":[]}");

        // Overwrite
        store.set("ledger", "{}");
        assert_eq!(store.get("ledger").unwrap(), "{}");

        store.clear().unwrap();
        assert!(store.get("ledger").is_none());
    }

    #[test]
    fn test_load_json_defaults_on_corruption() {
        let store = MemoryStore::new();
        store.set("doc", "not json at all");
        let value: Vec<u32> = load_json(&store, "doc");
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_json_defaults_on_missing_key() {
        let store = MemoryStore::new();
        let value: Vec<u32> = load_json(&store, "absent");
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, "doc", &vec![1u32, 2, 3]);
        let value: Vec<u32> = load_json(&store, "doc");
        assert_eq!(value, vec![1, 2, 3]);
    }
}
