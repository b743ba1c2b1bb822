//! SQLite-backed snapshot slots.
//!
//! One table, one row per store instance. Uses a separate database file so
//! draft snapshots are isolated from application data.

use crate::{PersistResult, SnapshotStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Persistent snapshot store backed by SQLite.
pub struct SqliteSnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// Opens (or creates) a snapshot store at the given path.
    pub fn new(path: &str) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory snapshot store (for testing).
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> PersistResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS draft_snapshots (
                store_id TEXT PRIMARY KEY,
                payload BLOB NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self, store_id: &str) -> PersistResult<Option<Vec<u8>>> {
        let conn = self.conn.lock().unwrap();
        let payload = conn
            .query_row(
                "SELECT payload FROM draft_snapshots WHERE store_id = ?1",
                params![store_id],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        debug!(store_id, found = payload.is_some(), "loaded draft snapshot");
        Ok(payload)
    }

    fn save(&self, store_id: &str, payload: &[u8]) -> PersistResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO draft_snapshots (store_id, payload, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(store_id) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
            params![store_id, payload],
        )?;
        debug!(store_id, bytes = payload.len(), "saved draft snapshot");
        Ok(())
    }

    fn clear(&self, store_id: &str) -> PersistResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM draft_snapshots WHERE store_id = ?1",
            params![store_id],
        )?;
        debug!(store_id, "cleared draft snapshot");
        Ok(())
    }
}
