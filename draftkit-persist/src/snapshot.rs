//! The durable snapshot slot contract.

use crate::PersistResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// A key-value slot per store instance, holding one serialized draft.
///
/// Read once at hydration, written on every committed mutation, cleared
/// when the draft stops existing (successful commit or reset).
pub trait SnapshotStore: Send + Sync {
    /// Loads the snapshot for a store, if one was ever written.
    fn load(&self, store_id: &str) -> PersistResult<Option<Vec<u8>>>;

    /// Writes (or replaces) the snapshot for a store.
    fn save(&self, store_id: &str, payload: &[u8]) -> PersistResult<()>;

    /// Removes the snapshot for a store. Removing an absent slot is fine.
    fn clear(&self, store_id: &str) -> PersistResult<()>;
}

/// In-memory snapshot store (for testing).
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a slot exists for the store.
    #[must_use]
    pub fn contains(&self, store_id: &str) -> bool {
        self.slots.lock().unwrap().contains_key(store_id)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, store_id: &str) -> PersistResult<Option<Vec<u8>>> {
        Ok(self.slots.lock().unwrap().get(store_id).cloned())
    }

    fn save(&self, store_id: &str, payload: &[u8]) -> PersistResult<()> {
        self.slots
            .lock()
            .unwrap()
            .insert(store_id.to_string(), payload.to_vec());
        Ok(())
    }

    fn clear(&self, store_id: &str) -> PersistResult<()> {
        self.slots.lock().unwrap().remove(store_id);
        Ok(())
    }
}
