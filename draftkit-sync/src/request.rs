//! Wire-shaped batch types and the backend contracts.
//!
//! A commit ships the entire draft in one round trip: every record
//! (placeholder and persisted, clean and dirty) plus the deletion lists.
//! The backing store inserts the placeholders, updates the persisted
//! records, deletes what the lists name, and answers with a canonical
//! snapshot plus the placeholder-to-real identity remapping it performed.

use crate::{SyncError, SyncResult};
use async_trait::async_trait;
use draftkit_types::{ChildRecord, DraftRecord, RecordId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Placeholder-to-real identity remapping returned by the backing store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemapTable(BTreeMap<RecordId, RecordId>);

impl RemapTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a placeholder was persisted under a real identifier.
    pub fn insert(&mut self, from: RecordId, to: RecordId) {
        self.0.insert(from, to);
    }

    /// The real identifier a placeholder was persisted under.
    #[must_use]
    pub fn get(&self, from: RecordId) -> Option<RecordId> {
        self.0.get(&from).copied()
    }

    /// Maps an identifier through the table, returning it unchanged when
    /// no entry exists.
    #[must_use]
    pub fn resolve(&self, id: RecordId) -> RecordId {
        self.get(id).unwrap_or(id)
    }

    /// Number of remapped placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was remapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(placeholder, real)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, RecordId)> + '_ {
        self.0.iter().map(|(from, to)| (*from, *to))
    }

    /// Checks table shape: placeholders on the left, persisted
    /// identifiers on the right.
    pub fn check(&self) -> SyncResult<()> {
        for (from, to) in self.iter() {
            if !from.is_draft() || !to.is_persisted() {
                return Err(SyncError::InvalidRemap { from, to });
            }
        }
        Ok(())
    }
}

impl FromIterator<(RecordId, RecordId)> for RemapTable {
    fn from_iter<I: IntoIterator<Item = (RecordId, RecordId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A batch commit for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: DeserializeOwned"))]
pub struct SyncRequest<R> {
    /// Scope of the batch, when the collection hangs off an owning record
    /// (e.g. the listing category whose properties are being edited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RecordId>,
    /// The full current collection.
    pub records: Vec<R>,
    /// Persisted identifiers to delete.
    pub deleted_ids: Vec<RecordId>,
    /// Accumulated per-record field diffs, for backing stores that accept
    /// partial updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patches: Option<BTreeMap<RecordId, Value>>,
}

/// The backing store's answer to a [`SyncRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: DeserializeOwned"))]
pub struct SyncResponse<R> {
    /// Canonical post-write records, real identifiers substituted for
    /// every placeholder.
    pub records: Vec<R>,
    /// Which real identifier each placeholder ended up under.
    #[serde(default)]
    pub remap: RemapTable,
}

/// A batch commit for a parent kind and its nested child kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, C: Serialize",
    deserialize = "P: DeserializeOwned, C: DeserializeOwned"
))]
pub struct TreeSyncRequest<P, C> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RecordId>,
    /// The full parent collection.
    pub records: Vec<P>,
    /// All children of all parents, flattened; each carries its parent
    /// link, placeholder or real.
    pub children: Vec<C>,
    /// Persisted parent identifiers to delete.
    pub deleted_ids: Vec<RecordId>,
    /// Persisted child identifiers to delete, including those swept up by
    /// parent deletions.
    pub deleted_child_ids: Vec<RecordId>,
}

/// The backing store's answer to a [`TreeSyncRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, C: Serialize",
    deserialize = "P: DeserializeOwned, C: DeserializeOwned"
))]
pub struct TreeSyncResponse<P, C> {
    pub records: Vec<P>,
    pub children: Vec<C>,
    #[serde(default)]
    pub remap: RemapTable,
    #[serde(default)]
    pub child_remap: RemapTable,
}

/// The external collaborator that reconciles a single-kind batch.
///
/// Implementations own transport, authentication and the RPC shape; the
/// engine only cares that a commit either yields a canonical snapshot or
/// a structured error, with nothing applied on error.
#[async_trait]
pub trait BatchBackend<R>: Send + Sync
where
    R: DraftRecord + Send + Sync,
{
    async fn commit(&self, request: &SyncRequest<R>) -> SyncResult<SyncResponse<R>>;
}

/// The external collaborator that reconciles a parent/child batch.
#[async_trait]
pub trait TreeBatchBackend<P, C>: Send + Sync
where
    P: DraftRecord + Send + Sync,
    C: ChildRecord + Send + Sync,
{
    async fn commit_tree(
        &self,
        request: &TreeSyncRequest<P, C>,
    ) -> SyncResult<TreeSyncResponse<P, C>>;
}
