//! Composition of a parent and a child entity kind behind one commit
//! boundary.
//!
//! The back-office edits dictionaries together with their entries, and
//! properties together with their options; both pairs save in one batch.
//! `ParentChildStore` composes a parent slice with per-parent child slices
//! so the UI reads one store and the sync layer sees one deletion
//! bookkeeping surface.
//!
//! Child collections are indexed first by parent identifier, then by child
//! identifier. Child placeholder identifiers are minted from a store-level
//! allocator rather than per-slice ones: a sync request flattens all
//! children into one list, so their placeholders must be unique across
//! parents for the remap table to be unambiguous.

use crate::DraftSlice;
use draftkit_types::{
    ChildRecord, DraftIdAllocator, DraftRecord, RecordId, Validate, ValidationError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two draft collections — a parent kind and its nested child kind —
/// exposed as one store with a single persistence boundary.
///
/// All parent and child mutations go through this type so that deleting a
/// parent keeps the child bookkeeping consistent; read access to the
/// underlying slices is borrowed immutably.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, C: Serialize",
    deserialize = "P: DeserializeOwned, C: DeserializeOwned"
))]
pub struct ParentChildStore<P: DraftRecord, C: ChildRecord> {
    parents: DraftSlice<P>,
    children: BTreeMap<RecordId, DraftSlice<C>>,
    /// Children as of the last seed or canonical replacement; what
    /// `reset` restores (removed parents take their child slice with
    /// them, so per-slice baselines alone cannot).
    children_baseline: BTreeMap<RecordId, DraftSlice<C>>,
    child_alloc: DraftIdAllocator,
    /// Persisted children deleted implicitly by a parent deletion.
    cascade_deleted: Vec<RecordId>,
    revision: u64,
}

impl<P: DraftRecord, C: ChildRecord> ParentChildStore<P, C> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parents: DraftSlice::new(),
            children: BTreeMap::new(),
            children_baseline: BTreeMap::new(),
            child_alloc: DraftIdAllocator::new(),
            cascade_deleted: Vec::new(),
            revision: 0,
        }
    }

    /// Creates a store seeded from server-fetched parent and child arrays.
    /// Children are grouped under their parent identifier.
    #[must_use]
    pub fn seeded(
        parents: impl IntoIterator<Item = P>,
        children: impl IntoIterator<Item = C>,
    ) -> Self {
        let mut store = Self::new();
        store.ingest(parents, children);
        store
    }

    fn ingest(
        &mut self,
        parents: impl IntoIterator<Item = P>,
        children: impl IntoIterator<Item = C>,
    ) {
        self.parents = DraftSlice::seeded(parents);

        let mut grouped: BTreeMap<RecordId, Vec<C>> = BTreeMap::new();
        for child in children {
            grouped.entry(child.parent_id()).or_default().push(child);
        }
        self.children = grouped
            .into_iter()
            .map(|(parent_id, records)| (parent_id, DraftSlice::seeded(records)))
            .collect();
        self.children_baseline = self.children.clone();
        self.cascade_deleted.clear();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ── Reads ────────────────────────────────────────────────────

    /// The parent collection, read-only.
    #[must_use]
    pub fn parents(&self) -> &DraftSlice<P> {
        &self.parents
    }

    /// One parent record, if present.
    #[must_use]
    pub fn parent(&self, id: RecordId) -> Option<&P> {
        self.parents.get(id)
    }

    /// One child record, if present under the given parent.
    #[must_use]
    pub fn child(&self, parent_id: RecordId, id: RecordId) -> Option<&C> {
        self.children.get(&parent_id).and_then(|s| s.get(id))
    }

    /// Iterates over a parent's children. Empty for unknown parents.
    pub fn children_of(&self, parent_id: RecordId) -> impl Iterator<Item = &C> {
        self.children
            .get(&parent_id)
            .into_iter()
            .flat_map(DraftSlice::records)
    }

    /// Iterates over all children of all parents.
    pub fn all_children(&self) -> impl Iterator<Item = &C> {
        self.children.values().flat_map(DraftSlice::records)
    }

    /// Number of children under a parent.
    #[must_use]
    pub fn child_count(&self, parent_id: RecordId) -> usize {
        self.children.get(&parent_id).map_or(0, DraftSlice::len)
    }

    /// Persisted parent identifiers deleted since the last seed or
    /// canonical replacement.
    #[must_use]
    pub fn deleted_parent_ids(&self) -> &[RecordId] {
        self.parents.deleted_ids()
    }

    /// Persisted child identifiers deleted since the last seed or
    /// canonical replacement — both individually removed children and
    /// those swept up by a parent deletion. Order is not meaningful.
    #[must_use]
    pub fn deleted_child_ids(&self) -> Vec<RecordId> {
        let mut ids = self.cascade_deleted.clone();
        for slice in self.children.values() {
            for id in slice.deleted_ids() {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }

    /// True if any composed collection differs from the last known server
    /// snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.parents.is_dirty()
            || !self.cascade_deleted.is_empty()
            || self.children.values().any(DraftSlice::is_dirty)
    }

    /// Monotonic mutation counter across both collections.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Parent mutations ─────────────────────────────────────────

    /// Adds a new parent record. See [`DraftSlice::add`].
    pub fn add_parent(&mut self, build: impl FnOnce(RecordId) -> P) -> RecordId {
        let id = self.parents.add(build);
        self.touch();
        id
    }

    /// Removes a parent record and its children.
    ///
    /// Persisted children under the parent — both those still present and
    /// those already individually deleted — are collected into the child
    /// deletion bookkeeping, so the batch request carries the full cascade
    /// explicitly instead of relying on the backing store to cascade.
    pub fn remove_parent(&mut self, id: RecordId) {
        if !self.parents.contains(id) {
            return;
        }
        self.parents.remove(id);
        if let Some(slice) = self.children.remove(&id) {
            for deleted in slice.deleted_ids() {
                if !self.cascade_deleted.contains(deleted) {
                    self.cascade_deleted.push(*deleted);
                }
            }
            for child in slice.records() {
                let child_id = child.id();
                if !child.is_new() && !self.cascade_deleted.contains(&child_id) {
                    self.cascade_deleted.push(child_id);
                }
            }
        }
        self.touch();
    }

    // ── Child mutations ──────────────────────────────────────────

    /// Adds a new child under a parent, minting its placeholder from the
    /// store-level allocator and forcing its parent link. Returns `None`
    /// if the parent is absent.
    pub fn add_child(
        &mut self,
        parent_id: RecordId,
        build: impl FnOnce(RecordId) -> C,
    ) -> Option<RecordId> {
        if !self.parents.contains(parent_id) {
            return None;
        }
        let id = self.child_alloc.next();
        let mut record = build(id);
        record.set_parent_id(parent_id);
        self.children
            .entry(parent_id)
            .or_default()
            .insert_new(id, record);
        self.touch();
        Some(id)
    }

    /// Removes a child from under a parent. Absent parent or child is a
    /// no-op.
    pub fn remove_child(&mut self, parent_id: RecordId, id: RecordId) {
        let Some(slice) = self.children.get_mut(&parent_id) else {
            return;
        };
        let before = slice.revision();
        slice.remove(id);
        if slice.revision() != before {
            self.touch();
        }
    }

    /// Replaces both collections wholesale with the server's post-write
    /// state and clears all bookkeeping.
    pub fn apply_canonical(
        &mut self,
        parents: impl IntoIterator<Item = P>,
        children: impl IntoIterator<Item = C>,
    ) {
        self.ingest(parents, children);
        self.revision += 1;
    }

    /// Discards all in-memory edits, restoring the snapshot captured at
    /// seed time (or at the last canonical replacement). Allocators keep
    /// their positions.
    pub fn reset(&mut self) {
        self.parents.reset();
        self.children = self.children_baseline.clone();
        self.cascade_deleted.clear();
        self.revision += 1;
    }
}

impl<P: DraftRecord + Serialize, C: ChildRecord> ParentChildStore<P, C> {
    /// Applies a mutator to one parent's working copy. See
    /// [`DraftSlice::update`].
    pub fn update_parent(&mut self, id: RecordId, mutate: impl FnOnce(&mut P)) {
        let before = self.parents.revision();
        self.parents.update(id, mutate);
        if self.parents.revision() != before {
            self.touch();
        }
    }
}

impl<P: DraftRecord, C: ChildRecord + Serialize> ParentChildStore<P, C> {
    /// Applies a mutator to one child's working copy. The parent link is
    /// restored afterwards along with `id` and `is_new`.
    pub fn update_child(&mut self, parent_id: RecordId, id: RecordId, mutate: impl FnOnce(&mut C)) {
        let Some(slice) = self.children.get_mut(&parent_id) else {
            return;
        };
        let before = slice.revision();
        slice.update(id, |child| {
            mutate(child);
            child.set_parent_id(parent_id);
        });
        if slice.revision() != before {
            self.touch();
        }
    }
}

impl<P: DraftRecord + Validate, C: ChildRecord> ParentChildStore<P, C> {
    /// Validating variant of [`add_parent`](Self::add_parent).
    pub fn try_add_parent(
        &mut self,
        build: impl FnOnce(RecordId) -> P,
    ) -> Result<RecordId, ValidationError> {
        let id = self.parents.try_add(build)?;
        self.touch();
        Ok(id)
    }
}

impl<P: DraftRecord, C: ChildRecord + Validate> ParentChildStore<P, C> {
    /// Validating variant of [`add_child`](Self::add_child). On
    /// validation failure nothing is inserted and the allocator does not
    /// advance.
    pub fn try_add_child(
        &mut self,
        parent_id: RecordId,
        build: impl FnOnce(RecordId) -> C,
    ) -> Result<Option<RecordId>, ValidationError> {
        if !self.parents.contains(parent_id) {
            return Ok(None);
        }
        let mut record = build(RecordId::Draft(self.child_alloc.peek()));
        record.set_parent_id(parent_id);
        record.validate()?;
        let id = self.child_alloc.next();
        self.children
            .entry(parent_id)
            .or_default()
            .insert_new(id, record);
        self.touch();
        Ok(Some(id))
    }
}

impl<P: DraftRecord, C: ChildRecord> Default for ParentChildStore<P, C> {
    fn default() -> Self {
        Self::new()
    }
}
