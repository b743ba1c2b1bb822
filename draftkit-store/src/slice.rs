//! A draft collection for one entity kind.
//!
//! A `DraftSlice` is the single source of truth an editing session reads:
//! a keyed map of working copies, mutated purely in memory, plus the
//! bookkeeping needed to reconcile with the backing store later — which
//! persisted records were deleted, whether anything changed at all, and a
//! revision counter that lets the sync layer detect edits that raced an
//! in-flight commit.

use crate::PatchLog;
use draftkit_types::{DraftIdAllocator, DraftRecord, RecordId, Validate, ValidationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A client-held working copy of one server-owned collection.
///
/// Records are keyed by [`RecordId`]; insertion order carries no meaning.
/// Mutations run to completion synchronously and never touch the network.
/// Absent-id operations are silent no-ops: UI races (a debounced update
/// firing after a delete) are expected and harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "R: Serialize",
    deserialize = "R: DeserializeOwned"
))]
pub struct DraftSlice<R: DraftRecord> {
    records: HashMap<RecordId, R>,
    /// Server snapshot captured at seed time; what `reset` restores.
    baseline: HashMap<RecordId, R>,
    /// Persisted records removed client-side, in deletion order.
    deleted: Vec<RecordId>,
    alloc: DraftIdAllocator,
    dirty: bool,
    revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patches: Option<PatchLog>,
}

impl<R: DraftRecord> DraftSlice<R> {
    /// Creates an empty slice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            baseline: HashMap::new(),
            deleted: Vec::new(),
            alloc: DraftIdAllocator::new(),
            dirty: false,
            revision: 0,
            patches: None,
        }
    }

    /// Creates a slice seeded from a server-fetched array.
    ///
    /// Every ingested record is marked persisted regardless of what its
    /// `is_new` flag said on the wire, and the result is retained as the
    /// baseline that [`reset`](Self::reset) restores.
    #[must_use]
    pub fn seeded(records: impl IntoIterator<Item = R>) -> Self {
        let mut slice = Self::new();
        slice.ingest(records);
        slice
    }

    /// Enables partial-update tracking. Subsequent updates accumulate a
    /// per-record field diff readable via [`patch_snapshot`](Self::patch_snapshot).
    #[must_use]
    pub fn with_patch_log(mut self) -> Self {
        self.patches = Some(PatchLog::new());
        self
    }

    fn ingest(&mut self, records: impl IntoIterator<Item = R>) {
        self.records.clear();
        for mut record in records {
            record.mark_persisted();
            self.records.insert(record.id(), record);
        }
        self.baseline = self.records.clone();
        self.deleted.clear();
        if let Some(log) = &mut self.patches {
            log.clear();
        }
        self.dirty = false;
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Returns the record with the given identifier, if present.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.get(&id)
    }

    /// Returns true if a record with the given identifier is present.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterates over all records. Order is not meaningful.
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    /// Number of records currently in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Persisted identifiers deleted since the last seed or canonical
    /// replacement, in deletion order.
    #[must_use]
    pub fn deleted_ids(&self) -> &[RecordId] {
        &self.deleted
    }

    /// True if the draft differs from the last known server snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Monotonic mutation counter. The sync layer stamps a request with
    /// this value and refuses to apply a response if it moved meanwhile.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Adds a new record, minting a placeholder identifier for it.
    ///
    /// The builder receives the identifier the record will live under;
    /// whatever it sets for `id` and `is_new` is overwritten. Returns the
    /// minted identifier.
    pub fn add(&mut self, build: impl FnOnce(RecordId) -> R) -> RecordId {
        let id = self.alloc.next();
        let mut record = build(id);
        record.set_id(id);
        record.set_new(true);
        self.records.insert(id, record);
        self.touch();
        id
    }

    /// Removes a record.
    ///
    /// Absent identifiers are a no-op. A record the backing store never
    /// knew about is dropped without a trace; a persisted record is
    /// dropped and its identifier appended to the deletion list, at most
    /// once.
    pub fn remove(&mut self, id: RecordId) {
        let Some(record) = self.records.remove(&id) else {
            return;
        };
        if !record.is_new() && !self.deleted.contains(&id) {
            self.deleted.push(id);
        }
        if let Some(log) = &mut self.patches {
            log.discard(id);
        }
        self.touch();
    }

    /// Replaces the collection wholesale with the server's post-write
    /// state and clears all bookkeeping. The new state becomes the
    /// baseline for [`reset`](Self::reset).
    pub fn apply_canonical(&mut self, records: impl IntoIterator<Item = R>) {
        self.ingest(records);
        self.revision += 1;
    }

    /// Discards all in-memory edits, restoring the baseline captured at
    /// seed time (or at the last canonical replacement).
    ///
    /// The placeholder allocator keeps its position so identifiers minted
    /// before the reset are never minted again.
    pub fn reset(&mut self) {
        self.records = self.baseline.clone();
        self.deleted.clear();
        if let Some(log) = &mut self.patches {
            log.clear();
        }
        self.dirty = false;
        self.revision += 1;
    }

    /// Inserts a freshly built record under an identifier allocated by the
    /// caller. Used by the composer, which mints child identifiers from a
    /// store-level allocator.
    pub(crate) fn insert_new(&mut self, id: RecordId, mut record: R) {
        record.set_id(id);
        record.set_new(true);
        self.records.insert(id, record);
        self.touch();
    }
}

impl<R: DraftRecord + Serialize> DraftSlice<R> {
    /// Applies a mutator to one record's working copy.
    ///
    /// The record is cloned, the mutator runs on the copy, and the copy is
    /// committed back under the same key. `id` and `is_new` are restored
    /// afterwards no matter what the mutator did to them. Absent
    /// identifiers are a no-op.
    pub fn update(&mut self, id: RecordId, mutate: impl FnOnce(&mut R)) {
        let Some(current) = self.records.get(&id) else {
            return;
        };
        let mut draft = current.clone();
        mutate(&mut draft);
        draft.set_id(id);
        draft.set_new(current.is_new());
        if let Some(log) = &mut self.patches {
            log.record(id, current, &draft);
        }
        self.records.insert(id, draft);
        self.touch();
    }

    /// The accumulated partial-update diffs, if tracking is enabled and
    /// anything changed. Does not drain the log; a failed commit must
    /// leave it intact.
    #[must_use]
    pub fn patch_snapshot(&self) -> Option<BTreeMap<RecordId, Value>> {
        let log = self.patches.as_ref()?;
        if log.is_empty() {
            return None;
        }
        Some(log.entries())
    }
}

impl<R: DraftRecord + Validate> DraftSlice<R> {
    /// Validating variant of [`add`](Self::add).
    ///
    /// The record is built against the identifier that *would* be minted,
    /// then validated; on failure nothing is inserted and the allocator
    /// does not advance.
    pub fn try_add(
        &mut self,
        build: impl FnOnce(RecordId) -> R,
    ) -> Result<RecordId, ValidationError> {
        let mut record = build(RecordId::Draft(self.alloc.peek()));
        record.validate()?;
        let id = self.alloc.next();
        record.set_id(id);
        record.set_new(true);
        self.records.insert(id, record);
        self.touch();
        Ok(id)
    }
}

impl<R: DraftRecord> Default for DraftSlice<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: DraftRecord> FromIterator<R> for DraftSlice<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::seeded(iter)
    }
}
