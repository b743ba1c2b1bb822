//! The commit engine.
//!
//! Reconciliation is split-phase so integrations that cannot hold a draft
//! borrow across an await still get the in-flight-edit guard:
//!
//! 1. [`SyncEngine::stage_slice`] validates the draft, snapshots a request
//!    and stamps it with the draft's revision;
//! 2. the backend commits the staged request;
//! 3. [`SyncEngine::apply_slice`] applies the canonical response — unless
//!    the draft's revision moved since staging, in which case the response
//!    is discarded ([`SyncError::DraftChanged`]) and the newer local edits
//!    survive.
//!
//! [`SyncEngine::sync_slice`] composes the three steps under one exclusive
//! borrow for callers that can afford it. A failed or discarded commit
//! leaves the draft untouched; retrying with the same state is always
//! safe.

use crate::{
    BatchBackend, RemapTable, SyncError, SyncRequest, SyncResponse, SyncResult, TreeBatchBackend,
    TreeSyncRequest, TreeSyncResponse,
};
use draftkit_store::{DraftSlice, ParentChildStore};
use draftkit_types::{ChildRecord, DraftRecord, RecordId, Validate};
use serde::Serialize;
use tracing::{debug, info};

/// A validated, revision-stamped request waiting for the backend.
#[derive(Debug, Clone)]
pub struct StagedCommit<Q> {
    request: Q,
    revision: u64,
    deleted: usize,
}

impl<Q> StagedCommit<Q> {
    /// The wire request to hand to the backend.
    #[must_use]
    pub fn request(&self) -> &Q {
        &self.request
    }

    /// The draft revision this request was built from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Summary of a successfully applied commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Records in the canonical snapshot.
    pub records: usize,
    /// Placeholders that received real identifiers.
    pub inserted: usize,
    /// Persisted records the batch deleted.
    pub deleted: usize,
    /// The identity remapping, for callers holding placeholder references
    /// (selection state, route params).
    pub remap: RemapTable,
    /// Child identity remapping. Kept separate from `remap`: parent and
    /// child placeholder counters both start at -1, so the two key spaces
    /// overlap.
    pub child_remap: RemapTable,
}

/// Drives batch reconciliation against one backend.
pub struct SyncEngine<B> {
    backend: B,
}

impl<B> SyncEngine<B> {
    /// Creates an engine over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Single-kind collections ──────────────────────────────────

    /// Validates every record and snapshots a request from the draft.
    ///
    /// Validation failure surfaces before anything is sent; the draft is
    /// not touched either way.
    pub fn stage_slice<R>(
        slice: &DraftSlice<R>,
        parent_id: Option<RecordId>,
    ) -> SyncResult<StagedCommit<SyncRequest<R>>>
    where
        R: DraftRecord + Validate + Serialize,
    {
        for record in slice.records() {
            record.validate()?;
        }
        let request = SyncRequest {
            parent_id,
            records: slice.records().cloned().collect(),
            deleted_ids: slice.deleted_ids().to_vec(),
            patches: slice.patch_snapshot(),
        };
        debug!(
            records = request.records.len(),
            deleted = request.deleted_ids.len(),
            "staged slice commit"
        );
        Ok(StagedCommit {
            deleted: request.deleted_ids.len(),
            revision: slice.revision(),
            request,
        })
    }

    /// Applies a canonical response to the draft.
    ///
    /// Refuses if the draft was edited since staging, and checks the
    /// response for leftover placeholders before replacing anything.
    pub fn apply_slice<R>(
        slice: &mut DraftSlice<R>,
        staged: &StagedCommit<SyncRequest<R>>,
        response: SyncResponse<R>,
    ) -> SyncResult<SyncReport>
    where
        R: DraftRecord,
    {
        if slice.revision() != staged.revision {
            return Err(SyncError::DraftChanged);
        }
        response.remap.check()?;
        for record in &response.records {
            if record.id().is_draft() {
                return Err(SyncError::MissingRemap(record.id()));
            }
        }

        let report = SyncReport {
            records: response.records.len(),
            inserted: response.remap.len(),
            deleted: staged.deleted,
            remap: response.remap,
            child_remap: RemapTable::new(),
        };
        slice.apply_canonical(response.records);
        info!(
            records = report.records,
            inserted = report.inserted,
            deleted = report.deleted,
            "slice commit applied"
        );
        Ok(report)
    }

    /// Stages, commits and applies in one call, holding the draft borrow
    /// across the round trip.
    pub async fn sync_slice<R>(
        &self,
        slice: &mut DraftSlice<R>,
        parent_id: Option<RecordId>,
    ) -> SyncResult<SyncReport>
    where
        R: DraftRecord + Validate + Serialize + Send + Sync,
        B: BatchBackend<R>,
    {
        let staged = Self::stage_slice(slice, parent_id)?;
        let response = self.backend.commit(staged.request()).await?;
        Self::apply_slice(slice, &staged, response)
    }

    // ── Parent/child collections ─────────────────────────────────

    /// Validates both collections and snapshots a tree request, children
    /// flattened with their parent links intact.
    pub fn stage_tree<P, C>(
        store: &ParentChildStore<P, C>,
        parent_id: Option<RecordId>,
    ) -> SyncResult<StagedCommit<TreeSyncRequest<P, C>>>
    where
        P: DraftRecord + Validate,
        C: ChildRecord + Validate,
    {
        for record in store.parents().records() {
            record.validate()?;
        }
        for child in store.all_children() {
            child.validate()?;
        }
        let request = TreeSyncRequest {
            parent_id,
            records: store.parents().records().cloned().collect(),
            children: store.all_children().cloned().collect(),
            deleted_ids: store.deleted_parent_ids().to_vec(),
            deleted_child_ids: store.deleted_child_ids(),
        };
        debug!(
            records = request.records.len(),
            children = request.children.len(),
            deleted = request.deleted_ids.len(),
            deleted_children = request.deleted_child_ids.len(),
            "staged tree commit"
        );
        Ok(StagedCommit {
            deleted: request.deleted_ids.len() + request.deleted_child_ids.len(),
            revision: store.revision(),
            request,
        })
    }

    /// Applies a canonical tree response, checking parents, children and
    /// child parent links for leftover placeholders.
    pub fn apply_tree<P, C>(
        store: &mut ParentChildStore<P, C>,
        staged: &StagedCommit<TreeSyncRequest<P, C>>,
        response: TreeSyncResponse<P, C>,
    ) -> SyncResult<SyncReport>
    where
        P: DraftRecord,
        C: ChildRecord,
    {
        if store.revision() != staged.revision {
            return Err(SyncError::DraftChanged);
        }
        response.remap.check()?;
        response.child_remap.check()?;
        for record in &response.records {
            if record.id().is_draft() {
                return Err(SyncError::MissingRemap(record.id()));
            }
        }
        for child in &response.children {
            if child.id().is_draft() {
                return Err(SyncError::MissingRemap(child.id()));
            }
            if child.parent_id().is_draft() {
                return Err(SyncError::MissingRemap(child.parent_id()));
            }
        }

        let report = SyncReport {
            records: response.records.len() + response.children.len(),
            inserted: response.remap.len() + response.child_remap.len(),
            deleted: staged.deleted,
            remap: response.remap,
            child_remap: response.child_remap,
        };
        store.apply_canonical(response.records, response.children);
        info!(
            records = report.records,
            inserted = report.inserted,
            deleted = report.deleted,
            "tree commit applied"
        );
        Ok(report)
    }

    /// Stages, commits and applies a tree in one call.
    pub async fn sync_tree<P, C>(
        &self,
        store: &mut ParentChildStore<P, C>,
        parent_id: Option<RecordId>,
    ) -> SyncResult<SyncReport>
    where
        P: DraftRecord + Validate + Serialize + Send + Sync,
        C: ChildRecord + Validate + Serialize + Send + Sync,
        B: TreeBatchBackend<P, C>,
    {
        let staged = Self::stage_tree(store, parent_id)?;
        let response = self.backend.commit_tree(staged.request()).await?;
        Self::apply_tree(store, &staged, response)
    }
}
