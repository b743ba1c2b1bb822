//! Batch reconciliation boundary for draftkit drafts.
//!
//! An editing session mutates its draft purely in memory; this crate owns
//! the single round trip that reconciles the whole draft — adds, updates,
//! deletes — with the backing store:
//!
//! - [`SyncRequest`] / [`TreeSyncRequest`] — wire-shaped batches carrying
//!   the full collection plus the deletion lists
//! - [`BatchBackend`] / [`TreeBatchBackend`] — the external collaborator
//!   contracts (transport and RPC shape live behind them)
//! - [`SyncEngine`] — validate, stage, commit, apply; on any failure the
//!   draft is left exactly as it was, so retrying is always safe
//! - [`RemapTable`] — the placeholder-to-real identity substitutions the
//!   backing store performed
//!
//! A commit that races a concurrent local edit is refused with
//! [`SyncError::DraftChanged`] rather than silently dropping the edit.

mod engine;
mod error;
mod request;

pub use engine::{StagedCommit, SyncEngine, SyncReport};
pub use error::{SyncError, SyncResult};
pub use request::{
    BatchBackend, RemapTable, SyncRequest, SyncResponse, TreeBatchBackend, TreeSyncRequest,
    TreeSyncResponse,
};
