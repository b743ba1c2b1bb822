//! Optimistic draft collections for draftkit.
//!
//! This crate provides the in-memory state machines behind an editing
//! session:
//!
//! - [`DraftSlice<R>`] — a keyed collection of working copies supporting
//!   add/update/delete before any network round trip, with placeholder
//!   identity allocation and deletion bookkeeping
//! - [`PatchLog`] — an accumulating per-record field diff for slices that
//!   ship partial updates instead of full records
//! - [`ParentChildStore<P, C>`] — two entity kinds (e.g. properties and
//!   their options) composed behind a single commit boundary
//!
//! All state here is pure and synchronous; the async reconciliation
//! boundary lives in `draftkit-sync`, durability in `draftkit-persist`.
//!
//! Invariants maintained by every slice:
//! - a placeholder identifier is never reused, even across deletions
//! - only records the backing store knows about enter the deletion list
//! - a record's map key and its own `id` field are always equal

mod compose;
mod patch;
mod slice;

pub use compose::ParentChildStore;
pub use patch::PatchLog;
pub use slice::DraftSlice;
