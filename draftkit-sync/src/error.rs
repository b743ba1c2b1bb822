//! Error types for the sync layer.

use draftkit_types::{RecordId, ValidationError};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while reconciling a draft with the backing store.
///
/// None of these leave local state changed: a failed commit is always
/// retryable with the same draft.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backing store rejected the batch; carries its human-readable
    /// message for inline display.
    #[error("backend error: {0}")]
    Backend(String),

    /// A record failed schema validation before being sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The draft was mutated while the commit was in flight; the canonical
    /// response was discarded so the newer edits survive.
    #[error("draft changed while commit was in flight")]
    DraftChanged,

    /// The canonical snapshot still references a placeholder identifier.
    #[error("canonical snapshot still references placeholder {0}")]
    MissingRemap(RecordId),

    /// The identity remap table is malformed.
    #[error("invalid remap entry: {from} -> {to}")]
    InvalidRemap { from: RecordId, to: RecordId },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
