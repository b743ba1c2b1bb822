//! Contracts implemented by every draftable record type.

use crate::RecordId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A record that can live in a draft collection.
///
/// The engine needs exactly three things from a record: its identifier, the
/// ability to rewrite that identifier (placeholder substitution after a
/// sync), and the `is_new` flag marking records the backing store has not
/// confirmed yet. Everything else is domain payload the engine never reads.
pub trait DraftRecord: Clone {
    /// The record's current identifier.
    fn id(&self) -> RecordId;

    /// Rewrites the record's identifier.
    fn set_id(&mut self, id: RecordId);

    /// True until the backing store confirms this record exists.
    fn is_new(&self) -> bool;

    /// Sets the `is_new` flag.
    fn set_new(&mut self, is_new: bool);

    /// Marks the record as confirmed persisted.
    fn mark_persisted(&mut self) {
        self.set_new(false);
    }
}

/// A record nested under a parent record (entries under a dictionary,
/// options under a property).
///
/// The parent link is what the composer keys child collections by and what
/// placeholder substitution rewrites when a parent's real identifier comes
/// back from the backing store.
pub trait ChildRecord: DraftRecord {
    /// Identifier of the owning parent record.
    fn parent_id(&self) -> RecordId;

    /// Rewrites the parent link.
    fn set_parent_id(&mut self, id: RecordId);
}

/// A field-level validation failure.
///
/// Surfaced to the caller before a record is accepted into a collection or
/// shipped to the backing store; the collection is never mutated on failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The offending field, named for inline display next to its input.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Schema validation for records entering a collection or a sync request.
pub trait Validate {
    /// Checks the record's fields, returning the first failure found.
    fn validate(&self) -> Result<(), ValidationError>;
}
