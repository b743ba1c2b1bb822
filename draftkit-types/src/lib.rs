//! Core type definitions for draftkit.
//!
//! This crate defines the fundamental, domain-agnostic types used throughout
//! the draft engine:
//! - Record identifiers spanning two disjoint spaces (server-assigned and
//!   client-minted placeholders)
//! - The placeholder allocator
//! - Localized text maps
//! - The `DraftRecord` and `Validate` contracts every draftable record
//!   implements
//!
//! Domain-specific record types (dictionaries, properties, etc.) belong in
//! `draftkit-model`, not here.

mod ids;
mod record;
mod text;

pub use ids::{DraftIdAllocator, RecordId};
pub use record::{ChildRecord, DraftRecord, Validate, ValidationError};
pub use text::LocalizedText;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid record id: {0}")]
    InvalidId(String),
}
