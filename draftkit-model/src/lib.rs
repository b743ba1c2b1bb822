//! Domain record types for draftkit.
//!
//! Defines the four record kinds the draft engine is instantiated for in a
//! catalog back-office:
//! - [`Dictionary`] / [`DictionaryEntry`] — taxonomy dictionaries and their
//!   entries (e.g. "AREA" with per-locale labels)
//! - [`Property`] / [`PropertyOption`] — listing property schemas and the
//!   options of select-valued properties
//!
//! All four implement the contracts from `draftkit-types`: `DraftRecord`
//! (identity + `is_new` bookkeeping), `ChildRecord` where nested, and
//! `Validate` (field-level checks run before a record enters a collection
//! or a sync request).

mod dictionary;
mod property;

pub use dictionary::{Dictionary, DictionaryEntry};
pub use property::{Property, PropertyKind, PropertyOption};

use draftkit_types::ValidationError;

/// Serde helper: `is_new` is omitted from the wire when false, matching the
/// initial-load contract where persisted records carry no flag at all.
pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

/// Shared code-field check: non-empty, no whitespace, restricted charset.
pub(crate) fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("code", "code must not be empty"));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new(
            "code",
            "code may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}
