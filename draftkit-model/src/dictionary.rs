//! Taxonomy dictionaries and their entries.

use crate::{is_false, validate_code};
use draftkit_types::{
    ChildRecord, DraftRecord, LocalizedText, RecordId, Validate, ValidationError,
};
use serde::{Deserialize, Serialize};

/// A taxonomy dictionary — a named group of entries referenced by listings
/// (e.g. `AREA`, `HEATING_TYPE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pub id: RecordId,
    /// Stable machine-readable code, unique per tenant.
    pub code: String,
    /// Per-locale display name.
    #[serde(default)]
    pub name: LocalizedText,
    /// Not yet confirmed to exist server-side.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
}

impl Dictionary {
    /// Creates a dictionary with the given identifier and code.
    #[must_use]
    pub fn new(id: RecordId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: LocalizedText::new(),
            is_new: false,
        }
    }

    /// Builder-style display name.
    #[must_use]
    pub fn with_name(mut self, name: LocalizedText) -> Self {
        self.name = name;
        self
    }
}

impl DraftRecord for Dictionary {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }
}

impl Validate for Dictionary {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_code(&self.code)?;
        if self.name.is_blank() {
            return Err(ValidationError::new(
                "name",
                "at least one locale must carry a name",
            ));
        }
        Ok(())
    }
}

/// A single entry of a dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: RecordId,
    /// The dictionary this entry belongs to.
    pub dictionary_id: RecordId,
    /// Stable machine-readable code, unique within its dictionary.
    pub code: String,
    /// Per-locale display label.
    #[serde(default)]
    pub label: LocalizedText,
    /// Manual ordering within the dictionary.
    #[serde(default)]
    pub sort_order: i32,
    /// Not yet confirmed to exist server-side.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
}

impl DictionaryEntry {
    /// Creates an entry under the given dictionary.
    #[must_use]
    pub fn new(id: RecordId, dictionary_id: RecordId, code: impl Into<String>) -> Self {
        Self {
            id,
            dictionary_id,
            code: code.into(),
            label: LocalizedText::new(),
            sort_order: 0,
            is_new: false,
        }
    }

    /// Builder-style display label.
    #[must_use]
    pub fn with_label(mut self, label: LocalizedText) -> Self {
        self.label = label;
        self
    }

    /// Builder-style sort order.
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

impl DraftRecord for DictionaryEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }
}

impl ChildRecord for DictionaryEntry {
    fn parent_id(&self) -> RecordId {
        self.dictionary_id
    }

    fn set_parent_id(&mut self, id: RecordId) {
        self.dictionary_id = id;
    }
}

impl Validate for DictionaryEntry {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_code(&self.code)?;
        if self.label.is_blank() {
            return Err(ValidationError::new(
                "label",
                "at least one locale must carry a label",
            ));
        }
        Ok(())
    }
}
