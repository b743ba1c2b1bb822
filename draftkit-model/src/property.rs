//! Listing property schemas and their options.

use crate::{is_false, validate_code};
use draftkit_types::{
    ChildRecord, DraftRecord, LocalizedText, RecordId, Validate, ValidationError,
};
use serde::{Deserialize, Serialize};

/// The value shape of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    Select,
    MultiSelect,
}

impl PropertyKind {
    /// True for kinds whose values come from a fixed option list.
    #[must_use]
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

/// A domain-defined property attached to listings (e.g. "living area",
/// "heating type").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: RecordId,
    /// Stable machine-readable code, unique per tenant.
    pub code: String,
    pub kind: PropertyKind,
    /// Per-locale display name.
    #[serde(default)]
    pub name: LocalizedText,
    /// Measurement unit, numeric properties only (e.g. "m²").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Whether listings must carry a value for this property.
    #[serde(default)]
    pub required: bool,
    /// Manual ordering in editing forms.
    #[serde(default)]
    pub sort_order: i32,
    /// Not yet confirmed to exist server-side.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
}

impl Property {
    /// Creates a property with the given identifier, code and kind.
    #[must_use]
    pub fn new(id: RecordId, code: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            id,
            code: code.into(),
            kind,
            name: LocalizedText::new(),
            unit: None,
            required: false,
            sort_order: 0,
            is_new: false,
        }
    }

    /// Builder-style display name.
    #[must_use]
    pub fn with_name(mut self, name: LocalizedText) -> Self {
        self.name = name;
        self
    }

    /// Builder-style measurement unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Builder-style required flag.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl DraftRecord for Property {
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

impl Validate for Property {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_code(&self.code)?;
        if self.name.is_blank() {
            return Err(ValidationError::new(
                "name",
                "at least one locale must carry a name",
            ));
        }
        if self.unit.is_some() && self.kind != PropertyKind::Number {
            return Err(ValidationError::new(
                "unit",
                "only numeric properties carry a unit",
            ));
        }
        Ok(())
    }
}

/// One option of a select-valued property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub id: RecordId,
    /// The property this option belongs to.
    pub property_id: RecordId,
    /// Stable machine-readable code, unique within its property.
    pub code: String,
    /// Per-locale display label.
    #[serde(default)]
    pub label: LocalizedText,
    /// Manual ordering within the property.
    #[serde(default)]
    pub sort_order: i32,
    /// Not yet confirmed to exist server-side.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
}

impl PropertyOption {
    /// Creates an option under the given property.
    #[must_use]
    pub fn new(id: RecordId, property_id: RecordId, code: impl Into<String>) -> Self {
        Self {
            id,
            property_id,
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

impl DraftRecord for PropertyOption {
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

impl ChildRecord for PropertyOption {
    fn parent_id(&self) -> RecordId {
        self.property_id
    }

    fn set_parent_id(&mut self, id: RecordId) {
        self.property_id = id;
    }
}

impl Validate for PropertyOption {
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
