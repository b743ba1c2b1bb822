//! Accumulating partial-record diffs.
//!
//! Some backing stores accept per-field patches instead of full records.
//! For slices that opt in, every committed update is diffed shallowly
//! against the previous working copy and the changed top-level fields are
//! accumulated here, merged across successive updates of the same record.

use draftkit_types::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-record accumulated field diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchLog {
    patches: BTreeMap<RecordId, Map<String, Value>>,
}

impl PatchLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no record has accumulated a diff.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Number of records with an accumulated diff.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// The accumulated diff for one record, as a JSON object of changed
    /// top-level fields.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<Value> {
        self.patches.get(&id).map(|m| Value::Object(m.clone()))
    }

    /// All accumulated diffs.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<RecordId, Value> {
        self.patches
            .iter()
            .map(|(id, m)| (*id, Value::Object(m.clone())))
            .collect()
    }

    /// Diffs `before` against `after` and merges the changed fields into
    /// the record's accumulated patch.
    ///
    /// The diff is shallow: a changed nested structure appears as its
    /// whole new value. A field present before and absent after is
    /// recorded as `null`, which is how the batch contract expresses
    /// field clearing. A record that fails to serialize records nothing;
    /// such a record cannot be shipped to the backing store either, and
    /// the full-record path surfaces that error.
    pub fn record<R: Serialize>(&mut self, id: RecordId, before: &R, after: &R) {
        let (Ok(before), Ok(after)) = (
            serde_json::to_value(before),
            serde_json::to_value(after),
        ) else {
            return;
        };
        let (Value::Object(before), Value::Object(after)) = (before, after) else {
            return;
        };

        let mut changed = Map::new();
        for (key, value) in &after {
            if before.get(key) != Some(value) {
                changed.insert(key.clone(), value.clone());
            }
        }
        for key in before.keys() {
            if !after.contains_key(key) {
                changed.insert(key.clone(), Value::Null);
            }
        }
        if changed.is_empty() {
            return;
        }

        let entry = self.patches.entry(id).or_default();
        for (key, value) in changed {
            entry.insert(key, value);
        }
    }

    /// Drops the accumulated diff for one record. Called when the record
    /// itself is removed from the collection.
    pub fn discard(&mut self, id: RecordId) {
        self.patches.remove(&id);
    }

    /// Drops all accumulated diffs.
    pub fn clear(&mut self) {
        self.patches.clear();
    }
}
