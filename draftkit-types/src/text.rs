//! Localized text maps.
//!
//! Records carry human-readable fields as `locale -> string` maps. The draft
//! engine treats these as opaque values; locale fallback and resolution are
//! the presentation layer's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An opaque map from locale code to translated text.
///
/// Backed by a `BTreeMap` so serialized snapshots are byte-stable regardless
/// of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Creates an empty text map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insertion for literals and tests.
    #[must_use]
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(locale, text);
        self
    }

    /// Returns the text for a locale, if present.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Sets the text for a locale, replacing any existing value.
    pub fn set(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.0.insert(locale.into(), text.into());
    }

    /// Removes a locale's text, returning it if it was present.
    pub fn remove(&mut self, locale: &str) -> Option<String> {
        self.0.remove(locale)
    }

    /// Returns true if no locale carries text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of locales with text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if every present translation is blank.
    ///
    /// A map of empty strings is what a form produces when the user adds
    /// locales but types nothing; validation treats it the same as empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|t| t.trim().is_empty())
    }

    /// Iterates over `(locale, text)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// Iterates over the locale codes present.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, t)| (l.into(), t.into()))
                .collect(),
        )
    }
}
