//! Entry values of a parsed dotenv document.
//!
//! A document maps keys either to plain strings or to [`Entry`] values that
//! also carry the description taken from the comment lines above the key.
//! Both shapes implement [`EntryValue`], which is what the parser builds and
//! what the serializer reads.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::{parse_with_descriptions, Entry};
//!
//! let doc = parse_with_descriptions("# Listen port\nPORT=8080").unwrap();
//! assert_eq!(
//!     doc.get("PORT"),
//!     Some(&Entry::new("8080").with_description("Listen port"))
//! );
//! ```

use crate::EnvMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value together with its optional description.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    pub description: Option<String>,
    pub value: String,
}

impl Entry {
    /// Creates an entry without a description.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotenv::Entry;
    ///
    /// let entry = Entry::new("postgres://localhost");
    /// assert_eq!(entry.value, "postgres://localhost");
    /// assert!(entry.description.is_none());
    /// ```
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Entry {
            description: None,
            value: value.into(),
        }
    }

    /// Sets the description. Multi-line descriptions use `\n` separators.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::new(value)
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::new(value)
    }
}

/// A value type a dotenv document can map keys to.
pub trait EntryValue {
    /// Builds the value from a parsed string and its pending description.
    fn from_parts(value: String, description: Option<String>) -> Self;

    fn value(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }
}

impl EntryValue for String {
    fn from_parts(value: String, _description: Option<String>) -> Self {
        value
    }

    fn value(&self) -> &str {
        self
    }
}

impl EntryValue for Entry {
    fn from_parts(value: String, description: Option<String>) -> Self {
        Entry { description, value }
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A parsed document in either output shape.
///
/// Returned by [`crate::parse_with_options`]; the variant follows
/// [`crate::ParseOptions::extract_descriptions`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Values(EnvMap<String>),
    Entries(EnvMap<Entry>),
}

impl Document {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Document::Values(map) => map.len(),
            Document::Entries(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the string value for `key`.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&str> {
        match self {
            Document::Values(map) => map.get(key).map(String::as_str),
            Document::Entries(map) => map.get(key).map(|entry| entry.value.as_str()),
        }
    }

    /// Returns the description for `key`, if descriptions were extracted.
    #[must_use]
    pub fn get_description(&self, key: &str) -> Option<&str> {
        match self {
            Document::Values(_) => None,
            Document::Entries(map) => map.get(key).and_then(Entry::description),
        }
    }

    /// Drops descriptions, keeping only the values.
    #[must_use]
    pub fn into_values(self) -> EnvMap<String> {
        match self {
            Document::Values(map) => map,
            Document::Entries(map) => map
                .into_iter()
                .map(|(key, entry)| (key, entry.value))
                .collect(),
        }
    }
}

impl From<EnvMap<String>> for Document {
    fn from(map: EnvMap<String>) -> Self {
        Document::Values(map)
    }
}

impl From<EnvMap<Entry>> for Document {
    fn from(map: EnvMap<Entry>) -> Self {
        Document::Entries(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_value_for_string_discards_description() {
        let value = String::from_parts("x".to_string(), Some("ignored".to_string()));
        assert_eq!(value, "x");
        assert_eq!(EntryValue::description(&value), None);
    }

    #[test]
    fn test_entry_value_for_entry() {
        let entry = Entry::from_parts("x".to_string(), Some("doc".to_string()));
        assert_eq!(EntryValue::value(&entry), "x");
        assert_eq!(EntryValue::description(&entry), Some("doc"));
        assert_eq!(entry.to_string(), "x");
    }

    #[test]
    fn test_document_accessors() {
        let mut entries = EnvMap::new();
        entries.insert("A".to_string(), Entry::new("1").with_description("first"));
        entries.insert("B".to_string(), Entry::new("2"));
        let doc = Document::from(entries);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get_value("A"), Some("1"));
        assert_eq!(doc.get_description("A"), Some("first"));
        assert_eq!(doc.get_description("B"), None);
        assert_eq!(doc.get_value("C"), None);

        let values = doc.into_values();
        assert_eq!(values.get("B").map(String::as_str), Some("2"));
    }
}
