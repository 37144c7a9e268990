//! Dotenv serialization.
//!
//! This module provides the [`Serializer`] that renders a document back to
//! dotenv text, one `KEY=value` line per entry, preceded by `# ` comment
//! lines for entries with a description.
//!
//! ## Quoting
//!
//! Values are always quoted so that any string survives a round trip:
//!
//! - A value containing a newline but no apostrophe is wrapped in single
//!   quotes verbatim; single-quoted values may span lines.
//! - Everything else is double-quoted, with `"`, `\`, newline, carriage
//!   return, tab, backspace and form feed escaped.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::{to_string, EnvMap, Entry};
//!
//! let mut map = EnvMap::new();
//! map.insert("GREETING".to_string(), Entry::new("hello\nworld").with_description("Shown at startup"));
//! map.insert("PATH_SEP".to_string(), Entry::new("\\"));
//!
//! assert_eq!(
//!     to_string(&map),
//!     "# Shown at startup\nGREETING='hello\nworld'\nPATH_SEP=\"\\\\\""
//! );
//! ```

use crate::value::EntryValue;
use crate::EnvMap;

/// The dotenv serializer.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends every entry of `map`, in map order.
    pub fn write_map<V: EntryValue>(&mut self, map: &EnvMap<V>) {
        for (key, value) in map {
            self.write_entry(key, value.value(), value.description());
        }
    }

    /// Appends one entry, separated from previous output by a newline.
    ///
    /// Keys are written as given; a key outside `[A-Za-z_][A-Za-z0-9_]*`
    /// produces text the parser rejects.
    pub fn write_entry(&mut self, key: &str, value: &str, description: Option<&str>) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            for line in description.split('\n') {
                self.output.push_str("# ");
                self.output.push_str(line);
                self.output.push('\n');
            }
        }
        self.output.push_str(key);
        self.output.push('=');
        self.write_value(value);
    }

    fn write_value(&mut self, value: &str) {
        if value.contains('\n') && !value.contains('\'') {
            self.output.push('\'');
            self.output.push_str(value);
            self.output.push('\'');
            return;
        }

        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"), // backspace
                '\u{000C}' => self.output.push_str("\\f"), // form feed
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}
