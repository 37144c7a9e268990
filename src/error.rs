//! Error types for dotenv parsing and the Serde bridge.
//!
//! Parsing has exactly one failure mode: a [`Error::Syntax`] raised at the
//! first position where no top-level rule (whitespace, comment, keyed entry)
//! can consume input. The remaining variants belong to the I/O helpers and
//! to [`crate::from_str`], which maps the parsed document onto Rust types.
//!
//! ## Error Context
//!
//! Syntax errors carry:
//! - The offending character, or end of input
//! - The zero-based byte offset plus 1-based line and column
//! - A short single-line preview of the source at that offset
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::{parse, Error};
//!
//! let err = parse("A#B").unwrap_err();
//! match err {
//!     Error::Syntax { offset, found, .. } => {
//!         assert_eq!(offset, 1);
//!         assert_eq!(found, Some('#'));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Maximum number of characters shown in a syntax error preview.
pub const PREVIEW_LEN: usize = 25;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Input does not conform to the grammar
    #[error(
        "Syntax error at line {line}, column {col} (offset {offset}): unexpected {}\n  {preview}",
        describe(.found)
    )]
    Syntax {
        found: Option<char>,
        offset: usize,
        line: usize,
        col: usize,
        preview: String,
    },

    /// Custom error, raised while mapping values onto Rust types
    #[error("Error: {0}")]
    Custom(String),
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("character {:?}", ch),
        None => "end of input".to_string(),
    }
}

impl Error {
    /// Creates a syntax error for `source` at byte `offset`.
    ///
    /// The line, column and preview are derived from the source text. An
    /// offset at or past the end of the source reports end of input; an
    /// offset inside a multi-byte character moves back to its start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotenv::Error;
    ///
    /// let err = Error::syntax("KEY=ok\n!bad", 7);
    /// assert!(err.to_string().contains("line 2, column 1"));
    /// assert!(err.to_string().contains("'!'"));
    /// ```
    pub fn syntax(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let col = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        let rest = &source[offset..];
        let preview = rest
            .split(&['\r', '\n'][..])
            .next()
            .unwrap_or_default()
            .chars()
            .take(PREVIEW_LEN)
            .collect();

        Error::Syntax {
            found: rest.chars().next(),
            offset,
            line,
            col,
            preview,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dotenv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the byte offset of a syntax error.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
