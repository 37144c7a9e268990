//! Configuration options for dotenv parsing.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::{parse_with_options, Document, ParseOptions};
//!
//! let source = "# Public base URL\nBASE_URL=https://example.com";
//!
//! // Plain values only (the default)
//! let doc = parse_with_options(source, ParseOptions::new()).unwrap();
//! assert!(matches!(doc, Document::Values(_)));
//!
//! // Keep comment descriptions
//! let doc = parse_with_options(source, ParseOptions::new().with_descriptions(true)).unwrap();
//! assert_eq!(doc.get_description("BASE_URL"), Some("Public base URL"));
//! ```

/// Configuration options for parsing.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::ParseOptions;
///
/// let options = ParseOptions::default();
/// assert!(!options.extract_descriptions);
///
/// let options = ParseOptions::with_comments();
/// assert!(options.extract_descriptions);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Attach preceding comment lines to each entry as its description.
    pub extract_descriptions: bool,
}

impl ParseOptions {
    /// Creates default options (values only, comments discarded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that keep comment descriptions.
    #[must_use]
    pub fn with_comments() -> Self {
        ParseOptions {
            extract_descriptions: true,
        }
    }

    /// Sets whether comment descriptions are extracted.
    #[must_use]
    pub fn with_descriptions(mut self, extract: bool) -> Self {
        self.extract_descriptions = extract;
        self
    }
}
