//! # serde_dotenv
//!
//! A parser and serializer for dotenv-style configuration files, driven by a
//! small declarative grammar engine.
//!
//! ## The format
//!
//! ```text
//! # Database connection string.
//! # Read once at startup.
//! DATABASE_URL=postgres://localhost/app
//!
//! GREETING="Hello,\tworld\n"
//! TEMPLATE='literal \n, may
//! span lines'
//! EMPTY=
//! ```
//!
//! - Keys match `[A-Za-z_][A-Za-z0-9_]*` and are followed directly by `=`.
//! - Values are unquoted (up to the end of the line), double-quoted (with
//!   `\\ \n \t \b \f \r \"` escapes), or single-quoted (literal, no escapes).
//!   A missing value is the empty string.
//! - Consecutive `#` comment lines form the description of the next key.
//! - Whitespace between entries is free-form.
//! - When a key is assigned twice, the last assignment wins.
//!
//! ## Key Features
//!
//! - **Grammar driven**: the format is a table of rules ([`grammar`])
//!   interpreted by a PEG-style engine ([`extract`])
//! - **Descriptions**: comments can be kept as documentation of each key
//! - **Round-trip safe**: [`to_string`] quotes every value so it parses back
//!   unchanged
//! - **Serde compatible**: [`from_str`] maps a file onto any `Deserialize` type
//! - **Precise errors**: syntax errors report the offending character, offset,
//!   line, column and a preview
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_dotenv::{parse, parse_with_descriptions, to_string};
//!
//! let source = "# Listen port\nPORT=8080\nHOST=\"0.0.0.0\"";
//!
//! let values = parse(source).unwrap();
//! assert_eq!(values.get("PORT").map(String::as_str), Some("8080"));
//!
//! let entries = parse_with_descriptions(source).unwrap();
//! assert_eq!(entries.get("PORT").and_then(|e| e.description.as_deref()), Some("Listen port"));
//!
//! assert_eq!(to_string(&entries), "# Listen port\nPORT=\"8080\"\nHOST=\"0.0.0.0\"");
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dotenv::from_str;
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
//! struct Config {
//!     port: u16,
//!     allowed_hosts: Vec<String>,
//! }
//!
//! let config: Config = from_str("PORT=8080\nALLOWED_HOSTS=a.test,b.test").unwrap();
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.allowed_hosts, vec!["a.test", "b.test"]);
//! ```
//!
//! ## Architecture
//!
//! - [`grammar`]: rule tables, including the dotenv grammar
//! - [`extract`]: applies a rule at an offset, producing tokens
//! - [`lexer`]: covers the source with top-level tokens
//! - [`de`]: folds tokens into a document and bridges to Serde
//! - [`ser`]: renders a document back to text
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API; malformed input yields [`Error::Syntax`]
//! - The shared grammar is immutable and safe to use from many threads
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse and serialize
//! - **`descriptions.rs`** - comments as documentation
//! - **`typed_config.rs`** - loading a struct with Serde
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::EnvMap;
pub use options::ParseOptions;
pub use ser::Serializer;
pub use value::{Document, Entry, EntryValue};

use serde::de::DeserializeOwned;
use std::io;

/// Parses dotenv text into a map of plain string values.
///
/// Comments are skipped. When a key occurs more than once, the last value
/// wins.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::parse;
///
/// let map = parse("A=1\nA=2\nB='x'").unwrap();
/// assert_eq!(map.get("A").map(String::as_str), Some("2"));
/// assert_eq!(map.get("B").map(String::as_str), Some("x"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input does not conform to the format.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<EnvMap<String>> {
    de::parse_map(input)
}

/// Parses dotenv text, keeping the comment lines above each key as its
/// description.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::{parse_with_descriptions, Entry};
///
/// let map = parse_with_descriptions("# line one\n# line two\nA=x").unwrap();
/// assert_eq!(
///     map.get("A"),
///     Some(&Entry::new("x").with_description("line one\nline two"))
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input does not conform to the format.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_descriptions(input: &str) -> Result<EnvMap<Entry>> {
    de::parse_map(input)
}

/// Parses dotenv text with the given options.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input does not conform to the format.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Document> {
    if options.extract_descriptions {
        parse_with_descriptions(input).map(Document::Entries)
    } else {
        parse(input).map(Document::Values)
    }
}

/// Serializes a map to dotenv text.
///
/// Descriptions become `# ` comment lines above their key. Every value is
/// quoted, so the output parses back to the same map.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::{parse, to_string};
///
/// let map = parse("A=plain\nB='multi\nline'").unwrap();
/// let text = to_string(&map);
/// assert_eq!(text, "A=\"plain\"\nB='multi\nline'");
/// assert_eq!(parse(&text).unwrap(), map);
/// ```
#[must_use]
pub fn to_string<V: EntryValue>(map: &EnvMap<V>) -> String {
    let mut serializer = Serializer::new();
    serializer.write_map(map);
    serializer.into_inner()
}

/// Serializes a [`Document`] of either shape to dotenv text.
#[must_use]
pub fn serialize(document: &Document) -> String {
    match document {
        Document::Values(map) => to_string(map),
        Document::Entries(map) => to_string(map),
    }
}

/// Serializes a map to a writer as dotenv text.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, V>(mut writer: W, map: &EnvMap<V>) -> Result<()>
where
    W: io::Write,
    V: EntryValue,
{
    writer
        .write_all(to_string(map).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from dotenv text.
///
/// The document is presented to `T` as a map from key to string value.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::from_str;
/// use std::collections::HashMap;
///
/// let map: HashMap<String, String> = from_str("A=1\nB=2").unwrap();
/// assert_eq!(map.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed input, or [`Error::Custom`] if a
/// value cannot be converted to the requested type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s)?)
}

/// Deserializes an instance of type `T` from bytes of dotenv text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of dotenv text.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::{from_reader, EnvMap};
/// use std::io::Cursor;
///
/// let map: EnvMap = from_reader(Cursor::new(b"KEY=value")).unwrap();
/// assert_eq!(map.get("KEY").map(String::as_str), Some("value"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        #[serde(rename = "X")]
        x: i32,
        #[serde(rename = "Y")]
        y: i32,
    }

    #[test]
    fn test_parse_options_select_shape() {
        let source = "# doc\nA=1";
        let plain = parse_with_options(source, ParseOptions::new()).unwrap();
        assert_eq!(plain, Document::Values(parse(source).unwrap()));

        let described = parse_with_options(source, ParseOptions::with_comments()).unwrap();
        assert_eq!(described.get_description("A"), Some("doc"));
        assert_eq!(serialize(&described), "# doc\nA=\"1\"");
        assert_eq!(serialize(&plain), "A=\"1\"");
    }

    #[test]
    fn test_from_str_struct() {
        let point: Point = from_str("X=1\nY=-2").unwrap();
        assert_eq!(point, Point { x: 1, y: -2 });
    }

    #[test]
    fn test_from_str_reports_syntax_errors() {
        let err = from_str::<Point>("X=1\nY 2").unwrap_err();
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<EnvMap>(&[b'A', b'=', 0xff]).unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_envmap_deserializes_from_text() {
        let map: EnvMap = from_str("B=2\nA=1").unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["B", "A"]);
    }

    #[test]
    fn test_to_writer() {
        let map = parse("A=1").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &map).unwrap();
        assert_eq!(buffer, b"A=\"1\"");
    }
}
