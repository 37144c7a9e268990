//! Dotenv deserialization.
//!
//! Turning text into a document happens in two steps: the
//! [`Lexer`](crate::lexer::Lexer) splits the source into top-level tokens,
//! then [`assemble`] folds those tokens into an [`EnvMap`]. Comment lines
//! accumulate into a pending description that the next keyed entry takes
//! over.
//!
//! The [`Deserializer`] goes one step further and maps a parsed document onto
//! any `T: Deserialize`, such as a configuration struct.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_dotenv::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config {
//!     #[serde(rename = "HOST")]
//!     host: String,
//!     #[serde(rename = "PORT")]
//!     port: u16,
//!     #[serde(rename = "DEBUG", default)]
//!     debug: bool,
//! }
//!
//! let config: Config = from_str("HOST=localhost\nPORT=8080").unwrap();
//! assert_eq!(config, Config { host: "localhost".into(), port: 8080, debug: false });
//! ```
//!
//! ## Value conversion
//!
//! Every value is a string. When a field asks for another type the string is
//! parsed on demand: `bool`, integers, floats and `char` via `FromStr`, an
//! empty value as `None` for `Option` fields, a comma-separated list for
//! sequences, and a variant name for unit enums.

use crate::extract::{Capture, Token};
use crate::grammar::names;
use crate::lexer::Lexer;
use crate::value::EntryValue;
use crate::{EnvMap, Error, Result};
use serde::de::value::{MapDeserializer, SeqDeserializer, StringDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use tracing::trace;

/// Parses `input` into a map of `V` values.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the input does not conform to the grammar.
pub fn parse_map<V: EntryValue>(input: &str) -> Result<EnvMap<V>> {
    let tokens = Lexer::dotenv(input).tokenize()?;
    Ok(assemble(tokens))
}

/// Folds top-level tokens into a document.
///
/// Whitespace and unknown tokens are skipped. Comments extend the pending
/// description; a keyed entry takes it over and resets it.
pub fn assemble<V: EntryValue>(tokens: Vec<Token>) -> EnvMap<V> {
    tokens
        .into_iter()
        .fold(Assembly::new(), Assembly::accept)
        .map
}

struct Assembly<V> {
    map: EnvMap<V>,
    pending: Option<String>,
}

impl<V: EntryValue> Assembly<V> {
    fn new() -> Self {
        Assembly {
            map: EnvMap::new(),
            pending: None,
        }
    }

    fn accept(mut self, token: Token) -> Self {
        match token.name {
            names::COMMENT => {
                let line = token
                    .child(names::COMMENT_CHARS)
                    .and_then(Token::text)
                    .unwrap_or_default();
                self.describe(line.trim());
            }
            names::KEYED_ENTRY => self.assign(&token),
            _ => {}
        }
        self
    }

    fn describe(&mut self, line: &str) {
        let pending = self.pending.get_or_insert_with(String::new);
        if !pending.is_empty() {
            pending.push('\n');
        }
        pending.push_str(line);
    }

    fn assign(&mut self, entry: &Token) {
        let key = entry
            .child(names::KEY)
            .and_then(Token::text)
            .unwrap_or_default()
            .to_string();
        // Captures are [Key, Equals, String?].
        let value = entry
            .captures
            .get(2)
            .and_then(Capture::as_token)
            .map(decode_string)
            .unwrap_or_default();
        let description = self.pending.take().filter(|d| !d.is_empty());

        if self.map.contains_key(&key) {
            trace!(key = %key, "later assignment replaces earlier value");
        }
        self.map.insert(key, V::from_parts(value, description));
    }
}

/// Extracts the literal payload of a string token.
///
/// `token` is the alternative matched by the `String` rule.
pub fn decode_string(token: &Token) -> String {
    match token.name {
        names::UNQUOTED => token.text().unwrap_or_default().to_string(),
        names::QUOTED | names::SINGLE_QUOTED => match token.captures.as_slice() {
            [_, inner, _] => inner
                .as_token()
                .and_then(Token::text)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        },
        // Empty, EmptySingle
        _ => String::new(),
    }
}

/// Maps a parsed document onto Rust types.
///
/// The document behaves as a map from key to string value; see the module
/// documentation for how values convert.
pub struct Deserializer {
    map: EnvMap<String>,
}

impl Deserializer {
    #[must_use]
    pub fn new(map: EnvMap<String>) -> Self {
        Deserializer { map }
    }

    /// Parses `input` and wraps the resulting document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] if the input does not conform to the grammar.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Ok(Deserializer::new(parse_map(input)?))
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let entries = self
            .map
            .into_iter()
            .map(|(key, value)| (key, ValueDeserializer::new(value)));
        let mut access: MapDeserializer<'de, _, Error> = MapDeserializer::new(entries);
        let value = visitor.visit_map(&mut access)?;
        access.end()?;
        Ok(value)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}

/// Deserializes a single string value.
pub struct ValueDeserializer {
    value: String,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: String) -> Self {
        ValueDeserializer { value }
    }
}

macro_rules! deserialize_from_str {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let parsed = self.value.trim().parse::<$ty>().map_err(|e| {
                    Error::custom(format!(
                        "invalid {} value {:?}: {}",
                        stringify!($ty),
                        self.value,
                        e
                    ))
                })?;
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.value)
    }

    deserialize_from_str! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.value.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let items: Vec<ValueDeserializer> = if self.value.trim().is_empty() {
            Vec::new()
        } else {
            self.value
                .split(',')
                .map(|item| ValueDeserializer::new(item.trim().to_string()))
                .collect()
        };
        let mut access: SeqDeserializer<_, Error> = SeqDeserializer::new(items.into_iter());
        let value = visitor.visit_seq(&mut access)?;
        access.end()?;
        Ok(value)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let variant: StringDeserializer<Error> = self.value.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf unit unit_struct tuple tuple_struct
        map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for ValueDeserializer {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}
