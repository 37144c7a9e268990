//! Declarative grammar tables.
//!
//! A [`Grammar`] is a table of named [`RuleDef`]s. Each rule is one of four
//! shapes ([`Rule`]): an exact literal, a single-character class, a sequence
//! of references to other rules, or an ordered choice between rules. Rules
//! refer to each other by name, so a rule may reference itself to express
//! repetition:
//!
//! ```text
//! KeyChars := KeyChar KeyChars?
//! ```
//!
//! The table is pure data. [`crate::extract::Extractor`] interprets it
//! against source text.
//!
//! ## The dotenv grammar
//!
//! [`Grammar::dotenv`] returns the grammar for `KEY=value` files. Its
//! top-level rules are [`TOP_LEVEL`]: whitespace runs, `#` comments and keyed
//! entries. Values take one of the [`names::STRING`] alternatives, tried in
//! this order:
//!
//! | Alternative | Example | Payload |
//! |-------------|---------|---------|
//! | `Unquoted` | `KEY=hello world` | the rest of the line |
//! | `Empty` | `KEY=""` | empty |
//! | `Quoted` | `KEY="a\nb"` | escapes decoded |
//! | `SingleQuoted` | `KEY='a\nb'` | literal, may span lines |
//! | `EmptySingle` | `KEY=''` | empty |
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::grammar::{names, Grammar, Rule};
//!
//! let grammar = Grammar::dotenv();
//! let equals = grammar.rule(names::EQUALS).unwrap();
//! assert!(matches!(equals.rule, Rule::Literal("=")));
//! ```

use crate::extract::Capture;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Post-extraction rewrite of a rule's coalesced captures.
pub type Transform = fn(Vec<Capture>) -> Vec<Capture>;

/// The shape of a grammar rule.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    /// Matches the exact text.
    Literal(&'static str),
    /// Matches one character accepted by the predicate.
    Class(fn(char) -> bool),
    /// Matches each reference in order.
    Sequence(&'static [RuleRef]),
    /// Matches the first named rule that succeeds (ordered choice).
    Choice(&'static [&'static str]),
}

/// A reference from a [`Rule::Sequence`] to another rule.
///
/// An `optional` reference that fails ends the sequence early without
/// failing it. A `flatten` reference splices the referenced token's captures
/// into the parent instead of nesting the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleRef {
    pub rule: &'static str,
    pub optional: bool,
    pub flatten: bool,
}

impl RuleRef {
    /// A required, nested reference to `rule`.
    #[must_use]
    pub const fn new(rule: &'static str) -> Self {
        RuleRef {
            rule,
            optional: false,
            flatten: false,
        }
    }

    /// Marks the reference as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the reference as flattened into its parent.
    #[must_use]
    pub const fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }
}

/// A named rule with an optional capture transform.
#[derive(Clone, Copy, Debug)]
pub struct RuleDef {
    pub name: &'static str,
    pub rule: Rule,
    pub transform: Option<Transform>,
}

impl RuleDef {
    #[must_use]
    pub const fn new(name: &'static str, rule: Rule) -> Self {
        RuleDef {
            name,
            rule,
            transform: None,
        }
    }

    /// Attaches a transform applied to the rule's captures after coalescing.
    #[must_use]
    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// A table of rules, looked up by name.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::grammar::{Grammar, Rule, RuleDef};
///
/// let grammar = Grammar::new([
///     RuleDef::new("Digit", Rule::Class(|c| c.is_ascii_digit())),
///     RuleDef::new("Dot", Rule::Literal(".")),
/// ]);
/// assert_eq!(grammar.len(), 2);
/// assert!(grammar.rule("Digit").is_some());
/// assert!(grammar.rule("Missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    rules: IndexMap<&'static str, RuleDef>,
}

impl Grammar {
    /// Builds a grammar from rule definitions. A later definition replaces an
    /// earlier one with the same name.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = RuleDef>,
    {
        Grammar {
            rules: rules.into_iter().map(|def| (def.name, def)).collect(),
        }
    }

    /// The shared dotenv grammar.
    #[must_use]
    pub fn dotenv() -> &'static Grammar {
        &DOTENV
    }

    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.rules.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }
}

/// Rule names of the dotenv grammar.
pub mod names {
    pub const WHITESPACE: &str = "Whitespace";
    pub const WHITESPACE_CHAR: &str = "WhitespaceChar";
    pub const COMMENT: &str = "Comment";
    pub const HASH: &str = "Hash";
    pub const COMMENT_CHARS: &str = "CommentChars";
    pub const COMMENT_CHAR: &str = "CommentChar";
    pub const KEYED_ENTRY: &str = "KeyedEntry";
    pub const KEY: &str = "Key";
    pub const KEY_START: &str = "KeyStart";
    pub const KEY_CHARS: &str = "KeyChars";
    pub const KEY_CHAR: &str = "KeyChar";
    pub const EQUALS: &str = "Equals";
    pub const STRING: &str = "String";
    pub const UNQUOTED: &str = "Unquoted";
    pub const UNQUOTED_CHAR: &str = "UnquotedChar";
    pub const EMPTY: &str = "Empty";
    pub const QUOTED: &str = "Quoted";
    pub const DOUBLE_QUOTE: &str = "DoubleQuote";
    pub const QUOTED_CHARS: &str = "QuotedChars";
    pub const QUOTED_CHAR: &str = "QuotedChar";
    pub const ESCAPED_CHAR: &str = "EscapedChar";
    pub const BACKSLASH: &str = "Backslash";
    pub const ANY_CHAR: &str = "AnyChar";
    pub const PLAIN_QUOTED_CHAR: &str = "PlainQuotedChar";
    pub const SINGLE_QUOTED: &str = "SingleQuoted";
    pub const APOSTROPHE: &str = "Apostrophe";
    pub const SINGLE_QUOTED_CHARS: &str = "SingleQuotedChars";
    pub const SINGLE_QUOTED_CHAR: &str = "SingleQuotedChar";
    pub const EMPTY_SINGLE: &str = "EmptySingle";
}

use names::*;

/// Top-level rules of the dotenv grammar, in the order the lexer tries them.
pub const TOP_LEVEL: &[&str] = &[WHITESPACE, COMMENT, KEYED_ENTRY];

fn any_char(_: char) -> bool {
    true
}

fn is_comment_char(ch: char) -> bool {
    ch != '\n'
}

fn is_key_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_unquoted_char(ch: char) -> bool {
    !matches!(ch, '\n' | '\r' | '"' | '\'')
}

fn is_plain_quoted_char(ch: char) -> bool {
    !matches!(ch, '"' | '\\')
}

fn is_single_quoted_char(ch: char) -> bool {
    ch != '\''
}

/// Decodes a backslash escape pair into the character it stands for.
///
/// Pairs outside the escape table are returned unchanged, backslash
/// included.
///
/// # Examples
///
/// ```rust
/// use serde_dotenv::extract::Capture;
/// use serde_dotenv::grammar::unescape;
///
/// let decoded = unescape(vec![Capture::Text("\\n".to_string())]);
/// assert_eq!(decoded, vec![Capture::Text("\n".to_string())]);
///
/// let kept = unescape(vec![Capture::Text("\\x".to_string())]);
/// assert_eq!(kept, vec![Capture::Text("\\x".to_string())]);
/// ```
pub fn unescape(captures: Vec<Capture>) -> Vec<Capture> {
    captures
        .into_iter()
        .map(|capture| match capture {
            Capture::Text(pair) => match decode_escape(&pair) {
                Some(ch) => Capture::Text(ch.to_string()),
                None => Capture::Text(pair),
            },
            token => token,
        })
        .collect()
}

fn decode_escape(pair: &str) -> Option<char> {
    match pair {
        "\\\\" => Some('\\'),
        "\\n" => Some('\n'),
        "\\t" => Some('\t'),
        "\\b" => Some('\u{0008}'),
        "\\f" => Some('\u{000C}'),
        "\\r" => Some('\r'),
        "\\\"" => Some('"'),
        _ => None,
    }
}

macro_rules! rule_ref {
    ($rule:expr) => {
        RuleRef { rule: $rule, optional: false, flatten: false }
    };
    ($rule:expr, flat) => {
        RuleRef { rule: $rule, optional: false, flatten: true }
    };
    ($rule:expr, opt) => {
        RuleRef { rule: $rule, optional: true, flatten: false }
    };
    ($rule:expr, opt flat) => {
        RuleRef { rule: $rule, optional: true, flatten: true }
    };
}

macro_rules! seq {
    ($([$($r:tt)*]),* $(,)?) => {
        Rule::Sequence(&[$(rule_ref!($($r)*)),*])
    };
}

const DOTENV_RULES: &[RuleDef] = &[
    RuleDef::new(WHITESPACE, seq![[WHITESPACE_CHAR, flat], [WHITESPACE, opt flat]]),
    RuleDef::new(WHITESPACE_CHAR, Rule::Class(char::is_whitespace)),
    RuleDef::new(COMMENT, seq![[HASH], [COMMENT_CHARS, opt]]),
    RuleDef::new(HASH, Rule::Literal("#")),
    RuleDef::new(COMMENT_CHARS, seq![[COMMENT_CHAR, flat], [COMMENT_CHARS, opt flat]]),
    RuleDef::new(COMMENT_CHAR, Rule::Class(is_comment_char)),
    RuleDef::new(KEYED_ENTRY, seq![[KEY], [EQUALS], [STRING, opt]]),
    RuleDef::new(KEY, seq![[KEY_START, flat], [KEY_CHARS, opt flat]]),
    RuleDef::new(KEY_START, Rule::Class(is_key_start)),
    RuleDef::new(KEY_CHARS, seq![[KEY_CHAR, flat], [KEY_CHARS, opt flat]]),
    RuleDef::new(KEY_CHAR, Rule::Class(is_key_char)),
    RuleDef::new(EQUALS, Rule::Literal("=")),
    // Order is significant: Unquoted must be tried before the quoted forms.
    RuleDef::new(STRING, Rule::Choice(&[UNQUOTED, EMPTY, QUOTED, SINGLE_QUOTED, EMPTY_SINGLE])),
    RuleDef::new(UNQUOTED, seq![[UNQUOTED_CHAR, flat], [UNQUOTED, opt flat]]),
    RuleDef::new(UNQUOTED_CHAR, Rule::Class(is_unquoted_char)),
    RuleDef::new(EMPTY, Rule::Literal("\"\"")),
    RuleDef::new(QUOTED, seq![[DOUBLE_QUOTE], [QUOTED_CHARS], [DOUBLE_QUOTE]]),
    RuleDef::new(DOUBLE_QUOTE, Rule::Literal("\"")),
    RuleDef::new(QUOTED_CHARS, seq![[QUOTED_CHAR, flat], [QUOTED_CHARS, opt flat]]),
    RuleDef::new(QUOTED_CHAR, Rule::Choice(&[ESCAPED_CHAR, PLAIN_QUOTED_CHAR])),
    RuleDef::new(ESCAPED_CHAR, seq![[BACKSLASH, flat], [ANY_CHAR, flat]]).with_transform(unescape),
    RuleDef::new(BACKSLASH, Rule::Literal("\\")),
    RuleDef::new(ANY_CHAR, Rule::Class(any_char)),
    RuleDef::new(PLAIN_QUOTED_CHAR, Rule::Class(is_plain_quoted_char)),
    RuleDef::new(SINGLE_QUOTED, seq![[APOSTROPHE], [SINGLE_QUOTED_CHARS], [APOSTROPHE]]),
    RuleDef::new(APOSTROPHE, Rule::Literal("'")),
    RuleDef::new(
        SINGLE_QUOTED_CHARS,
        seq![[SINGLE_QUOTED_CHAR, flat], [SINGLE_QUOTED_CHARS, opt flat]],
    ),
    RuleDef::new(SINGLE_QUOTED_CHAR, Rule::Class(is_single_quoted_char)),
    RuleDef::new(EMPTY_SINGLE, Rule::Literal("''")),
];

static DOTENV: Lazy<Grammar> = Lazy::new(|| Grammar::new(DOTENV_RULES.iter().copied()));
