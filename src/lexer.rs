//! Top-level tokenization.
//!
//! The [`Lexer`] covers the whole source with tokens of the grammar's
//! top-level rules. Each round tries every top-level rule once, in order,
//! each at the offset left by the previous one. A round that consumes
//! nothing means no rule can continue and raises [`Error::Syntax`].
//!
//! The error points at the farthest offset any rule reached before failing
//! in the stuck round, which is where the input actually diverges from the
//! grammar. For `A#B` the key `A` matches and the missing `=` is reported at
//! offset 1. A leading byte order mark is skipped.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::grammar::names;
//! use serde_dotenv::lexer::Lexer;
//!
//! let tokens = Lexer::dotenv("# greeting\nHELLO=world\n").tokenize().unwrap();
//! let kinds: Vec<&str> = tokens.iter().map(|token| token.name).collect();
//! assert_eq!(
//!     kinds,
//!     vec![names::COMMENT, names::WHITESPACE, names::KEYED_ENTRY, names::WHITESPACE]
//! );
//! ```

use crate::extract::{Extractor, Token};
use crate::grammar::{Grammar, TOP_LEVEL};
use crate::{Error, Result};
use tracing::debug;

const BOM: char = '\u{FEFF}';

/// Splits source text into top-level tokens.
pub struct Lexer<'g, 's> {
    extractor: Extractor<'g, 's>,
    rules: &'g [&'static str],
}

impl<'s> Lexer<'static, 's> {
    /// A lexer for the dotenv grammar.
    #[must_use]
    pub fn dotenv(source: &'s str) -> Self {
        Lexer::new(Grammar::dotenv(), source, TOP_LEVEL)
    }
}

impl<'g, 's> Lexer<'g, 's> {
    /// A lexer trying `rules` of `grammar`, in order, at every round.
    #[must_use]
    pub fn new(grammar: &'g Grammar, source: &'s str, rules: &'g [&'static str]) -> Self {
        Lexer {
            extractor: Extractor::new(grammar, source),
            rules,
        }
    }

    /// Tokenizes the entire source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when a round makes no progress.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let source = self.extractor.source();
        let mut tokens = Vec::new();
        let mut pos = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };

        while pos < source.len() {
            let round_start = pos;
            self.extractor.reset_farthest();
            for rule in self.rules {
                if let Some(token) = self.extractor.extract(rule, pos) {
                    pos = token.span.end;
                    tokens.push(token);
                }
            }

            if pos == round_start {
                let offset = self.extractor.farthest_failure().max(round_start);
                debug!(offset, stuck_at = round_start, "no top-level rule matched");
                return Err(Error::syntax(source, offset));
            }
        }

        debug!(tokens = tokens.len(), bytes = source.len(), "tokenized input");
        Ok(tokens)
    }
}
