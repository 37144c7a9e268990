//! Grammar interpretation.
//!
//! The [`Extractor`] applies a named rule of a [`Grammar`] at a byte offset of
//! the source and either produces a [`Token`] describing what was consumed,
//! or no match. It never advances past a failed match, so callers can retry
//! other rules at the same offset (ordered choice with backtracking).
//!
//! Captures of single-character rules are coalesced as they bubble up, so a
//! run such as `KeyChars` yields one `Text` capture rather than one per
//! character.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dotenv::extract::Extractor;
//! use serde_dotenv::grammar::{names, Grammar};
//!
//! let mut extractor = Extractor::new(Grammar::dotenv(), "PORT=8080");
//! let token = extractor.extract(names::KEYED_ENTRY, 0).unwrap();
//! assert_eq!(token.span, 0..9);
//! assert_eq!(token.child(names::KEY).and_then(|key| key.text()), Some("PORT"));
//! ```

use crate::grammar::{Grammar, Rule, RuleDef, RuleRef};
use std::ops::Range;
use tracing::warn;

/// One element of a token's capture list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    Text(String),
    Token(Token),
}

impl Capture {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Capture::Text(text) => Some(text),
            Capture::Token(_) => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Capture::Token(token) => Some(token),
            Capture::Text(_) => None,
        }
    }
}

/// The result of a successful rule application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Name of the rule that produced the token. For a choice this is the
    /// name of the alternative that matched.
    pub name: &'static str,
    pub captures: Vec<Capture>,
    /// Consumed byte range of the source.
    pub span: Range<usize>,
}

impl Token {
    fn leaf(name: &'static str, text: &str, start: usize) -> Self {
        Token {
            name,
            captures: vec![Capture::Text(text.to_string())],
            span: start..start + text.len(),
        }
    }

    /// The first text capture.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.captures.iter().find_map(Capture::as_text)
    }

    /// The first nested token produced by rule `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Token> {
        self.captures
            .iter()
            .filter_map(Capture::as_token)
            .find(|token| token.name == name)
    }
}

/// How far a run of sequence references got.
enum Progress {
    /// Every reference matched.
    Complete,
    /// An optional reference failed; the sequence ends early but succeeds.
    Stopped,
    /// A required reference failed.
    Failed,
}

/// Applies grammar rules to a source string.
pub struct Extractor<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
    farthest: usize,
}

impl<'g, 's> Extractor<'g, 's> {
    #[must_use]
    pub fn new(grammar: &'g Grammar, source: &'s str) -> Self {
        Extractor {
            grammar,
            source,
            farthest: 0,
        }
    }

    #[must_use]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The largest offset at which a literal or character class failed to
    /// match so far.
    #[must_use]
    pub fn farthest_failure(&self) -> usize {
        self.farthest
    }

    /// Forgets failures recorded so far, e.g. at the start of a new attempt.
    pub fn reset_farthest(&mut self) {
        self.farthest = 0;
    }

    /// Applies rule `name` at byte offset `cursor`.
    ///
    /// On success the token's `span.end` is the offset just past the consumed
    /// input. Unknown rule names never match.
    pub fn extract(&mut self, name: &str, cursor: usize) -> Option<Token> {
        let grammar = self.grammar;
        let Some(def) = grammar.rule(name) else {
            warn!(rule = name, "reference to undefined grammar rule");
            return None;
        };

        match def.rule {
            Rule::Literal(literal) => self.literal(def.name, literal, cursor),
            Rule::Class(predicate) => self.class(def.name, predicate, cursor),
            Rule::Choice(alternatives) => alternatives
                .iter()
                .find_map(|alternative| self.extract(alternative, cursor)),
            Rule::Sequence(refs) => self.sequence(def, refs, cursor),
        }
    }

    fn fail(&mut self, cursor: usize) {
        self.farthest = self.farthest.max(cursor);
    }

    fn literal(&mut self, name: &'static str, literal: &str, cursor: usize) -> Option<Token> {
        let rest = self.source.get(cursor..).unwrap_or_default();
        if rest.starts_with(literal) {
            Some(Token::leaf(name, literal, cursor))
        } else {
            self.fail(cursor);
            None
        }
    }

    fn class(
        &mut self,
        name: &'static str,
        predicate: fn(char) -> bool,
        cursor: usize,
    ) -> Option<Token> {
        let rest = self.source.get(cursor..).unwrap_or_default();
        match rest.chars().next() {
            Some(ch) if predicate(ch) => Some(Token::leaf(name, &rest[..ch.len_utf8()], cursor)),
            _ => {
                self.fail(cursor);
                None
            }
        }
    }

    /// Runs a sequence rule.
    ///
    /// A trailing flattened reference to the rule itself (`X := a b X?`) is
    /// unrolled into a loop: each round runs the body again at the new
    /// offset, and a failed round is rolled back when the self-reference is
    /// optional. This yields the same captures as the recursive reading
    /// without growing the stack per repetition. Rules with a transform are
    /// always evaluated recursively, since the transform applies per level.
    fn sequence(&mut self, def: &RuleDef, refs: &[RuleRef], cursor: usize) -> Option<Token> {
        let repeat = match refs.split_last() {
            Some((last, _)) if last.rule == def.name && last.flatten && def.transform.is_none() => {
                Some(*last)
            }
            _ => None,
        };
        let body = if repeat.is_some() { &refs[..refs.len() - 1] } else { refs };

        let mut captures = Vec::new();
        let mut pos = cursor;
        let mut first_round = true;
        loop {
            let (mark, round_start) = (captures.len(), pos);
            match self.run(body, &mut captures, &mut pos) {
                Progress::Failed if first_round => return None,
                Progress::Failed => match repeat {
                    Some(tail) if tail.optional => {
                        captures.truncate(mark);
                        pos = round_start;
                        break;
                    }
                    _ => return None,
                },
                Progress::Stopped => break,
                Progress::Complete => {
                    // Without a self-reference, or when a round consumed
                    // nothing, there is no further round to run.
                    if repeat.is_none() || pos == round_start {
                        break;
                    }
                }
            }
            first_round = false;
        }

        let mut captures = coalesce(captures);
        if let Some(transform) = def.transform {
            captures = transform(captures);
        }
        Some(Token {
            name: def.name,
            captures,
            span: cursor..pos,
        })
    }

    fn run(
        &mut self,
        refs: &[RuleRef],
        captures: &mut Vec<Capture>,
        pos: &mut usize,
    ) -> Progress {
        for reference in refs {
            match self.extract(reference.rule, *pos) {
                Some(token) => {
                    *pos = token.span.end;
                    if reference.flatten {
                        captures.extend(token.captures);
                    } else {
                        captures.push(Capture::Token(token));
                    }
                }
                None if reference.optional => return Progress::Stopped,
                None => return Progress::Failed,
            }
        }
        Progress::Complete
    }
}

/// Merges adjacent text captures.
fn coalesce(captures: Vec<Capture>) -> Vec<Capture> {
    let mut merged: Vec<Capture> = Vec::with_capacity(captures.len());
    for capture in captures {
        if let Capture::Text(next) = &capture {
            if let Some(Capture::Text(previous)) = merged.last_mut() {
                previous.push_str(next);
                continue;
            }
        }
        merged.push(capture);
    }
    merged
}
