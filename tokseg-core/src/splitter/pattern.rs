//! Multi-token boundary patterns
//!
//! A pattern is a whitespace-separated sequence of elements. Each element is
//! a regular expression between slashes that must match a whole token,
//! optionally followed by `?`, `*` or `+`:
//!
//! ```text
//! /[.!?]/ /''/?  /-RRB-/*
//! ```
//!
//! Inside an element `\/` stands for a literal slash. Quantifiers are greedy
//! and the matcher backtracks, so `/a/* /a/` matches `a a a`. Backtracking is
//! memoized, so each element is tried at each position at most once.

use std::collections::HashMap;

use regex::Regex;

use super::SplitToken;
use crate::error::{compile_full, Error, Result};

/// Match results keyed by (element, token position)
///
/// The result of matching the tail of a pattern from a position does not
/// depend on where the match started, so one memo serves a whole scan.
type Memo = HashMap<(usize, usize), Option<usize>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    One,
    Optional,
    Star,
    Plus,
}

#[derive(Debug, Clone)]
struct Element {
    regex: Regex,
    quantifier: Quantifier,
}

impl Element {
    fn matches<T: SplitToken>(&self, token: &T) -> bool {
        self.regex.is_match(token.word())
    }
}

/// Compiled token sequence pattern
#[derive(Debug, Clone)]
pub struct TokenSequencePattern {
    source: String,
    elements: Vec<Element>,
}

impl TokenSequencePattern {
    /// Parse and compile a pattern
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut elements = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if c != '/' {
                return Err(Error::SequencePattern(format!(
                    "expected '/' to start an element in '{pattern}', found '{c}'"
                )));
            }
            chars.next();

            let mut body = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' if chars.peek() == Some(&'/') => {
                        chars.next();
                        body.push('/');
                    }
                    '\\' => {
                        body.push('\\');
                        if let Some(escaped) = chars.next() {
                            body.push(escaped);
                        }
                    }
                    '/' => {
                        closed = true;
                        break;
                    }
                    other => body.push(other),
                }
            }
            if !closed {
                return Err(Error::SequencePattern(format!(
                    "unterminated element in '{pattern}'"
                )));
            }
            if body.is_empty() {
                return Err(Error::SequencePattern(format!(
                    "empty element in '{pattern}'"
                )));
            }

            let quantifier = match chars.peek() {
                Some('?') => Quantifier::Optional,
                Some('*') => Quantifier::Star,
                Some('+') => Quantifier::Plus,
                _ => Quantifier::One,
            };
            if quantifier != Quantifier::One {
                chars.next();
            }
            if let Some(&next) = chars.peek() {
                if !next.is_whitespace() {
                    return Err(Error::SequencePattern(format!(
                        "unexpected '{next}' after element in '{pattern}'"
                    )));
                }
            }

            elements.push(Element {
                regex: compile_full(&body)?,
                quantifier,
            });
        }

        if elements.is_empty() {
            return Err(Error::SequencePattern("pattern has no elements".to_string()));
        }
        Ok(Self {
            source: pattern.to_string(),
            elements,
        })
    }

    /// The pattern text as given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// End (exclusive) of the longest match starting at `start`
    pub fn match_at<T: SplitToken>(&self, tokens: &[T], start: usize) -> Option<usize> {
        self.match_from(tokens, 0, start, &mut Memo::default())
    }

    fn match_from<T: SplitToken>(
        &self,
        tokens: &[T],
        element: usize,
        pos: usize,
        memo: &mut Memo,
    ) -> Option<usize> {
        let Some(current) = self.elements.get(element) else {
            return Some(pos);
        };
        if let Some(&known) = memo.get(&(element, pos)) {
            return known;
        }
        let here = |i: usize| tokens.get(i).is_some_and(|t| current.matches(t));

        let end = match current.quantifier {
            Quantifier::One => {
                if here(pos) {
                    self.match_from(tokens, element + 1, pos + 1, memo)
                } else {
                    None
                }
            }
            Quantifier::Optional => {
                let taken = if here(pos) {
                    self.match_from(tokens, element + 1, pos + 1, memo)
                } else {
                    None
                };
                taken.or_else(|| self.match_from(tokens, element + 1, pos, memo))
            }
            Quantifier::Star | Quantifier::Plus => {
                let min = usize::from(current.quantifier == Quantifier::Plus);
                let mut run = 0;
                while here(pos + run) {
                    run += 1;
                }
                (min..=run)
                    .rev()
                    .find_map(|taken| self.match_from(tokens, element + 1, pos + taken, memo))
            }
        };
        memo.insert((element, pos), end);
        end
    }

    /// Index of the last token of every match, scanning left to right
    ///
    /// Matches do not overlap; empty matches are ignored.
    pub fn find_ends<T: SplitToken>(&self, tokens: &[T]) -> Vec<usize> {
        let mut ends = Vec::new();
        let mut memo = Memo::default();
        let mut pos = 0;
        while pos < tokens.len() {
            match self.match_from(tokens, 0, pos, &mut memo) {
                Some(end) if end > pos => {
                    ends.push(end - 1);
                    pos = end;
                }
                _ => pos += 1,
            }
        }
        ends
    }
}
