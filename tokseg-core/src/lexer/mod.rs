//! Pull-based lexer
//!
//! The lexer walks a character source once, asking the [rule table](rules)
//! for the next match at each position. Whitespace and deleted untokenizable
//! characters between matches are recorded as the `after` of one lexeme and
//! the `before` of the next, so the source can always be rebuilt exactly.

pub(crate) mod rules;
pub mod source;

use std::io::BufRead;

use crate::error::Result;
use crate::options::{TokenizerOptions, WarnFrequency};
use crate::token::{Lexeme, TokenKind};

use rules::Window;
pub use source::{CharSource, ReaderSource, StrSource};
use source::SourceBuffer;

/// Characters buffered past the current position before matching
const LOOKAHEAD: usize = 1024;

/// Lazy, forward-only lexeme stream over one character source
///
/// Offers single-item lookahead through [`peek`](Lexer::peek). Not
/// restartable; create a new lexer for each input.
pub struct Lexer<'a> {
    buffer: SourceBuffer<'a>,
    options: &'a TokenizerOptions,
    peeked: Option<Lexeme>,
    pending: Option<Lexeme>,
    before: String,
    started: bool,
    finished: bool,
    warned: bool,
}

impl<'a> Lexer<'a> {
    /// Lex an in-memory string
    pub fn new(text: &'a str, options: &'a TokenizerOptions) -> Self {
        Self::with_source(Box::new(StrSource::new(text)), options)
    }

    /// Lex UTF-8 text from a buffered reader
    pub fn from_reader<R: BufRead + 'a>(reader: R, options: &'a TokenizerOptions) -> Self {
        Self::with_source(Box::new(ReaderSource::new(reader)), options)
    }

    /// Lex from any character source
    pub fn with_source(source: Box<dyn CharSource + 'a>, options: &'a TokenizerOptions) -> Self {
        Self {
            buffer: SourceBuffer::new(source),
            options,
            peeked: None,
            pending: None,
            before: String::new(),
            started: false,
            finished: false,
            warned: false,
        }
    }

    /// Options this lexer was built with
    pub fn options(&self) -> &'a TokenizerOptions {
        self.options
    }

    /// Whether another lexeme is available
    pub fn has_next(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_some())
    }

    /// Look at the next lexeme without consuming it
    pub fn peek(&mut self) -> Result<Option<&Lexeme>> {
        if self.peeked.is_none() {
            self.peeked = self.advance()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consume the next lexeme
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        match self.peeked.take() {
            Some(lexeme) => Ok(Some(lexeme)),
            None => self.advance(),
        }
    }

    fn advance(&mut self) -> Result<Option<Lexeme>> {
        if let Some(placeholder) = self.pending.take() {
            return Ok(Some(placeholder));
        }
        if self.finished {
            return Ok(None);
        }
        if !self.started {
            self.started = true;
            let mut leading = String::new();
            self.skip_ignorable(&mut leading)?;
            self.before = leading;
        }

        self.buffer.ensure(LOOKAHEAD)?;
        let Some(&first) = self.buffer.window().first() else {
            self.finished = true;
            return Ok(None);
        };
        let prev_char = self.buffer.prev();
        let begin = self.buffer.offset();
        let window = Window::new(
            self.buffer.window(),
            prev_char,
            self.buffer.is_complete(),
            self.options,
        );
        let (rule, matched) = rules::first_match(&window);
        tracing::trace!(rule, offset = begin, len = matched.len, "lexer match");

        if matched.kind == TokenKind::Untokenizable {
            self.report_untokenizable(first, begin, true);
        }

        let mut original = String::new();
        self.buffer.advance_into(matched.len, &mut original);
        let end = self.buffer.offset();
        let next_char = self.buffer.peek(0)?;

        let mut after = String::new();
        self.skip_ignorable(&mut after)?;
        let before = std::mem::replace(&mut self.before, after.clone());

        let mut lexeme = Lexeme {
            text: matched
                .text
                .map_or_else(|| original.clone(), str::to_string),
            original,
            kind: matched.kind,
            begin,
            end,
            before,
            after,
            prev_char,
            next_char,
        };

        if matched.placeholder_period {
            self.pending = Some(Lexeme {
                text: ".".to_string(),
                original: String::new(),
                kind: TokenKind::Punctuation,
                begin: end,
                end,
                before: String::new(),
                after: std::mem::take(&mut lexeme.after),
                prev_char: lexeme.original.chars().last(),
                next_char,
            });
        }
        Ok(Some(lexeme))
    }

    /// Consume whitespace and deleted characters into `out`
    fn skip_ignorable(&mut self, out: &mut String) -> Result<()> {
        while let Some(c) = self.buffer.peek(0)? {
            if rules::is_newline(c) && self.options.tokenize_nls {
                break;
            }
            if rules::is_space(c) {
                self.buffer.advance_into(1, out);
            } else if rules::is_untokenizable(c) && !self.options.untokenizable.keep {
                self.report_untokenizable(c, self.buffer.offset(), false);
                self.buffer.advance_into(1, out);
            } else {
                break;
            }
        }
        Ok(())
    }

    fn report_untokenizable(&mut self, c: char, offset: usize, kept: bool) {
        let log = match self.options.untokenizable.warn {
            WarnFrequency::None => false,
            WarnFrequency::First => !self.warned,
            WarnFrequency::All => true,
        };
        self.warned = true;
        if log {
            let action = if kept { "kept" } else { "deleted" };
            tracing::warn!(
                character = %format!("U+{:04X}", c as u32),
                offset,
                action,
                "untokenizable character"
            );
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_lexeme() {
            Ok(lexeme) => lexeme.map(Ok),
            Err(e) => {
                self.finished = true;
                self.pending = None;
                Some(Err(e))
            }
        }
    }
}
