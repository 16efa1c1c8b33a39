//! Character sources for the lexer
//!
//! The lexer pulls characters into a sliding buffer on demand. In-memory
//! text is handed over in one piece; readers are decoded one line at a time
//! and consumed input is dropped, so memory stays bounded for streams.

use std::io::{BufRead, ErrorKind};

use crate::error::{Error, Result};

/// Anything that can feed characters to a lexer
pub trait CharSource {
    /// Append more characters to `buf`
    ///
    /// Returns `Ok(false)` once the source is exhausted.
    fn fill(&mut self, buf: &mut Vec<char>) -> Result<bool>;
}

/// Source over an in-memory string
#[derive(Debug)]
pub struct StrSource<'a> {
    text: Option<&'a str>,
}

impl<'a> StrSource<'a> {
    /// Wrap a string slice
    pub fn new(text: &'a str) -> Self {
        Self { text: Some(text) }
    }
}

impl CharSource for StrSource<'_> {
    fn fill(&mut self, buf: &mut Vec<char>) -> Result<bool> {
        match self.text.take() {
            Some(text) if !text.is_empty() => {
                buf.extend(text.chars());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Source over a buffered reader of UTF-8 text
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    line: String,
    done: bool,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            done: false,
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn fill(&mut self, buf: &mut Vec<char>) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        self.line.clear();
        let read = self.reader.read_line(&mut self.line).map_err(|e| {
            self.done = true;
            if e.kind() == ErrorKind::InvalidData {
                Error::Encoding(format!("input is not valid UTF-8: {e}"))
            } else {
                Error::Io(e)
            }
        })?;
        if read == 0 {
            self.done = true;
            return Ok(false);
        }
        buf.extend(self.line.chars());
        Ok(true)
    }
}

/// Sliding character buffer with absolute offsets
pub(crate) struct SourceBuffer<'a> {
    source: Box<dyn CharSource + 'a>,
    chars: Vec<char>,
    /// Absolute char offset of `chars[0]`
    base: usize,
    /// Index of the current position in `chars`
    pos: usize,
    exhausted: bool,
    prev: Option<char>,
}

/// Consumed prefix length that triggers compaction
const COMPACT_THRESHOLD: usize = 8 * 1024;

impl<'a> SourceBuffer<'a> {
    pub(crate) fn new(source: Box<dyn CharSource + 'a>) -> Self {
        Self {
            source,
            chars: Vec::new(),
            base: 0,
            pos: 0,
            exhausted: false,
            prev: None,
        }
    }

    /// Make sure at least `n` characters past the position are buffered,
    /// unless the source runs out first
    pub(crate) fn ensure(&mut self, n: usize) -> Result<()> {
        while !self.exhausted && self.chars.len() < self.pos + n {
            if !self.source.fill(&mut self.chars)? {
                self.exhausted = true;
            }
        }
        Ok(())
    }

    /// Character `i` positions ahead, filling as needed
    pub(crate) fn peek(&mut self, i: usize) -> Result<Option<char>> {
        self.ensure(i + 1)?;
        Ok(self.chars.get(self.pos + i).copied())
    }

    /// Buffered characters from the current position
    pub(crate) fn window(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    /// Whether the buffered window reaches the true end of input
    pub(crate) fn is_complete(&self) -> bool {
        self.exhausted
    }

    /// Absolute char offset of the current position
    pub(crate) fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Character before the current position
    pub(crate) fn prev(&self) -> Option<char> {
        self.prev
    }

    /// Consume `n` characters, appending them to `out`
    pub(crate) fn advance_into(&mut self, n: usize, out: &mut String) {
        let end = (self.pos + n).min(self.chars.len());
        out.extend(&self.chars[self.pos..end]);
        if end > self.pos {
            self.prev = Some(self.chars[end - 1]);
        }
        self.pos = end;
        if self.pos >= COMPACT_THRESHOLD {
            self.chars.drain(..self.pos);
            self.base += self.pos;
            self.pos = 0;
        }
    }
}
