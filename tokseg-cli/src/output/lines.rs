//! Line-preserving output formatter

use std::io::Write;

use anyhow::Result;
use tokseg_core::Token;

use super::OutputFormatter;

/// Space-separated tokens with a line break wherever the input had one
///
/// Needs newline tokens in the stream, so the tokenizer must run with
/// `tokenizeNLs`.
pub struct LineFormatter<W: Write> {
    writer: W,
    begin_line: bool,
}

impl<W: Write> LineFormatter<W> {
    /// Create a new line formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            begin_line: true,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for LineFormatter<W> {
    fn format_token(&mut self, token: &Token) -> Result<()> {
        if token.is_newline {
            writeln!(self.writer)?;
            self.begin_line = true;
            return Ok(());
        }
        if !self.begin_line {
            self.writer.write_all(b" ")?;
        }
        self.writer.write_all(token.text.as_bytes())?;
        self.begin_line = false;
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &[Token]) -> Result<()> {
        for token in sentence {
            self.format_token(token)?;
        }
        if !self.begin_line {
            writeln!(self.writer)?;
            self.begin_line = true;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.begin_line {
            writeln!(self.writer)?;
            self.begin_line = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}
