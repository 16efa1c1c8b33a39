//! Plain text output formatter

use std::io::Write;

use anyhow::Result;
use tokseg_core::Token;

use super::OutputFormatter;

/// One token per line, or one space-joined sentence per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_token(&mut self, token: &Token) -> Result<()> {
        writeln!(self.writer, "{}", token.text)?;
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &[Token]) -> Result<()> {
        let mut first = true;
        for token in sentence {
            if !first {
                self.writer.write_all(b" ")?;
            }
            self.writer.write_all(token.text.as_bytes())?;
            first = false;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_one_per_line() {
        let mut formatter = TextFormatter::new(Vec::new());
        for word in ["Hello", ",", "world"] {
            formatter.format_token(&Token::new(word)).unwrap();
        }
        formatter.finish().unwrap();
        assert_eq!(
            String::from_utf8(formatter.into_inner()).unwrap(),
            "Hello\n,\nworld\n"
        );
    }

    #[test]
    fn test_sentence_per_line() {
        let mut formatter = TextFormatter::new(Vec::new());
        let sentence: Vec<Token> = ["Hi", "there", "."].into_iter().map(Token::new).collect();
        formatter.format_sentence(&sentence).unwrap();
        formatter.format_sentence(&[]).unwrap();
        assert_eq!(
            String::from_utf8(formatter.into_inner()).unwrap(),
            "Hi there .\n\n"
        );
    }
}
