//! JSON output formatter

use std::io::Write;

use anyhow::Result;
use tokseg_core::Token;

use super::OutputFormatter;

/// JSON Lines: one token record, or one array of token records per sentence
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_token(&mut self, token: &Token) -> Result<()> {
        serde_json::to_writer(&mut self.writer, token)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn format_sentence(&mut self, sentence: &[Token]) -> Result<()> {
        serde_json::to_writer(&mut self.writer, sentence)?;
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
    fn test_token_records() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_token(&Token::new("Hi")).unwrap();
        formatter.format_token(&Token::new(".")).unwrap();
        let output = String::from_utf8(formatter.into_inner()).unwrap();

        let records: Vec<Token> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records, vec![Token::new("Hi"), Token::new(".")]);
    }

    #[test]
    fn test_sentence_arrays() {
        let mut formatter = JsonFormatter::new(Vec::new());
        let sentence = vec![Token::new("Hi"), Token::new("!")];
        formatter.format_sentence(&sentence).unwrap();
        let output = String::from_utf8(formatter.into_inner()).unwrap();

        assert_eq!(output.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value[1]["text"], "!");
    }
}
