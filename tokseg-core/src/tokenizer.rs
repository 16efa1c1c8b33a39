//! Lexer and normalizer composed into a token stream

use std::io::BufRead;

use crate::error::Result;
use crate::lexer::Lexer;
use crate::normalizer::normalize;
use crate::options::TokenizerOptions;
use crate::token::Token;

/// Pull-based stream of normalized tokens
pub struct Tokenizer<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize an in-memory string
    pub fn new(text: &'a str, options: &'a TokenizerOptions) -> Self {
        Self::from_lexer(Lexer::new(text, options))
    }

    /// Tokenize UTF-8 text from a buffered reader
    pub fn from_reader<R: BufRead + 'a>(reader: R, options: &'a TokenizerOptions) -> Self {
        Self::from_lexer(Lexer::from_reader(reader, options))
    }

    /// Normalize the lexemes of an existing lexer
    pub fn from_lexer(lexer: Lexer<'a>) -> Self {
        Self { lexer }
    }

    /// Whether another token is available
    pub fn has_next(&mut self) -> Result<bool> {
        self.lexer.has_next()
    }

    /// Normalized form of the next token, without consuming it
    pub fn peek(&mut self) -> Result<Option<Token>> {
        let options = self.lexer.options();
        Ok(self.lexer.peek()?.map(|lexeme| normalize(lexeme, options)))
    }

    /// Consume the rest of the input
    pub fn tokenize(self) -> Result<Vec<Token>> {
        self.collect()
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let options = self.lexer.options();
        self.lexer
            .next()
            .map(|lexeme| lexeme.map(|lexeme| normalize(&lexeme, options)))
    }
}

/// Tokenize `text` in one call
pub fn tokenize(text: &str, options: &TokenizerOptions) -> Result<Vec<Token>> {
    Tokenizer::new(text, options).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::reconstruct;

    fn texts(text: &str, options: &str) -> Vec<String> {
        let options = TokenizerOptions::parse(options).unwrap();
        tokenize(text, &options)
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_default_normalization() {
        assert_eq!(
            texts("\"Hi\" (she said) -- ok...", ""),
            vec!["``", "Hi", "''", "-LRB-", "she", "said", "-RRB-", "--", "ok", "..."]
        );
    }

    #[test]
    fn test_escaping_disabled() {
        assert_eq!(
            texts("\"Hi\" (she said)", "ptb3Escaping=false"),
            vec!["\"", "Hi", "\"", "(", "she", "said", ")"]
        );
    }

    #[test]
    fn test_peek_is_normalized_and_not_consumed() {
        let options = TokenizerOptions::default();
        let mut tokenizer = Tokenizer::new("(a)", &options);
        assert_eq!(tokenizer.peek().unwrap().map(|t| t.text), Some("-LRB-".to_string()));
        assert!(tokenizer.has_next().unwrap());
        assert_eq!(tokenizer.next().unwrap().unwrap().text, "-LRB-");
        assert_eq!(tokenizer.next().unwrap().unwrap().text, "a");
    }

    #[test]
    fn test_invertible_round_trip() {
        let options = TokenizerOptions::parse("invertible").unwrap();
        let text = "  He works for Acme Corp. \"Really?\" he asked.\n";
        let tokens = tokenize(text, &options).unwrap();
        assert_eq!(reconstruct(&tokens).as_deref(), Some(text));
    }

    #[test]
    fn test_reader_input() {
        let options = TokenizerOptions::default();
        let tokens = Tokenizer::from_reader(std::io::Cursor::new("one two."), &options)
            .tokenize()
            .unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, ".");
    }
}
