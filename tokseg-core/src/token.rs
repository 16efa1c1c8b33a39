//! Token and lexeme types
//!
//! A [`Lexeme`] is what the lexer cuts out of the source; a [`Token`] is the
//! normalized form handed to the sentence splitter and downstream consumers.

use serde::{Deserialize, Serialize};

/// Text used for newline tokens when `tokenizeNLs` is set
pub const NEWLINE_TOKEN: &str = "*NL*";

/// Lexical category assigned by the rule that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// SGML/XML-like tag such as `<p>` or `</doc>`
    Sgml,
    /// Character entity such as `&amp;`
    Entity,
    /// Bracket or parenthesis, raw or already escaped
    Bracket,
    /// Clitic or split-off piece of a contraction (`n't`, `'s`, `gon`)
    Contraction,
    /// Word with a protected trailing period, or an acronym
    Abbreviation,
    /// Dash or hyphen sequence
    Dash,
    /// Quotation mark
    Quote,
    /// Currency symbol
    Currency,
    /// Numeric literal, including fractions
    Number,
    /// Ellipsis
    Ellipsis,
    /// Alphanumeric word, URL or e-mail address
    Word,
    /// Other punctuation, including sentence-final runs like `?!`
    Punctuation,
    /// Symbol characters not covered by other categories
    Symbol,
    /// Newline marker
    Newline,
    /// Character kept under an untokenizable `*Keep` policy
    Untokenizable,
}

/// A raw lexeme before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// Lexical form produced by the matching rule
    pub text: String,
    /// Verbatim source substring; empty for zero-width placeholders
    pub original: String,
    /// Category from the matching rule
    pub kind: TokenKind,
    /// Char offset of the first character
    pub begin: usize,
    /// Char offset one past the last character
    pub end: usize,
    /// Whitespace (and deleted characters) before the lexeme
    pub before: String,
    /// Whitespace (and deleted characters) after the lexeme
    pub after: String,
    /// Character immediately before the lexeme in the source
    pub prev_char: Option<char>,
    /// Character immediately after the lexeme in the source
    pub next_char: Option<char>,
}

impl Lexeme {
    /// Whether this lexeme stands in for text that is not in the source
    pub fn is_placeholder(&self) -> bool {
        self.original.is_empty()
    }
}

/// A normalized token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Final normalized form
    pub text: String,
    /// Category from the lexer
    pub kind: TokenKind,
    /// Verbatim source text, present when invertibility was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Char offset of the first character
    pub begin: usize,
    /// Char offset one past the last character
    pub end: usize,
    /// Whitespace before the token, present when invertibility was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whitespace after the token, present when invertibility was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// True for newline marker tokens
    #[serde(default)]
    pub is_newline: bool,
    /// Set by an upstream annotator to force a sentence end after this token
    #[serde(default)]
    pub forced_sentence_end: bool,
    /// Set by an upstream annotator: no boundary until a forced end arrives
    #[serde(default)]
    pub forced_until_end: bool,
    /// Set by an upstream annotator for non-final tokens of a multi-token expression
    #[serde(default)]
    pub multi_token_part: bool,
}

impl Token {
    /// Create a plain word token without offsets
    ///
    /// Useful for feeding the sentence splitter from another tokenizer.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let is_newline = text == NEWLINE_TOKEN;
        Self {
            text,
            kind: if is_newline {
                TokenKind::Newline
            } else {
                TokenKind::Word
            },
            original_text: None,
            begin: 0,
            end: 0,
            before: None,
            after: None,
            is_newline,
            forced_sentence_end: false,
            forced_until_end: false,
            multi_token_part: false,
        }
    }

    /// Mark this token as a forced sentence end
    pub fn with_forced_end(mut self) -> Self {
        self.forced_sentence_end = true;
        self
    }

    /// Mark this token as opening a "wait for forced end" span
    pub fn with_forced_until_end(mut self) -> Self {
        self.forced_until_end = true;
        self
    }

    /// Mark this token as inside a multi-token expression
    pub fn with_multi_token_part(mut self) -> Self {
        self.multi_token_part = true;
        self
    }

    /// Length of the source span in chars
    pub fn span_len(&self) -> usize {
        self.end - self.begin
    }
}

/// Rebuild the source text from invertible tokens
///
/// Concatenates `before + original_text` for every token followed by the
/// last token's `after`. Returns `None` if any token lacks invertibility data.
pub fn reconstruct(tokens: &[Token]) -> Option<String> {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.before.as_deref()?);
        out.push_str(token.original_text.as_deref()?);
    }
    if let Some(last) = tokens.last() {
        out.push_str(last.after.as_deref()?);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_defaults() {
        let token = Token::new("Hello");
        assert_eq!(token.text, "Hello");
        assert_eq!(token.kind, TokenKind::Word);
        assert!(!token.is_newline);
        assert!(!token.forced_sentence_end);
        assert!(token.original_text.is_none());
    }

    #[test]
    fn test_newline_token_detection() {
        let token = Token::new(NEWLINE_TOKEN);
        assert!(token.is_newline);
        assert_eq!(token.kind, TokenKind::Newline);
    }

    #[test]
    fn test_builder_flags() {
        let token = Token::new("x").with_forced_end().with_multi_token_part();
        assert!(token.forced_sentence_end);
        assert!(token.multi_token_part);
        assert!(!token.forced_until_end);
    }

    #[test]
    fn test_reconstruct_requires_invertible_tokens() {
        assert_eq!(reconstruct(&[Token::new("a")]), None);
        assert_eq!(reconstruct(&[]), Some(String::new()));

        let mut a = Token::new("a");
        a.original_text = Some("a".into());
        a.before = Some(" ".into());
        a.after = Some("\n".into());
        assert_eq!(reconstruct(&[a]), Some(" a\n".to_string()));
    }

    #[test]
    fn test_serde_skips_missing_invertible_fields() {
        let json = serde_json::to_string(&Token::new("dog")).unwrap();
        assert!(json.contains("\"text\":\"dog\""));
        assert!(json.contains("\"kind\":\"word\""));
        assert!(!json.contains("original_text"));
    }
}
