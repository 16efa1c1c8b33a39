//! Token filters applied between the tokenizer and the output

use anyhow::{Context, Result};
use regex::Regex;
use tokseg_core::Token;

/// Passes only tokens inside matching XML elements
///
/// Built from an element name or name regex. A start tag such as
/// `<p id="1">` switches output on, the matching end tag switches it off.
/// The tags themselves are never passed on.
#[derive(Debug, Clone)]
pub struct ParseInside {
    tag: Regex,
    inside: bool,
}

impl ParseInside {
    /// Compile the tag matcher for `elements`
    pub fn new(elements: &str) -> Result<Self> {
        let pattern = format!(r"^<(/?)(?:{elements})(?:\s[^>]*?)?>$");
        let tag = Regex::new(&pattern)
            .with_context(|| format!("Invalid --parse-inside element pattern: {elements}"))?;
        Ok(Self { tag, inside: false })
    }

    /// Whether `token` should be kept, updating the inside state on tags
    pub fn keep(&mut self, token: &Token) -> bool {
        match self.tag.captures(&token.text) {
            Some(caps) => {
                self.inside = caps.get(1).map_or(true, |slash| slash.as_str().is_empty());
                false
            }
            None => self.inside,
        }
    }
}

/// Per-token rewriting requested on the command line
#[derive(Debug, Clone, Default)]
pub struct TokenFilter {
    parse_inside: Option<ParseInside>,
    lower_case: bool,
}

impl TokenFilter {
    /// Create a filter
    pub fn new(parse_inside: Option<ParseInside>, lower_case: bool) -> Self {
        Self {
            parse_inside,
            lower_case,
        }
    }

    /// Apply the filter to one token, returning it if it survives
    pub fn apply(&mut self, mut token: Token) -> Option<Token> {
        if let Some(parse_inside) = self.parse_inside.as_mut() {
            if !parse_inside.keep(&token) {
                return None;
            }
        }
        if self.lower_case {
            token.text = token.text.to_lowercase();
        }
        Some(token)
    }
}
