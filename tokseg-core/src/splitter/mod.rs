//! Sentence boundary detection
//!
//! [`SentenceSplitter`] groups a token sequence into sentences with a
//! per-token state machine. Boundary tokens (`.`, `?!`) end a sentence;
//! closing brackets and quotes that follow a boundary attach to the sentence
//! they close; newline markers, XML break elements and region tags are
//! discarded and may force a boundary. [`SentenceStream`] runs the same
//! machine lazily over a token iterator.

mod config;
mod machine;
mod pattern;
mod sentence;
mod stream;

use std::collections::HashSet;

use regex::Regex;

use crate::error::{compile_full, Result};
use crate::token::Token;

pub use config::{
    NewlineIsSentenceBreak, SplitterConfig, SplitterConfigBuilder,
    DEFAULT_BOUNDARY_FOLLOWERS_REGEX, DEFAULT_BOUNDARY_REGEX,
};
pub use pattern::TokenSequencePattern;
pub use sentence::{Segmentation, Sentence};
pub use stream::SentenceStream;

use machine::Machine;

/// Anything the splitter can read a word and annotations from
pub trait SplitToken {
    /// Text matched against the boundary patterns
    fn word(&self) -> &str;

    /// Forced sentence end set by an upstream annotator
    fn is_forced_end(&self) -> bool {
        false
    }

    /// Start of a span that only a forced end can close
    fn is_forced_until_end(&self) -> bool {
        false
    }

    /// Non-final part of a multi-token expression
    fn is_multi_token_part(&self) -> bool {
        false
    }
}

impl SplitToken for Token {
    fn word(&self) -> &str {
        &self.text
    }

    fn is_forced_end(&self) -> bool {
        self.forced_sentence_end
    }

    fn is_forced_until_end(&self) -> bool {
        self.forced_until_end
    }

    fn is_multi_token_part(&self) -> bool {
        self.multi_token_part
    }
}

impl SplitToken for String {
    fn word(&self) -> &str {
        self
    }
}

impl SplitToken for str {
    fn word(&self) -> &str {
        self
    }
}

impl<T: SplitToken + ?Sized> SplitToken for &T {
    fn word(&self) -> &str {
        (**self).word()
    }

    fn is_forced_end(&self) -> bool {
        (**self).is_forced_end()
    }

    fn is_forced_until_end(&self) -> bool {
        (**self).is_forced_until_end()
    }

    fn is_multi_token_part(&self) -> bool {
        (**self).is_multi_token_part()
    }
}

#[derive(Debug, Clone)]
struct Region {
    begin: Regex,
    end: Regex,
}

/// Compiled sentence splitter
///
/// Immutable once built; one splitter can serve any number of inputs, from
/// any number of threads.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    config: SplitterConfig,
    boundary: Regex,
    followers: Regex,
    discard_boundaries: HashSet<String>,
    xml_break: Option<Regex>,
    region: Option<Region>,
    multi_token: Option<TokenSequencePattern>,
    discard_patterns: Vec<Regex>,
}

impl SentenceSplitter {
    /// Compile a splitter, rejecting invalid patterns
    pub fn new(config: SplitterConfig) -> Result<Self> {
        let boundary = compile_full(&config.boundary_token_regex)?;
        let followers = compile_full(&config.boundary_followers_regex)?;
        let mut splitter = Self::from_parts(config, boundary, followers);

        let config = &splitter.config;
        if !config.xml_break_elements.is_empty() {
            let names = config.xml_break_elements.join("|");
            splitter.xml_break = Some(compile_full(&format!(
                r"(?i)<\s*(?:/\s*)?(?:{names})(?:\s+[^>]+?|\s*(?:/\s*)?)>"
            ))?);
        }
        if let Some(name) = &config.region_element {
            splitter.region = Some(Region {
                begin: compile_full(&format!(r"(?i)<\s*(?:{name})(?:\s+[^>]+?)?>"))?,
                end: compile_full(&format!(r"(?i)<\s*/\s*(?:{name})\s*>"))?,
            });
        }
        if let Some(pattern) = &config.multi_token_pattern {
            splitter.multi_token = Some(TokenSequencePattern::compile(pattern)?);
        }
        splitter.discard_patterns = config
            .token_patterns_to_discard
            .iter()
            .map(String::as_str)
            .map(compile_full)
            .collect::<Result<_>>()?;

        tracing::debug!(config = ?splitter.config, "sentence splitter ready");
        Ok(splitter)
    }

    fn from_parts(config: SplitterConfig, boundary: Regex, followers: Regex) -> Self {
        let discard_boundaries = config.boundaries_to_discard.iter().cloned().collect();
        Self {
            config,
            boundary,
            followers,
            discard_boundaries,
            xml_break: None,
            region: None,
            multi_token: None,
            discard_patterns: Vec::new(),
        }
    }

    /// Configuration this splitter was built from
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Whether a multi-token pattern is configured
    ///
    /// Such a pattern needs the whole token sequence before splitting starts.
    pub fn needs_whole_input(&self) -> bool {
        self.multi_token.is_some()
    }

    /// Split `tokens` into sentences
    ///
    /// The result refers to tokens by index; every index lands in exactly one
    /// sentence or in [`Segmentation::discarded`].
    pub fn split<T: SplitToken>(&self, tokens: &[T]) -> Segmentation {
        if self.config.one_sentence {
            let all: Vec<usize> = (0..tokens.len()).collect();
            let sentences = if all.is_empty() { Vec::new() } else { vec![all] };
            return Segmentation::new(sentences, Vec::new());
        }

        let ends = self.multi_token_ends(tokens);
        let mut machine = Machine::new(self);
        for (index, token) in tokens.iter().enumerate() {
            let multi = ends.binary_search(&index).is_ok();
            machine.push(index, token, multi);
        }
        machine.finish();
        Segmentation::new(machine.output.into(), machine.discarded)
    }

    /// Split into owned sentences of cloned tokens, dropping discarded ones
    pub fn split_cloned<T: SplitToken + Clone>(&self, tokens: &[T]) -> Vec<Vec<T>> {
        self.split(tokens)
            .sentences(tokens)
            .map(|sentence| sentence.to_vec())
            .collect()
    }

    pub(crate) fn multi_token_ends<T: SplitToken>(&self, tokens: &[T]) -> Vec<usize> {
        self.multi_token
            .as_ref()
            .map(|pattern| pattern.find_ends(tokens))
            .unwrap_or_default()
    }

    fn is_discardable_boundary(&self, word: &str) -> bool {
        self.discard_boundaries.contains(word)
    }

    fn is_discarded_pattern(&self, word: &str) -> bool {
        self.discard_patterns.iter().any(|re| re.is_match(word))
    }

    fn is_xml_break(&self, word: &str) -> bool {
        self.xml_break.as_ref().is_some_and(|re| re.is_match(word))
    }
}
