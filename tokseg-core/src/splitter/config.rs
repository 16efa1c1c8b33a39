//! Sentence splitter configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::token::NEWLINE_TOKEN;

/// Tokens that end a sentence: a period or any run of `!` and `?`
pub const DEFAULT_BOUNDARY_REGEX: &str = r"\.|[!?]+";

/// Closing brackets and quotes that attach to the sentence they follow
pub const DEFAULT_BOUNDARY_FOLLOWERS_REGEX: &str =
    r#"\)|\]|\}|"|'|''|\x{2019}|\x{201D}|-RRB-|-RSB-|-RCB-"#;

/// Whether newline tokens end sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NewlineIsSentenceBreak {
    /// Newlines are dropped without ending anything
    Never,
    /// Every newline ends the current sentence
    Always,
    /// Two newlines in a row (a blank line) end the current sentence
    #[default]
    TwoConsecutive,
}

impl NewlineIsSentenceBreak {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::TwoConsecutive => "two_consecutive",
        }
    }
}

impl FromStr for NewlineIsSentenceBreak {
    type Err = Error;

    /// Accepts `always`, `never`, and anything mentioning `two`
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other if other.contains("two") => Ok(Self::TwoConsecutive),
            _ => Err(Error::config(format!(
                "invalid newline policy '{s}' (expected always, never or two_consecutive)"
            ))),
        }
    }
}

impl TryFrom<String> for NewlineIsSentenceBreak {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<NewlineIsSentenceBreak> for String {
    fn from(value: NewlineIsSentenceBreak) -> String {
        value.as_str().to_string()
    }
}

impl fmt::Display for NewlineIsSentenceBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the sentence splitter can be told
///
/// Regular expressions are kept as strings here and compiled by
/// [`SentenceSplitter::new`](super::SentenceSplitter::new), which reports
/// invalid ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Tokens matching this regex end a sentence and stay in it
    pub boundary_token_regex: String,
    /// Tokens matching this regex may attach to the sentence before them
    pub boundary_followers_regex: String,
    /// Tokens with exactly this text are dropped and count as newlines
    pub boundaries_to_discard: Vec<String>,
    /// Element names whose start and end tags force a break and are dropped
    pub xml_break_elements: Vec<String>,
    /// Only text inside this element is segmented
    pub region_element: Option<String>,
    /// Newline handling
    pub newline_is_sentence_break: NewlineIsSentenceBreak,
    /// Token sequence whose last token ends a sentence
    pub multi_token_pattern: Option<String>,
    /// Tokens matching one of these regexes are dropped without a break
    pub token_patterns_to_discard: Vec<String>,
    /// Emit empty sentences when a break arrives with nothing buffered
    pub allow_empty_sentences: bool,
    /// Treat the whole input as one sentence
    pub one_sentence: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            boundary_token_regex: DEFAULT_BOUNDARY_REGEX.to_string(),
            boundary_followers_regex: DEFAULT_BOUNDARY_FOLLOWERS_REGEX.to_string(),
            boundaries_to_discard: vec!["\n".to_string(), NEWLINE_TOKEN.to_string()],
            xml_break_elements: Vec::new(),
            region_element: None,
            newline_is_sentence_break: NewlineIsSentenceBreak::default(),
            multi_token_pattern: None,
            token_patterns_to_discard: Vec::new(),
            allow_empty_sentences: false,
            one_sentence: false,
        }
    }
}

impl SplitterConfig {
    /// Create a builder starting from the defaults
    pub fn builder() -> SplitterConfigBuilder {
        SplitterConfigBuilder::default()
    }

    /// Configuration that keeps the whole input together
    pub fn one_sentence() -> Self {
        Self {
            one_sentence: true,
            ..Self::default()
        }
    }
}

/// Builder for [`SplitterConfig`]
#[derive(Debug, Default)]
pub struct SplitterConfigBuilder {
    config: SplitterConfig,
}

impl SplitterConfigBuilder {
    /// Set the boundary token regex
    pub fn boundary_token_regex(mut self, regex: impl Into<String>) -> Self {
        self.config.boundary_token_regex = regex.into();
        self
    }

    /// Set the boundary follower regex
    pub fn boundary_followers_regex(mut self, regex: impl Into<String>) -> Self {
        self.config.boundary_followers_regex = regex.into();
        self
    }

    /// Replace the set of discardable boundary strings
    pub fn boundaries_to_discard<I, S>(mut self, boundaries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.boundaries_to_discard = boundaries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the XML break elements
    pub fn xml_break_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.xml_break_elements = elements.into_iter().map(Into::into).collect();
        self
    }

    /// Only segment inside this element
    pub fn region_element(mut self, element: impl Into<String>) -> Self {
        self.config.region_element = Some(element.into());
        self
    }

    /// Set the newline policy
    pub fn newline_is_sentence_break(mut self, policy: NewlineIsSentenceBreak) -> Self {
        self.config.newline_is_sentence_break = policy;
        self
    }

    /// Set the multi-token boundary pattern
    pub fn multi_token_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.multi_token_pattern = Some(pattern.into());
        self
    }

    /// Set regexes for tokens to drop silently
    pub fn token_patterns_to_discard<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.token_patterns_to_discard = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Allow empty sentences
    pub fn allow_empty_sentences(mut self, allow: bool) -> Self {
        self.config.allow_empty_sentences = allow;
        self
    }

    /// Keep the whole input as one sentence
    pub fn one_sentence(mut self, one: bool) -> Self {
        self.config.one_sentence = one;
        self
    }

    /// Finish building
    pub fn build(self) -> SplitterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_policy_parsing() {
        assert_eq!("always".parse::<NewlineIsSentenceBreak>().unwrap(), NewlineIsSentenceBreak::Always);
        assert_eq!("NEVER".parse::<NewlineIsSentenceBreak>().unwrap(), NewlineIsSentenceBreak::Never);
        assert_eq!(
            "two_consecutive".parse::<NewlineIsSentenceBreak>().unwrap(),
            NewlineIsSentenceBreak::TwoConsecutive
        );
        assert_eq!(
            "twoConsecutive".parse::<NewlineIsSentenceBreak>().unwrap(),
            NewlineIsSentenceBreak::TwoConsecutive
        );
        assert!("sometimes".parse::<NewlineIsSentenceBreak>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::default();
        assert_eq!(config.boundary_token_regex, DEFAULT_BOUNDARY_REGEX);
        assert_eq!(config.newline_is_sentence_break, NewlineIsSentenceBreak::TwoConsecutive);
        assert!(config.boundaries_to_discard.contains(&"*NL*".to_string()));
        assert!(!config.one_sentence);
        assert!(SplitterConfig::one_sentence().one_sentence);
    }

    #[test]
    fn test_builder() {
        let config = SplitterConfig::builder()
            .xml_break_elements(["p", "br"])
            .newline_is_sentence_break(NewlineIsSentenceBreak::Always)
            .allow_empty_sentences(true)
            .build();
        assert_eq!(config.xml_break_elements, vec!["p", "br"]);
        assert_eq!(config.newline_is_sentence_break, NewlineIsSentenceBreak::Always);
        assert!(config.allow_empty_sentences);
        assert_eq!(config.boundary_token_regex, DEFAULT_BOUNDARY_REGEX);
    }

    #[test]
    fn test_toml_deserialization() {
        let config: SplitterConfig = toml::from_str(
            r#"
            newline_is_sentence_break = "always"
            xml_break_elements = ["p"]
            region_element = "text"
            "#,
        )
        .unwrap();
        assert_eq!(config.newline_is_sentence_break, NewlineIsSentenceBreak::Always);
        assert_eq!(config.region_element.as_deref(), Some("text"));
        assert_eq!(config.boundary_followers_regex, DEFAULT_BOUNDARY_FOLLOWERS_REGEX);
    }
}
