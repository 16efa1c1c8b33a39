//! Text in, sentences out
//!
//! [`Segmenter`] ties resolved tokenizer options to a compiled sentence
//! splitter. It is immutable and can be shared across threads; every call
//! creates its own lexer.

use std::io::{BufRead, BufReader, Read};

use crate::error::Result;
use crate::input::Input;
use crate::options::TokenizerOptions;
use crate::splitter::{
    NewlineIsSentenceBreak, Segmentation, Sentence, SentenceSplitter, SentenceStream,
    SplitterConfig,
};
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// Tokenizer and sentence splitter configured together
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: TokenizerOptions,
    splitter: SentenceSplitter,
}

impl Segmenter {
    /// Create a segmenter
    ///
    /// Newline tokens are switched on whenever the newline policy needs them.
    pub fn new(mut options: TokenizerOptions, config: SplitterConfig) -> Result<Self> {
        if config.newline_is_sentence_break != NewlineIsSentenceBreak::Never && !config.one_sentence
        {
            options.tokenize_nls = true;
        }
        let splitter = SentenceSplitter::new(config)?;
        tracing::debug!(options = %options, "segmenter ready");
        Ok(Self { options, splitter })
    }

    /// Start a builder
    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::new()
    }

    /// Resolved tokenizer options
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// The compiled splitter
    pub fn splitter(&self) -> &SentenceSplitter {
        &self.splitter
    }

    /// Tokens of `text`
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Tokenizer::new(text, &self.options).tokenize()
    }

    /// Tokenize and split `text`
    pub fn segment(&self, text: &str) -> Result<Document> {
        Ok(self.document(self.tokenize(text)?))
    }

    /// Tokenize and split everything readable from `reader`
    pub fn segment_reader(&self, reader: impl Read) -> Result<Document> {
        let tokens = Tokenizer::from_reader(BufReader::new(reader), &self.options).tokenize()?;
        Ok(self.document(tokens))
    }

    /// Tokenize and split an [`Input`]
    pub fn segment_input(&self, input: Input) -> Result<Document> {
        let tokens = Tokenizer::from_reader(input.into_reader()?, &self.options).tokenize()?;
        Ok(self.document(tokens))
    }

    /// Lazily yield the sentences of `reader`
    pub fn sentences<'s, R>(&'s self, reader: R) -> SentenceStream<'s, Tokenizer<'s>>
    where
        R: BufRead + 's,
    {
        SentenceStream::new(Tokenizer::from_reader(reader, &self.options), &self.splitter)
    }

    /// Lazily yield the sentences of `text`
    pub fn sentences_in<'s>(&'s self, text: &'s str) -> SentenceStream<'s, Tokenizer<'s>> {
        SentenceStream::new(Tokenizer::new(text, &self.options), &self.splitter)
    }

    fn document(&self, tokens: Vec<Token>) -> Document {
        let segmentation = self.splitter.split(&tokens);
        tracing::debug!(
            tokens = tokens.len(),
            sentences = segmentation.len(),
            "segmented document"
        );
        Document {
            tokens,
            segmentation,
        }
    }
}

/// Builder for [`Segmenter`]
#[derive(Debug, Default)]
pub struct SegmenterBuilder {
    options: Option<TokenizerOptions>,
    options_spec: Option<String>,
    config: SplitterConfig,
}

impl SegmenterBuilder {
    /// Create a builder with default options and splitter settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use already resolved tokenizer options
    pub fn options(mut self, options: TokenizerOptions) -> Self {
        self.options = Some(options);
        self.options_spec = None;
        self
    }

    /// Parse tokenizer options from an options string at build time
    pub fn options_str(mut self, spec: impl Into<String>) -> Self {
        self.options_spec = Some(spec.into());
        self.options = None;
        self
    }

    /// Replace the splitter configuration
    pub fn splitter(mut self, config: SplitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the newline policy
    pub fn newline_is_sentence_break(mut self, policy: NewlineIsSentenceBreak) -> Self {
        self.config.newline_is_sentence_break = policy;
        self
    }

    /// Set XML elements whose tags force sentence breaks
    pub fn xml_break_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.xml_break_elements = elements.into_iter().map(Into::into).collect();
        self
    }

    /// Keep the whole input as one sentence
    pub fn one_sentence(mut self, one: bool) -> Self {
        self.config.one_sentence = one;
        self
    }

    /// Build the segmenter
    pub fn build(self) -> Result<Segmenter> {
        let options = match (self.options, self.options_spec) {
            (Some(options), _) => options,
            (None, Some(spec)) => TokenizerOptions::parse(&spec)?,
            (None, None) => TokenizerOptions::default(),
        };
        Segmenter::new(options, self.config)
    }
}

/// Tokens of one input with their sentence structure
#[derive(Debug, Clone)]
pub struct Document {
    tokens: Vec<Token>,
    segmentation: Segmentation,
}

impl Document {
    /// All tokens, including discarded ones
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The split by index
    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.segmentation.len()
    }

    /// True when there are no sentences
    pub fn is_empty(&self) -> bool {
        self.segmentation.is_empty()
    }

    /// Sentence views in order
    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_, Token>> + '_ {
        self.segmentation.sentences(&self.tokens)
    }

    /// Tokens that belong to no sentence
    pub fn discarded(&self) -> impl Iterator<Item = &Token> + '_ {
        self.segmentation
            .discarded()
            .iter()
            .filter_map(|&i| self.tokens.get(i))
    }

    /// Owned sentences, dropping discarded tokens
    pub fn into_sentences(self) -> Vec<Vec<Token>> {
        let mut slots: Vec<Option<Token>> = self.tokens.into_iter().map(Some).collect();
        self.segmentation
            .sentence_indices()
            .iter()
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
                    .collect()
            })
            .collect()
    }
}
