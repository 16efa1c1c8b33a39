//! Penn Treebank style tokenization and rule-based sentence splitting
//!
//! Text flows through three stages, each a pull-based iterator:
//!
//! - **Lexer**: an ordered rule table cuts the character stream into
//!   lexemes, longest match first, recording offsets and the whitespace
//!   around each lexeme.
//! - **Normalizer**: a pure function rewrites each lexeme into its PTB form
//!   (`-LRB-`, ``` `` ```, `--`, `...`) under the resolved options.
//! - **Sentence splitter**: a per-token state machine groups tokens into
//!   sentences, attaching closing brackets and quotes to the sentence they
//!   close and honouring newline, markup and forced-boundary signals.
//!
//! # Example
//!
//! ```rust
//! use tokseg_core::{Segmenter, SplitterConfig, TokenizerOptions};
//!
//! let segmenter = Segmenter::new(TokenizerOptions::default(), SplitterConfig::default()).unwrap();
//! let document = segmenter.segment("Mr. Smith went to Washington. He liked it.").unwrap();
//!
//! let sentences: Vec<String> = document.sentences().map(|s| s.text()).collect();
//! assert_eq!(sentences, vec!["Mr. Smith went to Washington .", "He liked it ."]);
//! ```
//!
//! Options use the familiar comma-separated grammar:
//!
//! ```rust
//! use tokseg_core::{tokenize, TokenizerOptions};
//!
//! let options: TokenizerOptions = "invertible,quotes=unicode".parse().unwrap();
//! let tokens = tokenize("\"Hi\" (there)", &options).unwrap();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["\u{201C}", "Hi", "\u{201D}", "-LRB-", "there", "-RRB-"]);
//! ```

pub mod error;
pub mod input;
pub mod lexer;
pub mod normalizer;
pub mod options;
pub mod pipeline;
pub mod splitter;
pub mod tables;
pub mod token;
pub mod tokenizer;
pub mod untokenize;

pub use error::{Error, Result};
pub use input::Input;
pub use lexer::{CharSource, Lexer, ReaderSource, StrSource};
pub use normalizer::{normalize, Americanizer};
pub use options::{
    DashStyle, EllipsisStyle, QuoteStyle, TokenizerOptions, UntokenizablePolicy, WarnFrequency,
};
pub use pipeline::{Document, Segmenter, SegmenterBuilder};
pub use splitter::{
    NewlineIsSentenceBreak, Segmentation, Sentence, SentenceSplitter, SentenceStream,
    SplitToken, SplitterConfig, SplitterConfigBuilder, TokenSequencePattern,
};
pub use token::{reconstruct, Lexeme, Token, TokenKind, NEWLINE_TOKEN};
pub use tokenizer::{tokenize, Tokenizer};
pub use untokenize::ptb_to_text;
