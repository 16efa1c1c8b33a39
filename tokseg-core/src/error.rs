//! Error types for tokenization and sentence splitting
//!
//! Only genuine configuration and input failures are errors. Untokenizable
//! characters and odd markup are handled inside the lexer and splitter.

use thiserror::Error;

/// Error type for tokseg operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid option key, value or splitter setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The offending regular expression
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A malformed multi-token boundary pattern
    #[error("Invalid token sequence pattern: {0}")]
    SequencePattern(String),

    /// The character source failed to read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source is not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

/// Result type for tokseg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Compile a regex that must match a whole token
pub(crate) fn compile_full(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
