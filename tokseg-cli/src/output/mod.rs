//! Output formatting module

use anyhow::Result;
use tokseg_core::Token;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write a single token of a plain token stream
    fn format_token(&mut self, token: &Token) -> Result<()>;

    /// Write one sentence
    fn format_sentence(&mut self, sentence: &[Token]) -> Result<()>;

    /// Finalize output and flush
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod lines;
pub mod text;

pub use json::JsonFormatter;
pub use lines::LineFormatter;
pub use text::TextFormatter;
