//! Configuration file support
//!
//! The file is TOML with two tables:
//!
//! ```toml
//! [tokenizer]
//! options = "invertible,quotes=unicode"
//!
//! [splitter]
//! newline_is_sentence_break = "always"
//! xml_break_elements = ["p"]
//! ```
//!
//! Command-line flags are applied on top of whatever the file sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokseg_core::{Segmenter, SplitterConfig, TokenizerOptions};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Tokenizer settings
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Sentence splitter settings
    #[serde(default)]
    pub splitter: SplitterConfig,
}

/// Tokenizer-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct TokenizerConfig {
    /// Options string in the usual comma-separated grammar
    #[serde(default)]
    pub options: String,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Append options from the command line; later keys win
    pub fn push_options(&mut self, options: &str) {
        let options = options.trim();
        if options.is_empty() {
            return;
        }
        if self.tokenizer.options.trim().is_empty() {
            self.tokenizer.options = options.to_string();
        } else {
            self.tokenizer.options = format!("{},{}", self.tokenizer.options, options);
        }
    }

    /// Resolve the tokenizer options string
    pub fn tokenizer_options(&self) -> Result<TokenizerOptions> {
        TokenizerOptions::parse(&self.tokenizer.options)
            .with_context(|| format!("Invalid tokenizer options: {:?}", self.tokenizer.options))
    }

    /// Build a segmenter from both tables
    pub fn segmenter(&self) -> Result<Segmenter> {
        let options = self.tokenizer_options()?;
        Segmenter::new(options, self.splitter.clone()).context("Invalid splitter configuration")
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
