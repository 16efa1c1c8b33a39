//! Error handling for the CLI application

use std::fmt;

/// Errors raised by the driver itself rather than the core library
#[derive(Debug)]
pub enum CliError {
    /// No file matched the given inputs
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// Unreadable or inconsistent configuration
    ConfigError(String),
    /// Encoding label not known to `encoding_rs`
    UnknownEncoding(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(what) => write!(f, "File not found: {what}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::UnknownEncoding(label) => write!(f, "Unknown encoding: {label}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
