//! tokseg CLI library
//!
//! Command implementations for the `tokseg` binary: tokenizing files or
//! stdin in the PTB style, splitting them into sentences, and turning
//! tokenized text back into running text.

pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
