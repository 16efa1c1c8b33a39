//! File reading with character encoding selection

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::error::CliError;

/// Decodes files and stdin with a fixed encoding
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    encoding: &'static Encoding,
}

impl Default for FileReader {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }
}

impl FileReader {
    /// Reader for a WHATWG encoding label such as `utf-8` or `latin1`
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| CliError::UnknownEncoding(label.to_string()))?;
        Ok(Self { encoding })
    }

    /// Canonical name of the encoding
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Read and decode a file
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(self.decode(&bytes, &path.display().to_string()))
    }

    /// Read and decode everything from `reader`
    pub fn read_from(&self, mut reader: impl Read, name: &str) -> Result<String> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read {name}"))?;
        Ok(self.decode(&bytes, name))
    }

    /// Decode bytes, replacing malformed sequences
    ///
    /// A byte order mark overrides the configured encoding.
    pub fn decode(&self, bytes: &[u8], name: &str) -> String {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            log::warn!(
                "{name}: malformed {} input replaced with U+FFFD",
                used.name()
            );
        }
        text.into_owned()
    }
}
