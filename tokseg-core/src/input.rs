//! Input sources for the segmenter

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::PathBuf;

use crate::error::Result;

/// Where text comes from
///
/// Every variant is read incrementally through the lexer's reader source,
/// so files and streams are never loaded whole.
pub enum Input {
    /// Owned text
    Text(String),
    /// File to open and read as UTF-8
    File(PathBuf),
    /// UTF-8 bytes
    Bytes(Vec<u8>),
    /// Any byte stream, such as stdin
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<reader>").finish(),
        }
    }
}

impl Input {
    /// Input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Input from a file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Input from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Open the source as a buffered reader
    pub fn into_reader(self) -> Result<Box<dyn BufRead + Send>> {
        Ok(match self {
            Input::Text(text) => Box::new(Cursor::new(text.into_bytes())),
            Input::File(path) => Box::new(BufReader::new(File::open(path)?)),
            Input::Bytes(bytes) => Box::new(Cursor::new(bytes)),
            Input::Reader(reader) => Box::new(BufReader::new(reader)),
        })
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    fn read_all(input: Input) -> String {
        let mut text = String::new();
        input.into_reader().unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_text_and_bytes() {
        assert_eq!(read_all(Input::from("hello")), "hello");
        assert_eq!(read_all(Input::from_bytes(b"bytes".to_vec())), "bytes");
        assert_eq!(read_all(Input::from_reader(Cursor::new("stream"))), "stream");
    }

    #[test]
    fn test_file_input() {
        let path = std::env::temp_dir().join(format!("tokseg-input-{}.txt", std::process::id()));
        File::create(&path).unwrap().write_all(b"from disk").unwrap();
        assert_eq!(read_all(Input::from_file(&path)), "from disk");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let result = Input::from_file("/definitely/not/here.txt").into_reader();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let debug = format!("{:?}", Input::from_bytes(vec![0; 4]));
        assert_eq!(debug, "Bytes(\"<4 bytes>\")");
    }
}
