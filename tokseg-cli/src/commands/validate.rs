//! Validate command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to check
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match CliConfig::from_file(&self.config).and_then(|config| config.segmenter()) {
            Ok(segmenter) => {
                let splitter = segmenter.splitter().config();
                println!("✓ Configuration is valid!");
                println!("  Tokenizer options: {}", segmenter.options());
                println!("  Newline policy: {}", splitter.newline_is_sentence_break);
                if !splitter.xml_break_elements.is_empty() {
                    println!("  XML breaks: {}", splitter.xml_break_elements.join(", "));
                }
                if let Some(region) = &splitter.region_element {
                    println!("  Region element: {region}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(e.context("Validation failed"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_validate_valid_config() {
        let file = config_file(
            r#"
[tokenizer]
options = "invertible"

[splitter]
xml_break_elements = ["p"]
region_element = "text"
"#,
        );
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_bad_regex() {
        let file = config_file("[splitter]\nboundary_token_regex = \"(\"\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_bad_options() {
        let file = config_file("[tokenizer]\noptions = \"quotes=sideways\"\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
        };
        let error = args.execute().unwrap_err();
        assert!(error.to_string().contains("Validation failed"));
    }
}
