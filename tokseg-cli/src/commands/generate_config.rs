//! Generate config command implementation

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Tokenizer options to put in the template
    #[arg(long, value_name = "OPTIONS")]
    pub options: Option<String>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = self.generate_template()?;

        match &self.output {
            Some(path) => {
                fs::write(path, &template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("Configuration written to {}", path.display());
                eprintln!("Check it with: tokseg validate -c {}", path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(template.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Template text: a short header followed by the full default configuration
    pub fn generate_template(&self) -> Result<String> {
        let mut config = CliConfig::default();
        if let Some(options) = &self.options {
            config.push_options(options);
            // Fail here rather than when the file is first used
            config.tokenizer_options()?;
        }

        let body = config.to_toml()?;
        Ok(format!(
            "# tokseg configuration\n\
             #\n\
             # [tokenizer] options uses the comma-separated options grammar,\n\
             # e.g. \"invertible,quotes=unicode,americanize\".\n\
             # [splitter] newline_is_sentence_break is one of never, always, two_consecutive.\n\
             # Command-line flags override values set here.\n\n{body}"
        ))
    }
}
