//! Process command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use tokseg_core::{
    ptb_to_text, NewlineIsSentenceBreak, Segmenter, SentenceStream, SplitterConfig, Tokenizer,
    TokenizerOptions,
};

use crate::config::CliConfig;
use crate::filter::{ParseInside, TokenFilter};
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, LineFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); stdin when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Tokenizer options, e.g. "invertible,quotes=unicode"
    #[arg(long, value_name = "OPTIONS")]
    pub options: Option<String>,

    /// Space-separated tokens, breaking lines where the input does
    #[arg(long, conflicts_with = "sentences")]
    pub preserve_lines: bool,

    /// Lowercase every token
    #[arg(long)]
    pub lower_case: bool,

    /// Only output tokens inside these XML elements (name or regex)
    #[arg(long, value_name = "ELEMENTS")]
    pub parse_inside: Option<String>,

    /// Print full JSON token records instead of words
    #[arg(long)]
    pub dump: bool,

    /// Turn tokenized text back into running text
    #[arg(
        long,
        conflicts_with_all = ["sentences", "preserve_lines", "dump", "lower_case", "parse_inside"]
    )]
    pub untok: bool,

    /// Input character encoding
    #[arg(long, value_name = "LABEL", default_value = "utf-8")]
    pub encoding: String,

    /// Split into sentences, one per line
    #[arg(short, long)]
    pub sentences: bool,

    #[command(flatten)]
    pub splitter: SplitterArgs,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Worker threads for multiple files (default: all cores)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Sentence splitter overrides
#[derive(Debug, Default, Args)]
pub struct SplitterArgs {
    /// When newlines end sentences: never, always or two (a blank line)
    #[arg(long, value_name = "POLICY")]
    pub newline_break: Option<NewlineIsSentenceBreak>,

    /// XML element whose tags force a sentence break (repeatable)
    #[arg(long, value_name = "ELEMENT")]
    pub xml_break: Vec<String>,

    /// Only split text inside this XML element
    #[arg(long, value_name = "ELEMENT")]
    pub region: Option<String>,

    /// Regex for tokens that end a sentence
    #[arg(long, value_name = "REGEX")]
    pub boundary_regex: Option<String>,

    /// Token sequence pattern whose last token ends a sentence
    #[arg(long, value_name = "PATTERN")]
    pub multi_token_pattern: Option<String>,

    /// Drop tokens matching this regex (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub discard_pattern: Vec<String>,

    /// Emit empty sentences for breaks with nothing before them
    #[arg(long)]
    pub allow_empty: bool,

    /// Keep each input as a single sentence
    #[arg(long)]
    pub one_sentence: bool,
}

impl SplitterArgs {
    /// Apply the overrides on top of `config`
    pub fn apply(&self, config: &mut SplitterConfig) {
        if let Some(policy) = self.newline_break {
            config.newline_is_sentence_break = policy;
        }
        if !self.xml_break.is_empty() {
            config.xml_break_elements = self.xml_break.clone();
        }
        if let Some(region) = &self.region {
            config.region_element = Some(region.clone());
        }
        if let Some(regex) = &self.boundary_regex {
            config.boundary_token_regex = regex.clone();
        }
        if let Some(pattern) = &self.multi_token_pattern {
            config.multi_token_pattern = Some(pattern.clone());
        }
        if !self.discard_pattern.is_empty() {
            config.token_patterns_to_discard = self.discard_pattern.clone();
        }
        config.allow_empty_sentences |= self.allow_empty;
        config.one_sentence |= self.one_sentence;
    }
}

/// What the command produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One token per line
    Tokens,
    /// Tokens on the lines they came from
    Lines,
    /// One sentence per line
    Sentences,
    /// Detokenized text
    Untokenize,
}

/// Output of one input
#[derive(Debug, Default)]
pub struct Processed {
    /// Rendered bytes
    pub output: Vec<u8>,
    /// Tokens read, or sentences written in sentence mode
    pub count: usize,
}

/// Resolved settings shared by every input of a run
#[derive(Debug)]
pub struct Processor {
    mode: Mode,
    dump: bool,
    options: TokenizerOptions,
    segmenter: Option<Segmenter>,
    filter: TokenFilter,
}

impl Processor {
    /// Process one decoded input
    pub fn process_text(&self, text: &str) -> Result<Processed> {
        let mut output = Vec::new();
        let count = match self.mode {
            Mode::Untokenize => untokenize(text, &mut output)?,
            Mode::Sentences => self.render(&mut output, |f| self.write_sentences(text, f))?,
            Mode::Tokens | Mode::Lines => self.render(&mut output, |f| self.write_tokens(text, f))?,
        };
        Ok(Processed { output, count })
    }

    /// The run mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn render<F>(&self, out: &mut Vec<u8>, write: F) -> Result<usize>
    where
        F: FnOnce(&mut dyn OutputFormatter) -> Result<usize>,
    {
        let mut formatter: Box<dyn OutputFormatter + '_> = if self.dump {
            Box::new(JsonFormatter::new(out))
        } else if self.mode == Mode::Lines {
            Box::new(LineFormatter::new(out))
        } else {
            Box::new(TextFormatter::new(out))
        };
        let count = write(formatter.as_mut())?;
        formatter.finish()?;
        Ok(count)
    }

    fn write_tokens(&self, text: &str, formatter: &mut dyn OutputFormatter) -> Result<usize> {
        let mut filter = self.filter.clone();
        let mut count = 0;
        for token in Tokenizer::new(text, &self.options) {
            let token = token?;
            count += 1;
            if let Some(token) = filter.apply(token) {
                formatter.format_token(&token)?;
            }
        }
        Ok(count)
    }

    fn write_sentences(&self, text: &str, formatter: &mut dyn OutputFormatter) -> Result<usize> {
        let segmenter = self
            .segmenter
            .as_ref()
            .context("sentence mode without a segmenter")?;
        let mut filter = self.filter.clone();
        let tokens = Tokenizer::new(text, segmenter.options()).filter_map(move |token| match token {
            Ok(token) => filter.apply(token).map(Ok),
            Err(e) => Some(Err(e)),
        });

        let mut count = 0;
        for sentence in SentenceStream::new(tokens, segmenter.splitter()) {
            formatter.format_sentence(&sentence?)?;
            count += 1;
        }
        Ok(count)
    }
}

/// Rebuild running text line by line from whitespace-separated tokens
fn untokenize(text: &str, out: &mut impl Write) -> Result<usize> {
    let mut count = 0;
    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        count += words.len();
        writeln!(out, "{}", ptb_to_text(&words))?;
    }
    Ok(count)
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let start = Instant::now();
        let reader = FileReader::for_label(&self.encoding)?;
        let processor = self.processor()?;

        let (outputs, count) = if self.input.is_empty() {
            let text = reader.read_from(io::stdin().lock(), "stdin")?;
            let processed = processor.process_text(&text)?;
            let count = processed.count;
            (vec![processed.output], count)
        } else {
            let files = resolve_patterns(&self.input)?;
            log::info!("Processing {} file(s)", files.len());
            let processed = self.process_files(&files, &reader, &processor)?;
            let count = processed.iter().map(|p| p.count).sum::<usize>();
            (processed.into_iter().map(|p| p.output).collect(), count)
        };

        let mut sink = self.sink()?;
        for output in &outputs {
            sink.write_all(output)?;
        }
        sink.flush()?;

        let seconds = start.elapsed().as_secs_f64();
        let unit = match processor.mode() {
            Mode::Sentences => "sentences",
            _ => "tokens",
        };
        log::info!(
            "Processed {count} {unit} in {seconds:.2}s ({:.0} {unit}/s)",
            count as f64 / seconds.max(f64::EPSILON)
        );
        Ok(())
    }

    /// Resolve configuration file and flags into a processor
    pub fn processor(&self) -> Result<Processor> {
        let mode = if self.untok {
            Mode::Untokenize
        } else if self.sentences {
            Mode::Sentences
        } else if self.preserve_lines {
            Mode::Lines
        } else {
            Mode::Tokens
        };

        let mut config = CliConfig::load(self.config.as_deref())?;
        if let Some(options) = &self.options {
            config.push_options(options);
        }
        if mode == Mode::Lines {
            config.push_options("tokenizeNLs");
        }
        self.splitter.apply(&mut config.splitter);

        let options = config.tokenizer_options()?;
        let segmenter = match mode {
            Mode::Sentences => Some(config.segmenter()?),
            _ => None,
        };
        let parse_inside = self
            .parse_inside
            .as_deref()
            .map(ParseInside::new)
            .transpose()?;

        log::debug!("Tokenizer options: {options}");
        Ok(Processor {
            mode,
            dump: self.dump,
            options,
            segmenter,
            filter: TokenFilter::new(parse_inside, self.lower_case),
        })
    }

    /// Process files in parallel, keeping input order
    fn process_files(
        &self,
        files: &[PathBuf],
        reader: &FileReader,
        processor: &Processor,
    ) -> Result<Vec<Processed>> {
        let progress = ProgressReporter::new(files.len() as u64, self.quiet);
        let run = || {
            files
                .par_iter()
                .map(|path| {
                    let processed = process_file(path, reader, processor)?;
                    progress.file_completed(&path.display().to_string());
                    Ok(processed)
                })
                .collect::<Result<Vec<_>>>()
        };

        let processed = match self.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to start worker threads")?
                .install(run),
            None => run(),
        };
        progress.finish();
        processed
    }

    fn sink(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        // A logger may already be installed when running under tests
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

fn process_file(path: &Path, reader: &FileReader, processor: &Processor) -> Result<Processed> {
    log::debug!("Reading {}", path.display());
    let text = reader.read_text(path)?;
    processor
        .process_text(&text)
        .with_context(|| format!("Failed to process {}", path.display()))
}
