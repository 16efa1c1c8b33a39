//! Static lookup tables
//!
//! Abbreviation lists and spelling tables are embedded as TOML and parsed on
//! first access. After that they are immutable and shared by reference, so
//! any number of lexers and normalizers can read them concurrently.

pub mod abbreviation;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

pub use abbreviation::{AbbrevClass, AbbreviationTrie};

static ABBREVIATIONS: OnceLock<AbbreviationTable> = OnceLock::new();
static SPELLING: OnceLock<SpellingTable> = OnceLock::new();

/// Schema of `configs/abbreviations.toml`
#[derive(Debug, Default, Deserialize)]
struct AbbreviationConfig {
    #[serde(default)]
    never_final: Vec<String>,
    #[serde(default)]
    before_number: Vec<String>,
    #[serde(default)]
    possibly_final: Vec<String>,
    #[serde(default)]
    strict_exceptions: Vec<String>,
}

/// Schema of `configs/americanize.toml`
#[derive(Debug, Default, Deserialize)]
struct SpellingConfig {
    #[serde(default)]
    mapping: HashMap<String, String>,
    #[serde(default)]
    patterns: Vec<PatternConfig>,
    #[serde(default)]
    timex: TimexConfig,
}

#[derive(Debug, Deserialize)]
struct PatternConfig {
    pattern: String,
    replacement: String,
    #[serde(default)]
    exceptions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TimexConfig {
    #[serde(default)]
    words: Vec<String>,
}

/// Abbreviations known to the lexer
#[derive(Debug)]
pub struct AbbreviationTable {
    trie: AbbreviationTrie,
    strict_exceptions: HashSet<String>,
}

impl AbbreviationTable {
    /// Class of a word (without its period) if it is a known abbreviation
    pub fn class_of<I>(&self, word: I) -> Option<AbbrevClass>
    where
        I: IntoIterator<Item = char>,
    {
        self.trie.lookup(word)
    }

    /// Whether an acronym (with its final period) keeps the period in strict mode
    pub fn is_strict_exception(&self, acronym: &str) -> bool {
        self.strict_exceptions.contains(acronym)
    }
}

/// One suffix-pattern rewrite with its exception list
#[derive(Debug)]
pub struct SuffixRule {
    pub(crate) pattern: Regex,
    pub(crate) replacement: String,
    pub(crate) exceptions: Option<Regex>,
}

/// Spelling normalization tables
#[derive(Debug)]
pub struct SpellingTable {
    pub(crate) mapping: HashMap<String, String>,
    pub(crate) rules: Vec<SuffixRule>,
    pub(crate) timex: HashMap<String, String>,
}

/// The shared abbreviation table
pub fn abbreviations() -> &'static AbbreviationTable {
    ABBREVIATIONS.get_or_init(|| {
        let config = load_embedded::<AbbreviationConfig>(
            "abbreviations",
            include_str!("../../configs/abbreviations.toml"),
        );
        let trie = AbbreviationTrie::from_lists([
            (AbbrevClass::NeverFinal, config.never_final.as_slice()),
            (AbbrevClass::BeforeNumber, config.before_number.as_slice()),
            (AbbrevClass::PossiblyFinal, config.possibly_final.as_slice()),
        ]);
        AbbreviationTable {
            trie,
            strict_exceptions: config.strict_exceptions.into_iter().collect(),
        }
    })
}

/// The shared spelling table
pub fn spelling() -> &'static SpellingTable {
    SPELLING.get_or_init(|| {
        let config = load_embedded::<SpellingConfig>(
            "americanize",
            include_str!("../../configs/americanize.toml"),
        );
        let rules = config
            .patterns
            .into_iter()
            .filter_map(|p| match compile_rule(&p) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::error!(pattern = %p.pattern, error = %e, "skipping spelling rule");
                    None
                }
            })
            .collect();
        let timex = config
            .timex
            .words
            .into_iter()
            .map(|w| {
                let capitalized = capitalize(&w);
                (w, capitalized)
            })
            .collect();
        SpellingTable {
            mapping: config.mapping,
            rules,
            timex,
        }
    })
}

fn compile_rule(config: &PatternConfig) -> Result<SuffixRule, regex::Error> {
    let exceptions = if config.exceptions.is_empty() {
        None
    } else {
        Some(Regex::new(&format!(
            "^(?:{})s?$",
            config.exceptions.join("|")
        ))?)
    };
    Ok(SuffixRule {
        pattern: Regex::new(&config.pattern)?,
        replacement: config.replacement.clone(),
        exceptions,
    })
}

fn load_embedded<T>(name: &str, source: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match toml::from_str(source) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(table = name, error = %e, "failed to parse embedded table");
            T::default()
        }
    }
}

/// Uppercase the first character of a word
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_abbreviations_load() {
        let table = abbreviations();
        assert_eq!(table.class_of("Mr".chars()), Some(AbbrevClass::NeverFinal));
        assert_eq!(table.class_of("Fig".chars()), Some(AbbrevClass::NeverFinal));
        assert_eq!(table.class_of("No".chars()), Some(AbbrevClass::BeforeNumber));
        assert_eq!(table.class_of("Inc".chars()), Some(AbbrevClass::PossiblyFinal));
        assert_eq!(table.class_of("Washington".chars()), None);
        assert!(table.is_strict_exception("U.S."));
        assert!(!table.is_strict_exception("U.K."));
    }

    #[test]
    fn test_embedded_spelling_loads() {
        let table = spelling();
        assert_eq!(table.mapping.get("colour").map(String::as_str), Some("color"));
        assert_eq!(table.rules.len(), 5);
        assert_eq!(table.timex.get("monday").map(String::as_str), Some("Monday"));
        assert!(!table.timex.contains_key("may"));
    }

    #[test]
    fn test_tables_are_shared() {
        assert!(std::ptr::eq(abbreviations(), abbreviations()));
        assert!(std::ptr::eq(spelling(), spelling()));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("friday"), "Friday");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
    }
}
