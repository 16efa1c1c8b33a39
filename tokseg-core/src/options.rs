//! Tokenizer options
//!
//! Options are resolved once from a comma-separated string such as
//! `"invertible,quotes=ascii,splitHyphenated=false"` and then shared by
//! reference for the whole run.
//!
//! Macro flags (`ptb3Escaping`, `ud`, `strictTreebank3`) are applied first in
//! that fixed order, regardless of where they appear in the string. Individual
//! keys are applied afterwards in string order, so an individual key always
//! overrides a macro.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

macro_rules! style_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Name used in option strings
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(Error::config(format!(
                        "invalid {} value '{}' (expected one of: {})",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

style_enum!(
    /// How quotation marks are rewritten
    QuoteStyle {
        /// Context-sensitive `` ` `` / `` `` `` / `'` / `''`
        Latex => "latex",
        /// U+2018 to U+201D
        Unicode => "unicode",
        /// Collapse to `'` and `"`
        Ascii => "ascii",
        /// Only remap CP1252 C1 control characters
        NotCp1252 => "not_cp1252",
        /// Leave unchanged
        Original => "original",
    }
);

style_enum!(
    /// How dashes are rewritten
    DashStyle {
        /// En dash and em dash characters
        Unicode => "unicode",
        /// `-` and `--`
        Ascii => "ascii",
        /// Only remap CP1252 C1 control characters
        NotCp1252 => "not_cp1252",
        /// Leave unchanged
        Original => "original",
    }
);

style_enum!(
    /// How ellipses are rewritten
    EllipsisStyle {
        /// U+2026
        Unicode => "unicode",
        /// Three dots
        Ascii => "ascii",
        /// Only remap CP1252 C1 control characters
        NotCp1252 => "not_cp1252",
        /// Leave unchanged
        Original => "original",
    }
);

/// How often untokenizable characters are logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarnFrequency {
    /// Never log
    None,
    /// Log the first occurrence per lexer
    First,
    /// Log every occurrence
    All,
}

/// Policy for characters no lexer rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UntokenizablePolicy {
    /// Logging frequency
    pub warn: WarnFrequency,
    /// Keep the character as a singleton token instead of deleting it
    pub keep: bool,
}

impl UntokenizablePolicy {
    /// Name used in option strings, e.g. `firstDelete`
    pub fn as_str(&self) -> &'static str {
        match (self.warn, self.keep) {
            (WarnFrequency::None, false) => "noneDelete",
            (WarnFrequency::First, false) => "firstDelete",
            (WarnFrequency::All, false) => "allDelete",
            (WarnFrequency::None, true) => "noneKeep",
            (WarnFrequency::First, true) => "firstKeep",
            (WarnFrequency::All, true) => "allKeep",
        }
    }
}

impl Default for UntokenizablePolicy {
    fn default() -> Self {
        Self {
            warn: WarnFrequency::First,
            keep: false,
        }
    }
}

impl FromStr for UntokenizablePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (warn, keep) = match s {
            "noneDelete" => (WarnFrequency::None, false),
            "firstDelete" => (WarnFrequency::First, false),
            "allDelete" => (WarnFrequency::All, false),
            "noneKeep" => (WarnFrequency::None, true),
            "firstKeep" => (WarnFrequency::First, true),
            "allKeep" => (WarnFrequency::All, true),
            other => {
                return Err(Error::config(format!(
                    "invalid untokenizable value '{other}' (expected one of: noneDelete, \
                     firstDelete, allDelete, noneKeep, firstKeep, allKeep)"
                )))
            }
        };
        Ok(Self { warn, keep })
    }
}

impl TryFrom<String> for UntokenizablePolicy {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<UntokenizablePolicy> for String {
    fn from(value: UntokenizablePolicy) -> String {
        value.as_str().to_string()
    }
}

/// Resolved tokenizer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenizerOptions {
    /// Record original text and surrounding whitespace on tokens
    pub invertible: bool,
    /// Emit newlines as `*NL*` tokens
    pub tokenize_nls: bool,
    /// Never let a token span two lines
    pub tokenize_per_line: bool,
    /// Rewrite British spellings as American ones
    pub americanize: bool,
    /// Turn spaces inside tokens into U+00A0
    pub normalize_space: bool,
    /// Map `&amp;` to `&`
    pub normalize_ampersand_entity: bool,
    /// Spell out precomposed fraction characters
    pub normalize_fractions: bool,
    /// Map round parentheses to `-LRB-`/`-RRB-`
    pub normalize_parentheses: bool,
    /// Map square and curly brackets to `-LSB-`/`-RSB-`/`-LCB-`/`-RCB-`
    pub normalize_other_brackets: bool,
    /// Quote rewriting style
    pub quotes: QuoteStyle,
    /// Ellipsis rewriting style
    pub ellipses: EllipsisStyle,
    /// Dash rewriting style
    pub dashes: DashStyle,
    /// Split `gonna` into `gon na` and friends
    pub split_assimilations: bool,
    /// Escape `/` and `*` with a backslash
    pub escape_forward_slash_asterisk: bool,
    /// Lossy mapping of currency symbols onto `$`, `#` and `cents`
    pub normalize_currency: bool,
    /// Handling of unrecognized characters
    pub untokenizable: UntokenizablePolicy,
    /// Strict Penn Treebank 3 behaviour for sentence-final abbreviations
    pub strict_treebank3: bool,
    /// Split the period off sentence-final acronyms
    pub strict_acronym: bool,
    /// Never merge a whole number with a following fraction
    pub strict_fraction: bool,
    /// Split hyphenated words into pieces
    pub split_hyphenated: bool,
    /// Split words at forward slashes
    pub split_forward_slash: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            invertible: false,
            tokenize_nls: false,
            tokenize_per_line: false,
            americanize: false,
            normalize_space: true,
            normalize_ampersand_entity: true,
            normalize_fractions: true,
            normalize_parentheses: true,
            normalize_other_brackets: true,
            quotes: QuoteStyle::Latex,
            ellipses: EllipsisStyle::Ascii,
            dashes: DashStyle::Ascii,
            split_assimilations: true,
            escape_forward_slash_asterisk: false,
            normalize_currency: false,
            untokenizable: UntokenizablePolicy::default(),
            strict_treebank3: false,
            strict_acronym: false,
            strict_fraction: false,
            split_hyphenated: false,
            split_forward_slash: false,
        }
    }
}

const MACRO_KEYS: [&str; 3] = ["ptb3Escaping", "ud", "strictTreebank3"];

const BOOLEAN_KEYS: [&str; 24] = [
    "invertible",
    "tokenizeNLs",
    "tokenizePerLine",
    "americanize",
    "normalizeSpace",
    "normalizeAmpersandEntity",
    "normalizeFractions",
    "normalizeParentheses",
    "normalizeOtherBrackets",
    "splitAssimilations",
    "escapeForwardSlashAsterisk",
    "normalizeCurrency",
    "strictAcronym",
    "strictFraction",
    "splitHyphenated",
    "splitForwardSlash",
    // Legacy spellings of the style keys
    "asciiQuotes",
    "latexQuotes",
    "unicodeQuotes",
    "ptb3Ellipsis",
    "unicodeEllipsis",
    "ptb3Dashes",
    "keepAssimilations",
    // Also accepted as an individual key
    "strictTreebank3",
];

const VALUE_KEYS: [&str; 4] = ["quotes", "ellipses", "dashes", "untokenizable"];

/// One parsed `key[=value]` item
#[derive(Debug)]
struct OptionItem<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

impl<'a> OptionItem<'a> {
    fn flag(&self) -> Result<bool> {
        match self.value {
            None => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
            Some(v) => Err(Error::config(format!(
                "option '{}' expects true or false, got '{}'",
                self.key, v
            ))),
        }
    }

    fn required_value(&self) -> Result<&'a str> {
        self.value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config(format!("option '{}' requires a value", self.key)))
    }
}

impl TokenizerOptions {
    /// Parse an options string
    ///
    /// An empty string yields the traditional defaults.
    pub fn parse(options: &str) -> Result<Self> {
        let items = Self::split_items(options)?;

        let mut resolved = Self::default();
        // Macros first, in fixed order; the last occurrence of each wins.
        for name in MACRO_KEYS {
            if let Some(item) = items.iter().rev().find(|item| item.key == name) {
                resolved.apply_macro(name, item.flag()?);
            }
        }
        for item in &items {
            if MACRO_KEYS.contains(&item.key) && item.key != "strictTreebank3" {
                item.flag()?;
                continue;
            }
            resolved.apply_individual(item)?;
        }

        tracing::debug!(options = %resolved, "resolved tokenizer options");
        Ok(resolved)
    }

    fn split_items(options: &str) -> Result<Vec<OptionItem<'_>>> {
        let mut items = Vec::new();
        for raw in options.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (key, value) = match raw.split_once('=') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (raw, None),
            };
            let known = MACRO_KEYS.contains(&key)
                || BOOLEAN_KEYS.contains(&key)
                || VALUE_KEYS.contains(&key);
            if !known {
                return Err(Error::config(format!("unknown tokenizer option '{key}'")));
            }
            items.push(OptionItem { key, value });
        }
        Ok(items)
    }

    fn apply_macro(&mut self, name: &str, on: bool) {
        match (name, on) {
            ("ptb3Escaping", true) => {
                let defaults = Self::default();
                self.normalize_space = defaults.normalize_space;
                self.normalize_ampersand_entity = defaults.normalize_ampersand_entity;
                self.normalize_fractions = defaults.normalize_fractions;
                self.normalize_parentheses = defaults.normalize_parentheses;
                self.normalize_other_brackets = defaults.normalize_other_brackets;
                self.quotes = defaults.quotes;
                self.ellipses = defaults.ellipses;
                self.dashes = defaults.dashes;
            }
            ("ptb3Escaping", false) => {
                self.normalize_space = false;
                self.normalize_ampersand_entity = false;
                self.normalize_fractions = false;
                self.normalize_parentheses = false;
                self.normalize_other_brackets = false;
                self.quotes = QuoteStyle::Original;
                self.ellipses = EllipsisStyle::Original;
                self.dashes = DashStyle::Original;
            }
            ("ud", true) => {
                self.normalize_parentheses = false;
                self.normalize_other_brackets = false;
                self.quotes = QuoteStyle::NotCp1252;
                self.ellipses = EllipsisStyle::NotCp1252;
                self.dashes = DashStyle::NotCp1252;
                self.split_hyphenated = true;
                self.split_forward_slash = true;
                self.strict_fraction = true;
            }
            ("strictTreebank3", true) => {
                self.strict_treebank3 = true;
                self.strict_acronym = true;
                self.strict_fraction = true;
            }
            _ => {}
        }
    }

    fn apply_individual(&mut self, item: &OptionItem<'_>) -> Result<()> {
        match item.key {
            "invertible" => self.invertible = item.flag()?,
            "tokenizeNLs" => self.tokenize_nls = item.flag()?,
            "tokenizePerLine" => self.tokenize_per_line = item.flag()?,
            "americanize" => self.americanize = item.flag()?,
            "normalizeSpace" => self.normalize_space = item.flag()?,
            "normalizeAmpersandEntity" => self.normalize_ampersand_entity = item.flag()?,
            "normalizeFractions" => self.normalize_fractions = item.flag()?,
            "normalizeParentheses" => self.normalize_parentheses = item.flag()?,
            "normalizeOtherBrackets" => self.normalize_other_brackets = item.flag()?,
            "splitAssimilations" => self.split_assimilations = item.flag()?,
            "keepAssimilations" => self.split_assimilations = !item.flag()?,
            "escapeForwardSlashAsterisk" => self.escape_forward_slash_asterisk = item.flag()?,
            "normalizeCurrency" => self.normalize_currency = item.flag()?,
            "strictTreebank3" => self.strict_treebank3 = item.flag()?,
            "strictAcronym" => self.strict_acronym = item.flag()?,
            "strictFraction" => self.strict_fraction = item.flag()?,
            "splitHyphenated" => self.split_hyphenated = item.flag()?,
            "splitForwardSlash" => self.split_forward_slash = item.flag()?,
            "quotes" => self.quotes = item.required_value()?.parse()?,
            "ellipses" => self.ellipses = item.required_value()?.parse()?,
            "dashes" => self.dashes = item.required_value()?.parse()?,
            "untokenizable" => self.untokenizable = item.required_value()?.parse()?,
            "asciiQuotes" => {
                if item.flag()? {
                    self.quotes = QuoteStyle::Ascii;
                }
            }
            "latexQuotes" => {
                if item.flag()? {
                    self.quotes = QuoteStyle::Latex;
                }
            }
            "unicodeQuotes" => {
                if item.flag()? {
                    self.quotes = QuoteStyle::Unicode;
                }
            }
            "ptb3Ellipsis" => {
                if item.flag()? {
                    self.ellipses = EllipsisStyle::Ascii;
                }
            }
            "unicodeEllipsis" => {
                if item.flag()? {
                    self.ellipses = EllipsisStyle::Unicode;
                }
            }
            "ptb3Dashes" => {
                if item.flag()? {
                    self.dashes = DashStyle::Ascii;
                }
            }
            other => {
                return Err(Error::config(format!("unknown tokenizer option '{other}'")));
            }
        }
        Ok(())
    }

    /// Whether any PTB3 escaping transform is active
    pub fn any_escaping(&self) -> bool {
        self.normalize_parentheses
            || self.normalize_other_brackets
            || self.normalize_fractions
            || self.normalize_ampersand_entity
            || self.normalize_currency
            || self.quotes != QuoteStyle::Original
            || self.dashes != DashStyle::Original
            || self.ellipses != EllipsisStyle::Original
    }
}

impl FromStr for TokenizerOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenizerOptions {
    /// Canonical options string; parsing it yields the same options
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            ("invertible", self.invertible),
            ("tokenizeNLs", self.tokenize_nls),
            ("tokenizePerLine", self.tokenize_per_line),
            ("americanize", self.americanize),
            ("normalizeSpace", self.normalize_space),
            ("normalizeAmpersandEntity", self.normalize_ampersand_entity),
            ("normalizeFractions", self.normalize_fractions),
            ("normalizeParentheses", self.normalize_parentheses),
            ("normalizeOtherBrackets", self.normalize_other_brackets),
            ("splitAssimilations", self.split_assimilations),
            ("escapeForwardSlashAsterisk", self.escape_forward_slash_asterisk),
            ("normalizeCurrency", self.normalize_currency),
            ("strictTreebank3", self.strict_treebank3),
            ("strictAcronym", self.strict_acronym),
            ("strictFraction", self.strict_fraction),
            ("splitHyphenated", self.split_hyphenated),
            ("splitForwardSlash", self.split_forward_slash),
        ];
        for (key, value) in flags {
            write!(f, "{key}={value},")?;
        }
        write!(
            f,
            "quotes={},ellipses={},dashes={},untokenizable={}",
            self.quotes,
            self.ellipses,
            self.dashes,
            self.untokenizable.as_str()
        )
    }
}
