//! British to American spelling
//!
//! Exact lookups first (with a capitalized variant), then the suffix
//! rewrites in table order. The first rule whose pattern matches decides;
//! if the word is on that rule's exception list it is left alone.

use std::borrow::Cow;

use crate::tables::{self, capitalize, SpellingTable};

/// Spelling normalizer over the shared spelling tables
#[derive(Debug, Clone, Copy)]
pub struct Americanizer {
    table: &'static SpellingTable,
    capitalize_timex: bool,
}

impl Default for Americanizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Americanizer {
    /// Create an americanizer; `capitalize_timex` also capitalizes month and weekday names
    pub fn new(capitalize_timex: bool) -> Self {
        Self {
            table: tables::spelling(),
            capitalize_timex,
        }
    }

    /// American spelling of `word`, borrowed when nothing changes
    pub fn americanize<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if self.capitalize_timex {
            if let Some(capitalized) = self.table.timex.get(word) {
                return Cow::Owned(capitalized.clone());
            }
        }
        if let Some(american) = self.table.mapping.get(word) {
            return Cow::Owned(american.clone());
        }
        if let Some(american) = self.capitalized_lookup(word) {
            return Cow::Owned(american);
        }
        for rule in &self.table.rules {
            if rule.pattern.is_match(word) {
                if rule.exceptions.as_ref().is_some_and(|ex| ex.is_match(word)) {
                    return Cow::Borrowed(word);
                }
                return rule.pattern.replace(word, rule.replacement.as_str());
            }
        }
        Cow::Borrowed(word)
    }

    /// `Colour` -> `Color`
    fn capitalized_lookup(&self, word: &str) -> Option<String> {
        let mut chars = word.chars();
        let first = chars.next()?;
        if !first.is_uppercase() || chars.any(char::is_uppercase) {
            return None;
        }
        self.table
            .mapping
            .get(&word.to_lowercase())
            .map(|american| capitalize(american))
    }
}
