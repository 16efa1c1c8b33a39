//! The ordered rule table
//!
//! Each rule inspects a [`Window`] of buffered characters at the current
//! position and either declines or returns the longest match it can make.
//! Rules are tried in table order and the first one that matches wins.
//! Rules are pure: everything they need is in the window.

use crate::options::TokenizerOptions;
use crate::tables::{self, AbbrevClass};
use crate::token::{TokenKind, NEWLINE_TOKEN};

/// Longest tag the SGML rule will scan before giving up
pub(crate) const MAX_TAG_LEN: usize = 256;

/// View of the input at the current lexer position
pub(crate) struct Window<'w> {
    chars: &'w [char],
    prev: Option<char>,
    complete: bool,
    options: &'w TokenizerOptions,
}

impl<'w> Window<'w> {
    pub(crate) fn new(
        chars: &'w [char],
        prev: Option<char>,
        complete: bool,
        options: &'w TokenizerOptions,
    ) -> Self {
        Self {
            chars,
            prev,
            complete,
            options,
        }
    }

    fn at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn is(&self, i: usize, pred: impl Fn(char) -> bool) -> bool {
        self.at(i).is_some_and(pred)
    }

    fn starts_with(&self, i: usize, s: &str) -> bool {
        s.chars().enumerate().all(|(k, c)| self.at(i + k) == Some(c))
    }

    /// ASCII case-insensitive prefix test; `s` must be lowercase
    fn starts_with_ci(&self, i: usize, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(k, c)| self.at(i + k).map(|a| a.to_ascii_lowercase()) == Some(c))
    }

    fn run_len(&self, i: usize, pred: impl Fn(char) -> bool) -> usize {
        self.chars
            .get(i..)
            .map_or(0, |rest| rest.iter().take_while(|&&c| pred(c)).count())
    }

    fn text(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    /// True when no word character follows position `i`
    fn ends_word(&self, i: usize) -> bool {
        !self.is(i, is_word_char)
    }

    fn after_word_char(&self) -> bool {
        self.prev.is_some_and(is_word_char)
    }
}

/// Outcome of a successful rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match {
    /// Number of source characters consumed
    pub(crate) len: usize,
    pub(crate) kind: TokenKind,
    /// Replacement lexical form; defaults to the matched source text
    pub(crate) text: Option<&'static str>,
    /// Emit a zero-width sentence-final `.` after this match
    pub(crate) placeholder_period: bool,
}

impl Match {
    fn new(len: usize, kind: TokenKind) -> Self {
        Self {
            len,
            kind,
            text: None,
            placeholder_period: false,
        }
    }

    fn with_text(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }

    fn with_placeholder(mut self) -> Self {
        self.placeholder_period = true;
        self
    }
}

/// One entry of the rule table
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    matcher: fn(&Window<'_>) -> Option<Match>,
}

/// Rules in precedence order
pub(crate) static RULES: [Rule; 11] = [
    Rule { name: "sgml", matcher: sgml },
    Rule { name: "escaped_bracket", matcher: escaped_bracket },
    Rule { name: "contraction", matcher: contraction },
    Rule { name: "abbreviation", matcher: abbreviation },
    Rule { name: "dash", matcher: dash },
    Rule { name: "quote", matcher: quote },
    Rule { name: "currency", matcher: currency },
    Rule { name: "number", matcher: number },
    Rule { name: "ellipsis", matcher: ellipsis },
    Rule { name: "word", matcher: word },
    Rule { name: "catch_all", matcher: catch_all },
];

/// Run the table at the start of `window`, which must not be empty
pub(crate) fn first_match(window: &Window<'_>) -> (&'static str, Match) {
    RULES
        .iter()
        .find_map(|rule| {
            (rule.matcher)(window)
                .filter(|m| m.len > 0)
                .map(|m| (rule.name, m))
        })
        .unwrap_or(("catch_all", Match::new(1, TokenKind::Symbol)))
}

// Character classes

pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub(crate) fn is_space(c: char) -> bool {
    // U+0085 is the CP1252 ellipsis, not a line break
    c != '\u{0085}' && (c.is_whitespace() || c == '\u{200B}' || c == '\u{FEFF}')
}

fn is_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}'
        | '\u{200C}'
        | '\u{200D}')
}

pub(crate) fn is_letter(c: char) -> bool {
    c.is_alphabetic() || is_mark(c)
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_mark(c) || c == '\u{00AD}'
}

pub(crate) fn is_fraction_glyph(c: char) -> bool {
    matches!(c, '\u{00BC}'..='\u{00BE}' | '\u{2150}'..='\u{215E}')
}

fn is_digit(c: char) -> bool {
    c.is_numeric() && !is_fraction_glyph(c)
}

pub(crate) fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn is_cp1252_punct(c: char) -> bool {
    matches!(c, '\u{0082}' | '\u{0084}' | '\u{0085}' | '\u{008B}' | '\u{0091}'..='\u{0097}' | '\u{009B}')
}

/// Characters handled by the untokenizable policy
pub(crate) fn is_untokenizable(c: char) -> bool {
    if is_space(c) {
        return false;
    }
    if c.is_control() {
        return !is_cp1252_punct(c);
    }
    matches!(c,
        '\u{E000}'..='\u{F8FF}'
        | '\u{F0000}'..='\u{10FFFF}'
        | '\u{FDD0}'..='\u{FDEF}'
        | '\u{FFFD}')
        || (c as u32 & 0xFFFE) == 0xFFFE
}

pub(crate) fn is_quote_char(c: char) -> bool {
    matches!(c,
        '"' | '\'' | '`'
        | '\u{2018}'..='\u{201F}'
        | '\u{2039}' | '\u{203A}'
        | '\u{00AB}' | '\u{00BB}'
        | '\u{0082}' | '\u{0084}'
        | '\u{0091}'..='\u{0094}'
        | '\u{008B}' | '\u{009B}')
}

pub(crate) fn is_dash_char(c: char) -> bool {
    matches!(c,
        '\u{2010}'..='\u{2015}'
        | '\u{2212}'
        | '\u{2E3A}' | '\u{2E3B}'
        | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}'
        | '\u{0096}' | '\u{0097}')
}

fn is_currency_char(c: char) -> bool {
    matches!(c,
        '$' | '\u{00A2}'..='\u{00A5}'
        | '\u{058F}' | '\u{060B}' | '\u{09F2}' | '\u{09F3}' | '\u{0E3F}'
        | '\u{20A0}'..='\u{20CF}')
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c,
            '\u{00A1}' | '\u{00A7}' | '\u{00B6}' | '\u{00B7}' | '\u{00BF}'
            | '\u{2016}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{FF01}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF1F}')
}

// 1. SGML tags and character entities

fn sgml(w: &Window<'_>) -> Option<Match> {
    match w.at(0)? {
        '<' => tag(w),
        '&' => entity(w).map(|len| Match::new(len, TokenKind::Entity)),
        _ => None,
    }
}

fn tag(w: &Window<'_>) -> Option<Match> {
    let mut i = 1;
    if w.at(i) == Some('/') {
        i += 1;
    }
    let first = w.at(i)?;
    if !(first.is_alphabetic() || (i == 1 && matches!(first, '!' | '?'))) {
        return None;
    }
    while i < MAX_TAG_LEN {
        match w.at(i)? {
            '>' => return Some(Match::new(i + 1, TokenKind::Sgml)),
            '<' => return None,
            c if w.options.tokenize_per_line && is_newline(c) => return None,
            _ => i += 1,
        }
    }
    None
}

fn entity(w: &Window<'_>) -> Option<usize> {
    let mut i = 1;
    if w.at(1) == Some('#') {
        let hex = matches!(w.at(2), Some('x' | 'X'));
        i = if hex { 3 } else { 2 };
        let digits = if hex {
            w.run_len(i, |c| c.is_ascii_hexdigit())
        } else {
            w.run_len(i, |c| c.is_ascii_digit())
        };
        if digits == 0 || digits > 7 {
            return None;
        }
        i += digits;
    } else {
        if !w.is(1, |c| c.is_ascii_alphabetic()) {
            return None;
        }
        let name = w.run_len(1, |c| c.is_ascii_alphanumeric());
        if name > 16 {
            return None;
        }
        i += name;
    }
    (w.at(i) == Some(';')).then_some(i + 1)
}

// 2. Escaped brackets

const ESCAPED_BRACKETS: [&str; 6] = ["-LRB-", "-RRB-", "-LSB-", "-RSB-", "-LCB-", "-RCB-"];

fn escaped_bracket(w: &Window<'_>) -> Option<Match> {
    ESCAPED_BRACKETS
        .iter()
        .find(|b| w.starts_with(0, b))
        .map(|b| Match::new(b.len(), TokenKind::Bracket))
}

// 3. Contractions and assimilations

const CLITICS: [&str; 6] = ["s", "re", "ve", "ll", "d", "m"];

/// Assimilated forms and the length of their first half
const ASSIMILATIONS: [(&str, usize); 6] = [
    ("gonna", 3),
    ("gotta", 3),
    ("wanna", 3),
    ("lemme", 3),
    ("gimme", 3),
    ("cannot", 3),
];

/// Length of `n't` at `i`, if it ends a word there
fn negation_at(w: &Window<'_>, i: usize) -> Option<usize> {
    let found = matches!(w.at(i), Some('n' | 'N'))
        && w.is(i + 1, is_apostrophe)
        && matches!(w.at(i + 2), Some('t' | 'T'))
        && w.ends_word(i + 3);
    found.then_some(3)
}

/// Length of a clitic such as `'ll` starting with the apostrophe at `i`
fn clitic_at(w: &Window<'_>, i: usize) -> Option<usize> {
    if !w.is(i, is_apostrophe) {
        return None;
    }
    let letters = w.run_len(i + 1, is_letter);
    if letters == 0 || letters > 2 || !w.ends_word(i + 1 + letters) {
        return None;
    }
    let suffix = w.text(i + 1, i + 1 + letters).to_lowercase();
    CLITICS.contains(&suffix.as_str()).then_some(1 + letters)
}

/// Letters with internal apostrophes, starting at `i`
fn letter_run(w: &Window<'_>, i: usize) -> usize {
    let mut j = i;
    loop {
        match w.at(j) {
            Some(c) if is_letter(c) => j += 1,
            Some(c) if is_apostrophe(c) && j > i && w.is(j + 1, is_letter) => j += 1,
            _ => return j,
        }
    }
}

fn contraction(w: &Window<'_>) -> Option<Match> {
    let c0 = w.at(0)?;

    if w.prev.is_some_and(is_letter) {
        return negation_at(w, 0)
            .or_else(|| clitic_at(w, 0))
            .map(|len| Match::new(len, TokenKind::Contraction));
    }
    if w.after_word_char() {
        return None;
    }

    if is_apostrophe(c0) {
        // 'tis, 'twas
        if !w.options.split_assimilations || !matches!(w.at(1), Some('t' | 'T')) {
            return None;
        }
        let rest = w.run_len(2, is_letter);
        let tail = w.text(2, 2 + rest).to_lowercase();
        return ((tail == "is" || tail == "was") && w.ends_word(2 + rest))
            .then(|| Match::new(2, TokenKind::Contraction));
    }
    if !is_letter(c0) {
        return None;
    }

    let end = letter_run(w, 0);
    if !w.ends_word(end) {
        return None;
    }
    if end >= 4 && negation_at(w, end - 3).is_some() {
        return Some(Match::new(end - 3, TokenKind::Word));
    }
    if w.options.split_assimilations {
        let lower = w.text(0, end).to_lowercase();
        if let Some(&(_, len)) = ASSIMILATIONS.iter().find(|(full, _)| *full == lower) {
            return Some(Match::new(len, TokenKind::Word));
        }
    }
    None
}

// 4. Abbreviation-protected periods

fn abbreviation(w: &Window<'_>) -> Option<Match> {
    let c0 = w.at(0)?;
    if !c0.is_alphabetic() || w.prev.is_some_and(|p| is_word_char(p) || p == '.') {
        return None;
    }
    if let Some(m) = acronym(w) {
        return Some(m);
    }

    let end = w.run_len(0, is_letter);
    if w.at(end) != Some('.') || w.is(end + 1, |c| c == '.' || is_word_char(c)) {
        return None;
    }
    let table = tables::abbreviations();
    match table.class_of(w.chars[..end].iter().copied()) {
        Some(AbbrevClass::NeverFinal) => Some(Match::new(end + 1, TokenKind::Abbreviation)),
        Some(AbbrevClass::BeforeNumber) => {
            number_follows(w, end + 1).then(|| Match::new(end + 1, TokenKind::Abbreviation))
        }
        Some(AbbrevClass::PossiblyFinal) => {
            let text = w.text(0, end + 1);
            let strict = w.options.strict_treebank3 && !table.is_strict_exception(&text);
            Some(sentence_final(w, end + 1, strict))
        }
        None if end == 1 && c0.is_uppercase() && initial_follows(w, 2) => {
            Some(Match::new(2, TokenKind::Abbreviation))
        }
        None => None,
    }
}

/// Letter-period sequences such as `U.S.` or `e.g.`
fn acronym(w: &Window<'_>) -> Option<Match> {
    let mut i = 0;
    while w.is(i, char::is_alphabetic) && w.at(i + 1) == Some('.') {
        i += 2;
    }
    if i < 4 || w.at(i) == Some('.') {
        return None;
    }
    if w.is(i, is_word_char) {
        // U.S.A without its final period
        return (w.is(i, char::is_alphabetic) && w.at(i + 1) != Some('.') && w.ends_word(i + 1))
            .then(|| Match::new(i + 1, TokenKind::Abbreviation));
    }

    let table = tables::abbreviations();
    if table.class_of(w.chars[..i - 1].iter().copied()) == Some(AbbrevClass::NeverFinal) {
        return Some(Match::new(i, TokenKind::Abbreviation));
    }
    let text = w.text(0, i);
    let strict = (w.options.strict_treebank3 || w.options.strict_acronym)
        && !table.is_strict_exception(&text);
    Some(sentence_final(w, i, strict))
}

/// Match for an abbreviation of `len` chars (period included) that may end a sentence
fn sentence_final(w: &Window<'_>, len: usize, strict: bool) -> Match {
    if !likely_sentence_end(w, len) {
        Match::new(len, TokenKind::Abbreviation)
    } else if strict {
        Match::new(len - 1, TokenKind::Abbreviation)
    } else {
        Match::new(len, TokenKind::Abbreviation).with_placeholder()
    }
}

/// Whitespace then a capital letter, or the end of input, follows position `i`
fn likely_sentence_end(w: &Window<'_>, mut i: usize) -> bool {
    let mut saw_space = false;
    loop {
        match w.at(i) {
            None => return w.complete,
            Some(c) if w.options.tokenize_per_line && is_newline(c) => return true,
            Some(c) if is_space(c) => {
                saw_space = true;
                i += 1;
            }
            Some(c) if saw_space && matches!(c, '"' | '\u{201C}' | '\u{2018}' | '(' | '[') => {
                return w.is(i + 1, char::is_uppercase);
            }
            Some(c) => return saw_space && c.is_uppercase(),
        }
    }
}

fn skip_inline_space(w: &Window<'_>, i: usize) -> usize {
    i + w.run_len(i, |c| is_space(c) && !is_newline(c))
}

fn number_follows(w: &Window<'_>, i: usize) -> bool {
    let j = skip_inline_space(w, i);
    j > i && (w.is(j, is_digit) || (w.at(j) == Some('(') && w.is(j + 1, is_digit)))
}

fn initial_follows(w: &Window<'_>, i: usize) -> bool {
    let j = skip_inline_space(w, i);
    j > i && w.is(j, char::is_uppercase)
}

// 5. Dashes

fn dash(w: &Window<'_>) -> Option<Match> {
    let c0 = w.at(0)?;
    let signed_number = w.is(1, is_digit) && !w.prev.is_some_and(char::is_alphanumeric);
    if c0 == '-' {
        let run = w.run_len(0, |c| c == '-');
        if run == 1 && signed_number {
            return None;
        }
        return Some(Match::new(run, TokenKind::Dash));
    }
    if is_dash_char(c0) {
        if c0 == '\u{2212}' && signed_number {
            return None;
        }
        return Some(Match::new(w.run_len(0, is_dash_char), TokenKind::Dash));
    }
    None
}

// 6. Quotes

fn quote(w: &Window<'_>) -> Option<Match> {
    if w.starts_with(0, "``") || w.starts_with(0, "''") {
        return Some(Match::new(2, TokenKind::Quote));
    }
    is_quote_char(w.at(0)?).then(|| Match::new(1, TokenKind::Quote))
}

// 7. Currency

const CURRENCY_PREFIXES: [&str; 6] = ["US$", "HK$", "NZ$", "C$", "A$", "S$"];

fn currency(w: &Window<'_>) -> Option<Match> {
    if !w.after_word_char() {
        if let Some(prefix) = CURRENCY_PREFIXES.iter().find(|p| w.starts_with(0, p)) {
            return Some(Match::new(prefix.len(), TokenKind::Currency));
        }
    }
    is_currency_char(w.at(0)?).then(|| Match::new(1, TokenKind::Currency))
}

// 8. Numbers

fn number(w: &Window<'_>) -> Option<Match> {
    let mut i = 0;
    if matches!(w.at(0)?, '+' | '-' | '\u{2212}') {
        if w.prev.is_some_and(char::is_alphanumeric) {
            return None;
        }
        i = 1;
    }
    if w.is(i, is_fraction_glyph) {
        return Some(Match::new(i + 1, TokenKind::Number));
    }

    let mut grouped = false;
    if w.at(i) == Some('.') {
        grouped = true;
        i += 1;
    }
    let digits = w.run_len(i, is_digit);
    if digits == 0 {
        return None;
    }
    i += digits;
    while matches!(w.at(i), Some(',' | '.')) && w.is(i + 1, is_digit) {
        i += 1 + w.run_len(i + 1, is_digit);
        grouped = true;
    }

    let mut fraction = false;
    if !grouped {
        while w.at(i) == Some('/') && w.is(i + 1, is_digit) {
            i += 1 + w.run_len(i + 1, is_digit);
            fraction = true;
        }
    }
    if w.is(i, is_fraction_glyph) {
        i += 1;
    } else if !fraction && !grouped && !w.options.strict_fraction {
        i += spaced_fraction(w, i).unwrap_or(0);
    }

    // Numbers running into letters or hyphenated compounds belong to the word rule
    match w.at(i) {
        Some(c) if is_letter(c) => None,
        Some('-') if !w.options.split_hyphenated && w.is(i + 1, is_word_char) => None,
        _ => Some(Match::new(i, TokenKind::Number)),
    }
}

/// Length of ` n/d` (one space or U+00A0 then a fraction) at `i`
fn spaced_fraction(w: &Window<'_>, i: usize) -> Option<usize> {
    if !matches!(w.at(i), Some(' ' | '\u{00A0}')) {
        return None;
    }
    let numerator = w.run_len(i + 1, |c| c.is_ascii_digit());
    let slash = i + 1 + numerator;
    if numerator == 0 || w.at(slash) != Some('/') {
        return None;
    }
    let denominator = w.run_len(slash + 1, |c| c.is_ascii_digit());
    let end = slash + 1 + denominator;
    (denominator > 0 && w.ends_word(end) && w.at(end) != Some('/')).then_some(end - i)
}

// 9. Ellipses and sentence-final punctuation runs

fn ellipsis(w: &Window<'_>) -> Option<Match> {
    match w.at(0)? {
        '.' => {
            let run = w.run_len(0, |c| c == '.');
            if run >= 3 {
                return Some(Match::new(run, TokenKind::Ellipsis));
            }
            spaced_ellipsis(w).map(|len| Match::new(len, TokenKind::Ellipsis))
        }
        '\u{2026}' | '\u{0085}' => Some(Match::new(1, TokenKind::Ellipsis)),
        '!' | '?' => Some(Match::new(
            w.run_len(0, |c| c == '!' || c == '?'),
            TokenKind::Punctuation,
        )),
        _ => None,
    }
}

fn spaced_ellipsis(w: &Window<'_>) -> Option<usize> {
    let mut i = 1;
    let mut dots = 1;
    while matches!(w.at(i), Some(' ' | '\u{00A0}')) && w.at(i + 1) == Some('.') {
        i += 2;
        dots += 1;
    }
    (dots >= 3).then_some(i)
}

// 10. Words, URLs and e-mail addresses

const URL_PREFIXES: [&str; 4] = ["https://", "http://", "ftp://", "www."];
const DOMAIN_SUFFIXES: [&str; 5] = ["com", "org", "net", "edu", "gov"];

fn word(w: &Window<'_>) -> Option<Match> {
    if let Some(len) = url(w).or_else(|| email(w)) {
        return Some(Match::new(len, TokenKind::Word));
    }
    if !w.is(0, is_word_char) {
        return None;
    }

    let options = w.options;
    let mut i = 1;
    while let Some(c) = w.at(i) {
        let prev = w.chars[i - 1];
        let step = match c {
            'n' | 'N' if negation_at(w, i).is_some() => break,
            c if is_word_char(c) => 1,
            c if is_apostrophe(c) => {
                if clitic_at(w, i).is_some() || !w.is(i + 1, is_letter) {
                    break;
                }
                1
            }
            '-' if !options.split_hyphenated && is_word_char(prev) && w.is(i + 1, is_word_char) => 1,
            '/' if !options.split_forward_slash
                && is_word_char(prev)
                && w.is(i + 1, is_word_char) =>
            {
                1
            }
            '&' if is_letter(prev) && w.starts_with(i, "&amp;") && w.is(i + 5, is_letter) => 5,
            '&' if is_letter(prev) && w.is(i + 1, is_letter) => 1,
            '.' if is_digit(prev) && w.is(i + 1, is_digit) => 1,
            '.' if is_letter(prev) && domain_suffix_at(w, i + 1) => 1,
            _ => break,
        };
        i += step;
    }
    Some(Match::new(i, TokenKind::Word))
}

fn domain_suffix_at(w: &Window<'_>, i: usize) -> bool {
    let len = w.run_len(i, |c| c.is_ascii_lowercase());
    w.ends_word(i + len) && DOMAIN_SUFFIXES.contains(&w.text(i, i + len).as_str())
}

fn url(w: &Window<'_>) -> Option<usize> {
    if w.after_word_char() {
        return None;
    }
    let prefix = URL_PREFIXES.iter().find(|p| w.starts_with_ci(0, p))?.len();
    let mut end = prefix
        + w.run_len(prefix, |c| {
            !is_space(c) && !is_untokenizable(c) && !matches!(c, '<' | '>' | '"')
        });
    while end > prefix
        && matches!(
            w.chars[end - 1],
            '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '}' | '\''
        )
    {
        end -= 1;
    }
    (end > prefix).then_some(end)
}

fn email(w: &Window<'_>) -> Option<usize> {
    if w.after_word_char() || !w.is(0, char::is_alphanumeric) {
        return None;
    }
    let local = w.run_len(0, |c| c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));
    if w.at(local) != Some('@') {
        return None;
    }
    let mut end = local + 1;
    let mut labels = 0;
    loop {
        let label = w.run_len(end, |c| c.is_alphanumeric() || c == '-');
        if label == 0 {
            break;
        }
        end += label;
        labels += 1;
        if w.at(end) == Some('.') && w.is(end + 1, char::is_alphanumeric) {
            end += 1;
        } else {
            break;
        }
    }
    (labels >= 2).then_some(end)
}

// 11. Catch-all

fn catch_all(w: &Window<'_>) -> Option<Match> {
    let c0 = w.at(0)?;
    if is_newline(c0) {
        let len = if c0 == '\r' && w.at(1) == Some('\n') { 2 } else { 1 };
        return Some(Match::new(len, TokenKind::Newline).with_text(NEWLINE_TOKEN));
    }
    let kind = if is_untokenizable(c0) {
        TokenKind::Untokenizable
    } else if matches!(c0, '(' | ')' | '[' | ']' | '{' | '}') {
        TokenKind::Bracket
    } else if is_punctuation(c0) {
        TokenKind::Punctuation
    } else {
        TokenKind::Symbol
    };
    Some(Match::new(1, kind))
}
