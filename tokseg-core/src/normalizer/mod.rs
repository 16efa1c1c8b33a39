//! Token normalizer
//!
//! A pure transform from a lexeme to its final token form. Which rewrite
//! applies depends on the lexeme's category, so every token passes through
//! at most one of the bracket, quote, dash, ellipsis, fraction, currency and
//! entity steps, followed by space normalization.

mod americanize;

pub use americanize::Americanizer;

use crate::lexer::rules::{is_fraction_glyph, is_space};
use crate::options::{DashStyle, EllipsisStyle, QuoteStyle, TokenizerOptions};
use crate::token::{Lexeme, Token, TokenKind};

/// Turn a lexeme into a token under `options`
pub fn normalize(lexeme: &Lexeme, options: &TokenizerOptions) -> Token {
    let mut text = normalize_text(lexeme, options);
    if text.is_empty() {
        text = lexeme.text.clone();
    }
    let invertible = options.invertible;
    Token {
        text,
        kind: lexeme.kind,
        original_text: invertible.then(|| lexeme.original.clone()),
        begin: lexeme.begin,
        end: lexeme.end,
        before: invertible.then(|| lexeme.before.clone()),
        after: invertible.then(|| lexeme.after.clone()),
        is_newline: lexeme.kind == TokenKind::Newline,
        forced_sentence_end: false,
        forced_until_end: false,
        multi_token_part: false,
    }
}

fn normalize_text(lexeme: &Lexeme, options: &TokenizerOptions) -> String {
    let raw = lexeme.text.as_str();
    let text = match lexeme.kind {
        TokenKind::Bracket => bracket(raw, options).to_string(),
        TokenKind::Quote => quote(raw, lexeme.prev_char, options.quotes),
        TokenKind::Contraction => apostrophes(raw, options.quotes),
        TokenKind::Dash => dash(raw, options.dashes),
        TokenKind::Ellipsis => ellipsis(raw, options.ellipses).to_string(),
        TokenKind::Number => number(raw, options),
        TokenKind::Currency => currency(raw, options).to_string(),
        TokenKind::Entity => entity(raw, options).to_string(),
        TokenKind::Word => word(raw, options),
        TokenKind::Punctuation | TokenKind::Symbol => escape_slash_asterisk(raw, options),
        TokenKind::Abbreviation
        | TokenKind::Sgml
        | TokenKind::Newline
        | TokenKind::Untokenizable => raw.to_string(),
    };
    if options.normalize_space && text.contains(' ') {
        text.replace(' ', "\u{00A0}")
    } else {
        text
    }
}

fn bracket<'t>(raw: &'t str, options: &TokenizerOptions) -> &'t str {
    match raw {
        "(" if options.normalize_parentheses => "-LRB-",
        ")" if options.normalize_parentheses => "-RRB-",
        "[" if options.normalize_other_brackets => "-LSB-",
        "]" if options.normalize_other_brackets => "-RSB-",
        "{" if options.normalize_other_brackets => "-LCB-",
        "}" if options.normalize_other_brackets => "-RCB-",
        _ => raw,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteFamily {
    Double,
    Single,
}

/// Family and direction of a quote token; `None` direction means context decides
fn classify_quote(raw: &str) -> Option<(QuoteFamily, Option<bool>)> {
    use QuoteFamily::{Double, Single};
    match raw {
        "``" => return Some((Double, Some(true))),
        "''" => return Some((Double, Some(false))),
        _ => {}
    }
    let mut chars = raw.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let class = match c {
        '"' => (Double, None),
        '\'' => (Single, None),
        '`' => (Single, Some(true)),
        '\u{201C}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{0093}' | '\u{0084}' => {
            (Double, Some(true))
        }
        '\u{201D}' | '\u{00BB}' | '\u{0094}' => (Double, Some(false)),
        '\u{2018}' | '\u{201A}' | '\u{201B}' | '\u{2039}' | '\u{0091}' | '\u{0082}' | '\u{008B}' => {
            (Single, Some(true))
        }
        '\u{2019}' | '\u{203A}' | '\u{0092}' | '\u{009B}' => (Single, Some(false)),
        _ => return None,
    };
    Some(class)
}

/// A bare quote opens when it starts the text or follows space or an opener
fn opens_after(prev: Option<char>) -> bool {
    prev.map_or(true, |p| {
        is_space(p)
            || matches!(
                p,
                '(' | '[' | '{' | '<' | '"' | '\'' | '`' | '\u{2018}' | '\u{201C}' | '-'
                    | '\u{2013}' | '\u{2014}'
            )
    })
}

fn quote(raw: &str, prev: Option<char>, style: QuoteStyle) -> String {
    if style == QuoteStyle::Original {
        return raw.to_string();
    }
    if style == QuoteStyle::NotCp1252 {
        return raw.chars().map(cp1252_quote).collect();
    }
    let Some((family, direction)) = classify_quote(raw) else {
        return raw.to_string();
    };
    let open = direction.unwrap_or_else(|| opens_after(prev));
    let mapped = match (style, family, open) {
        (QuoteStyle::Ascii, QuoteFamily::Double, _) => "\"",
        (QuoteStyle::Ascii, QuoteFamily::Single, _) => "'",
        (QuoteStyle::Latex, QuoteFamily::Double, true) => "``",
        (QuoteStyle::Latex, QuoteFamily::Double, false) => "''",
        (QuoteStyle::Latex, QuoteFamily::Single, true) => "`",
        (QuoteStyle::Latex, QuoteFamily::Single, false) => "'",
        (QuoteStyle::Unicode, QuoteFamily::Double, true) => "\u{201C}",
        (QuoteStyle::Unicode, QuoteFamily::Double, false) => "\u{201D}",
        (QuoteStyle::Unicode, QuoteFamily::Single, true) => "\u{2018}",
        (QuoteStyle::Unicode, QuoteFamily::Single, false) => "\u{2019}",
        (QuoteStyle::NotCp1252 | QuoteStyle::Original, _, _) => raw,
    };
    mapped.to_string()
}

fn cp1252_quote(c: char) -> char {
    match c {
        '\u{0091}' => '\u{2018}',
        '\u{0092}' => '\u{2019}',
        '\u{0093}' => '\u{201C}',
        '\u{0094}' => '\u{201D}',
        '\u{0082}' => '\u{201A}',
        '\u{0084}' => '\u{201E}',
        '\u{008B}' => '\u{2039}',
        '\u{009B}' => '\u{203A}',
        other => other,
    }
}

/// Apostrophes inside contractions and words follow the quote style
fn apostrophes(raw: &str, style: QuoteStyle) -> String {
    match style {
        QuoteStyle::Latex | QuoteStyle::Ascii => raw.replace('\u{2019}', "'"),
        QuoteStyle::Unicode => raw.replace('\'', "\u{2019}"),
        QuoteStyle::NotCp1252 => raw.replace('\u{0092}', "\u{2019}"),
        QuoteStyle::Original => raw.to_string(),
    }
}

fn is_long_dash(c: char) -> bool {
    matches!(c, '\u{2014}' | '\u{2015}' | '\u{2E3A}' | '\u{2E3B}' | '\u{0097}' | '\u{FE58}')
}

fn dash(raw: &str, style: DashStyle) -> String {
    let all_hyphens = raw.chars().all(|c| c == '-');
    match style {
        DashStyle::Original => raw.to_string(),
        DashStyle::NotCp1252 => raw
            .chars()
            .map(|c| match c {
                '\u{0096}' => '\u{2013}',
                '\u{0097}' => '\u{2014}',
                other => other,
            })
            .collect(),
        DashStyle::Unicode if all_hyphens && raw.len() >= 2 => "\u{2014}".to_string(),
        DashStyle::Unicode => raw
            .chars()
            .map(|c| match c {
                '\u{0096}' => '\u{2013}',
                '\u{0097}' => '\u{2014}',
                other => other,
            })
            .collect(),
        DashStyle::Ascii if all_hyphens => raw.to_string(),
        DashStyle::Ascii if raw.chars().any(is_long_dash) => "--".to_string(),
        DashStyle::Ascii => "-".to_string(),
    }
}

fn ellipsis(raw: &str, style: EllipsisStyle) -> &str {
    match style {
        EllipsisStyle::Original => raw,
        EllipsisStyle::NotCp1252 if raw == "\u{0085}" => "\u{2026}",
        EllipsisStyle::NotCp1252 => raw,
        EllipsisStyle::Unicode => "\u{2026}",
        EllipsisStyle::Ascii => "...",
    }
}

fn spell_fraction(c: char) -> Option<&'static str> {
    let spelled = match c {
        '\u{00BC}' => "1/4",
        '\u{00BD}' => "1/2",
        '\u{00BE}' => "3/4",
        '\u{2150}' => "1/7",
        '\u{2151}' => "1/9",
        '\u{2152}' => "1/10",
        '\u{2153}' => "1/3",
        '\u{2154}' => "2/3",
        '\u{2155}' => "1/5",
        '\u{2156}' => "2/5",
        '\u{2157}' => "3/5",
        '\u{2158}' => "4/5",
        '\u{2159}' => "1/6",
        '\u{215A}' => "5/6",
        '\u{215B}' => "1/8",
        '\u{215C}' => "3/8",
        '\u{215D}' => "5/8",
        '\u{215E}' => "7/8",
        _ => return None,
    };
    Some(spelled)
}

fn number(raw: &str, options: &TokenizerOptions) -> String {
    if !options.normalize_fractions || !raw.chars().any(is_fraction_glyph) {
        return escape_slash_asterisk(raw, options);
    }
    let mut spelled = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        match spell_fraction(c) {
            Some(fraction) => {
                // "2½" becomes "2 1/2"
                if spelled.ends_with(|d: char| d.is_numeric()) {
                    spelled.push(' ');
                }
                spelled.push_str(fraction);
            }
            None => spelled.push(c),
        }
    }
    escape_slash_asterisk(&spelled, options)
}

fn currency<'t>(raw: &'t str, options: &TokenizerOptions) -> &'t str {
    if !options.normalize_currency {
        return raw;
    }
    match raw {
        "\u{00A2}" => "cents",
        "\u{00A3}" => "#",
        "$" => raw,
        other if other.chars().count() == 1 => "$",
        _ => raw,
    }
}

fn entity<'t>(raw: &'t str, options: &TokenizerOptions) -> &'t str {
    if options.normalize_ampersand_entity && raw == "&amp;" {
        "&"
    } else {
        raw
    }
}

fn word(raw: &str, options: &TokenizerOptions) -> String {
    let mut text = apostrophes(raw, options.quotes);
    if options.normalize_ampersand_entity && text.contains("&amp;") {
        text = text.replace("&amp;", "&");
    }
    if options.americanize {
        let americanized = Americanizer::new(true).americanize(&text).into_owned();
        text = americanized;
    }
    escape_slash_asterisk(&text, options)
}

fn escape_slash_asterisk(text: &str, options: &TokenizerOptions) -> String {
    if !options.escape_forward_slash_asterisk || !text.contains(['/', '*']) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 2);
    let mut prev = None;
    for c in text.chars() {
        if matches!(c, '/' | '*') && prev != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        prev = Some(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexeme(text: &str, kind: TokenKind, prev: Option<char>) -> Lexeme {
        Lexeme {
            text: text.to_string(),
            original: text.to_string(),
            kind,
            begin: 0,
            end: text.chars().count(),
            before: String::new(),
            after: String::new(),
            prev_char: prev,
            next_char: None,
        }
    }

    fn norm(text: &str, kind: TokenKind, options: &str) -> String {
        let options = TokenizerOptions::parse(options).unwrap();
        normalize(&lexeme(text, kind, None), &options).text
    }

    fn norm_after(text: &str, prev: char, options: &str) -> String {
        let options = TokenizerOptions::parse(options).unwrap();
        normalize(&lexeme(text, TokenKind::Quote, Some(prev)), &options).text
    }

    #[test]
    fn test_brackets() {
        assert_eq!(norm("(", TokenKind::Bracket, ""), "-LRB-");
        assert_eq!(norm("}", TokenKind::Bracket, ""), "-RCB-");
        assert_eq!(norm("(", TokenKind::Bracket, "ptb3Escaping=false"), "(");
        assert_eq!(norm("[", TokenKind::Bracket, "normalizeOtherBrackets=false"), "[");
        assert_eq!(norm("-LRB-", TokenKind::Bracket, "ptb3Escaping=false"), "-LRB-");
    }

    #[test]
    fn test_latex_quotes_use_context() {
        assert_eq!(norm("\"", TokenKind::Quote, ""), "``");
        assert_eq!(norm_after("\"", 'o', ""), "''");
        assert_eq!(norm_after("\"", ' ', ""), "``");
        assert_eq!(norm_after("'", '(', ""), "`");
        assert_eq!(norm_after("'", 's', ""), "'");
        assert_eq!(norm("\u{201D}", TokenKind::Quote, ""), "''");
    }

    #[test]
    fn test_other_quote_styles() {
        assert_eq!(norm("``", TokenKind::Quote, "quotes=ascii"), "\"");
        assert_eq!(norm("\u{2018}", TokenKind::Quote, "quotes=ascii"), "'");
        assert_eq!(norm("\"", TokenKind::Quote, "quotes=unicode"), "\u{201C}");
        assert_eq!(norm_after("\"", 'x', "quotes=unicode"), "\u{201D}");
        assert_eq!(norm("\u{0093}", TokenKind::Quote, "quotes=not_cp1252"), "\u{201C}");
        assert_eq!(norm("\"", TokenKind::Quote, "quotes=not_cp1252"), "\"");
        assert_eq!(norm("\"", TokenKind::Quote, "quotes=original"), "\"");
    }

    #[test]
    fn test_contraction_apostrophes() {
        assert_eq!(norm("\u{2019}s", TokenKind::Contraction, ""), "'s");
        assert_eq!(norm("n't", TokenKind::Contraction, "quotes=unicode"), "n\u{2019}t");
        assert_eq!(norm("O\u{2019}Neil", TokenKind::Word, "quotes=original"), "O\u{2019}Neil");
    }

    #[test]
    fn test_dashes() {
        assert_eq!(norm("\u{2014}", TokenKind::Dash, ""), "--");
        assert_eq!(norm("\u{2013}", TokenKind::Dash, ""), "-");
        assert_eq!(norm("--", TokenKind::Dash, "dashes=unicode"), "\u{2014}");
        assert_eq!(norm("\u{0096}", TokenKind::Dash, "dashes=not_cp1252"), "\u{2013}");
        assert_eq!(norm("\u{2014}", TokenKind::Dash, "dashes=original"), "\u{2014}");
    }

    #[test]
    fn test_ellipses() {
        assert_eq!(norm("\u{2026}", TokenKind::Ellipsis, ""), "...");
        assert_eq!(norm("...", TokenKind::Ellipsis, "ellipses=unicode"), "\u{2026}");
        assert_eq!(norm("\u{0085}", TokenKind::Ellipsis, "ellipses=not_cp1252"), "\u{2026}");
        assert_eq!(norm(". . .", TokenKind::Ellipsis, "ellipses=original"), ".\u{00A0}.\u{00A0}.");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(norm("\u{00BD}", TokenKind::Number, ""), "1/2");
        assert_eq!(norm("2\u{00BD}", TokenKind::Number, ""), "2\u{00A0}1/2");
        assert_eq!(norm("2 1/2", TokenKind::Number, "normalizeSpace=false"), "2 1/2");
        assert_eq!(norm("\u{00BD}", TokenKind::Number, "escapeForwardSlashAsterisk"), "1\\/2");
        assert_eq!(norm("\u{00BD}", TokenKind::Number, "normalizeFractions=false"), "\u{00BD}");
    }

    #[test]
    fn test_currency_is_opt_in() {
        assert_eq!(norm("\u{00A3}", TokenKind::Currency, ""), "\u{00A3}");
        assert_eq!(norm("\u{00A3}", TokenKind::Currency, "normalizeCurrency"), "#");
        assert_eq!(norm("\u{00A2}", TokenKind::Currency, "normalizeCurrency"), "cents");
        assert_eq!(norm("\u{20AC}", TokenKind::Currency, "normalizeCurrency"), "$");
        assert_eq!(norm("US$", TokenKind::Currency, "normalizeCurrency"), "US$");
    }

    #[test]
    fn test_ampersand_entity() {
        assert_eq!(norm("&amp;", TokenKind::Entity, ""), "&");
        assert_eq!(norm("&lt;", TokenKind::Entity, ""), "&lt;");
        assert_eq!(norm("AT&amp;T", TokenKind::Word, ""), "AT&T");
        assert_eq!(norm("&amp;", TokenKind::Entity, "normalizeAmpersandEntity=false"), "&amp;");
    }

    #[test]
    fn test_escape_forward_slash_asterisk() {
        assert_eq!(norm("and/or", TokenKind::Word, "escapeForwardSlashAsterisk"), "and\\/or");
        assert_eq!(norm("*", TokenKind::Punctuation, "escapeForwardSlashAsterisk"), "\\*");
        assert_eq!(norm("*", TokenKind::Punctuation, ""), "*");
    }

    #[test]
    fn test_americanize_words_only() {
        assert_eq!(norm("colour", TokenKind::Word, "americanize"), "color");
        assert_eq!(norm("colour", TokenKind::Word, ""), "colour");
        assert_eq!(norm("colour", TokenKind::Abbreviation, "americanize"), "colour");
    }

    #[test]
    fn test_invertible_fields() {
        let options = TokenizerOptions::parse("invertible").unwrap();
        let mut lex = lexeme("(", TokenKind::Bracket, None);
        lex.before = " ".into();
        lex.after = "\n".into();
        let token = normalize(&lex, &options);
        assert_eq!(token.text, "-LRB-");
        assert_eq!(token.original_text.as_deref(), Some("("));
        assert_eq!(token.before.as_deref(), Some(" "));
        assert_eq!(token.after.as_deref(), Some("\n"));

        let token = normalize(&lex, &TokenizerOptions::default());
        assert!(token.original_text.is_none());
        assert!(token.before.is_none());
    }

    #[test]
    fn test_newline_marker() {
        let mut lex = lexeme("*NL*", TokenKind::Newline, None);
        lex.original = "\n".into();
        let token = normalize(&lex, &TokenizerOptions::default());
        assert!(token.is_newline);
        assert_eq!(token.text, "*NL*");
    }
}
