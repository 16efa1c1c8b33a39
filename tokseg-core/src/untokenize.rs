//! Heuristic detokenizer
//!
//! Turns PTB-escaped tokens back into readable text: escapes are undone and
//! tokens are joined with single spaces, except that no space goes before
//! closing punctuation and clitics or after opening brackets and quotes.
//! The result approximates the source; exact reconstruction needs
//! invertible tokens and [`reconstruct`](crate::token::reconstruct).

use crate::token::NEWLINE_TOKEN;

fn unescape(token: &str) -> String {
    match token {
        "-LRB-" => "(".to_string(),
        "-RRB-" => ")".to_string(),
        "-LSB-" => "[".to_string(),
        "-RSB-" => "]".to_string(),
        "-LCB-" => "{".to_string(),
        "-RCB-" => "}".to_string(),
        "``" | "''" => "\"".to_string(),
        "`" => "'".to_string(),
        _ => token.replace("\\/", "/").replace("\\*", "*"),
    }
}

fn is_clitic(token: &str) -> bool {
    const CLITICS: [&str; 8] = ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m", "'"];
    let lower = token.to_lowercase().replace('\u{2019}', "'");
    CLITICS.contains(&lower.as_str())
}

/// Second halves of split assimilations, keyed by the first half
fn joins_previous(previous: &str, token: &str) -> bool {
    let previous = previous.to_lowercase();
    let token = token.to_lowercase();
    matches!(
        (previous.as_str(), token.as_str()),
        ("gon" | "wan", "na") | ("got", "ta") | ("lem" | "gim", "me") | ("can", "not")
    )
}

fn closes(token: &str) -> bool {
    let punctuation_run = !token.is_empty() && token.chars().all(|c| matches!(c, '!' | '?'));
    punctuation_run
        || is_clitic(token)
        || matches!(
            token,
            "." | "," | ";" | ":" | "%" | "..." | "\u{2026}" | "''" | "\u{2019}" | "\u{201D}"
                | "-RRB-" | "-RSB-" | "-RCB-" | ")" | "]" | "}"
        )
}

fn opens(token: &str) -> bool {
    matches!(
        token,
        "``" | "`" | "\u{2018}" | "\u{201C}" | "-LRB-" | "-LSB-" | "-LCB-" | "(" | "[" | "{"
            | "$" | "#"
    )
}

/// Rebuild readable text from PTB tokens
pub fn ptb_to_text<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut previous: Option<&str> = None;
    let mut glue_next = true;
    let mut open_double_quote = false;

    for token in tokens {
        let token = token.as_ref();
        if token == NEWLINE_TOKEN {
            out.push('\n');
            previous = None;
            glue_next = true;
            continue;
        }

        let mut glue = glue_next || closes(token);
        glue_next = opens(token);
        if token == "\"" {
            if open_double_quote {
                glue = true;
                glue_next = false;
            } else {
                glue_next = true;
            }
            open_double_quote = !open_double_quote;
        }
        if let Some(previous) = previous {
            glue |= joins_previous(previous, token);
        }

        if !glue {
            out.push(' ');
        }
        out.push_str(&unescape(token));
        previous = Some(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untok(text: &str) -> String {
        let tokens: Vec<&str> = text.split(' ').collect();
        ptb_to_text(&tokens)
    }

    #[test]
    fn test_brackets_and_punctuation() {
        assert_eq!(
            untok("-LRB- See Fig. 2 . -RRB- It costs $ 5 , ok ?!"),
            "(See Fig. 2.) It costs $5, ok?!"
        );
    }

    #[test]
    fn test_quotes() {
        assert_eq!(untok("He said `` Hi . '' Then"), "He said \"Hi.\" Then");
        assert_eq!(untok("a \" b \" c"), "a \"b\" c");
    }

    #[test]
    fn test_clitics_and_assimilations() {
        assert_eq!(untok("I ca n't say she 's gon na"), "I can't say she's gonna");
        assert_eq!(untok("I can not"), "I cannot");
    }

    #[test]
    fn test_escaped_slash_and_newlines() {
        assert_eq!(untok("and\\/or *NL* next"), "and/or\nnext");
    }

    #[test]
    fn test_empty() {
        let none: [&str; 0] = [];
        assert_eq!(ptb_to_text(&none), "");
    }
}
