//! End-to-end segmentation scenarios

use tokseg_core::{
    tokenize, NewlineIsSentenceBreak, Segmenter, SplitterConfig, Token, TokenizerOptions,
};

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn sentences(segmenter: &Segmenter, text: &str) -> Vec<String> {
    segmenter
        .segment(text)
        .unwrap()
        .sentences()
        .map(|s| s.text())
        .collect()
}

fn default_segmenter() -> Segmenter {
    Segmenter::new(TokenizerOptions::default(), SplitterConfig::default()).unwrap()
}

#[test]
fn test_abbreviation_does_not_end_sentence() {
    let tokens = tokenize("Mr. Smith went to Washington.", &TokenizerOptions::default()).unwrap();
    assert_eq!(
        texts(&tokens),
        vec!["Mr.", "Smith", "went", "to", "Washington", "."]
    );

    let segmenter = default_segmenter();
    let document = segmenter.segment("Mr. Smith went to Washington.").unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(document.sentences().next().unwrap().len(), 6);
}

#[test]
fn test_closing_quote_attaches_to_previous_sentence() {
    let segmenter = Segmenter::builder()
        .options_str("quotes=ascii")
        .build()
        .unwrap();
    assert_eq!(
        sentences(&segmenter, "He said \"Hello.\" She left."),
        vec!["He said \" Hello . \"", "She left ."]
    );
}

#[test]
fn test_closing_quote_attaches_with_latex_quotes() {
    let segmenter = default_segmenter();
    assert_eq!(
        sentences(&segmenter, "He said \"Hello.\" She left."),
        vec!["He said `` Hello . ''", "She left ."]
    );
}

#[test]
fn test_closing_single_quote_attaches_with_latex_quotes() {
    let segmenter = default_segmenter();
    assert_eq!(
        sentences(&segmenter, "He said 'Hi.' Then left."),
        vec!["He said ` Hi . '", "Then left ."]
    );
    assert_eq!(
        sentences(&segmenter, "It's the dogs' bone. 'Hi.' Ok."),
        vec!["It 's the dogs ' bone .", "` Hi . '", "Ok ."]
    );
}

#[test]
fn test_figure_abbreviation_before_capital() {
    let tokens = tokenize("See Fig. The end.", &TokenizerOptions::default()).unwrap();
    assert_eq!(texts(&tokens), vec!["See", "Fig.", "The", "end", "."]);
    assert_eq!(
        sentences(&default_segmenter(), "See Fig. The end."),
        vec!["See Fig. The end ."]
    );
}

#[test]
fn test_blank_line_splits_paragraphs() {
    let segmenter = Segmenter::builder()
        .newline_is_sentence_break(NewlineIsSentenceBreak::TwoConsecutive)
        .build()
        .unwrap();
    assert_eq!(
        sentences(&segmenter, "Line one.\n\nLine two."),
        vec!["Line one .", "Line two ."]
    );
    assert_eq!(
        sentences(&segmenter, "Line one\nstill one.\n\nLine two"),
        vec!["Line one still one .", "Line two"]
    );
    assert_eq!(
        sentences(&segmenter, "no period here\n\nnext paragraph"),
        vec!["no period here", "next paragraph"]
    );
}

#[test]
fn test_parenthesized_abbreviation() {
    let tokens = tokenize("(See Fig. 2.)", &TokenizerOptions::default()).unwrap();
    assert_eq!(texts(&tokens), vec!["-LRB-", "See", "Fig.", "2", ".", "-RRB-"]);

    let segmenter = default_segmenter();
    assert_eq!(
        sentences(&segmenter, "(See Fig. 2.)"),
        vec!["-LRB- See Fig. 2 . -RRB-"]
    );
    assert_eq!(
        sentences(&segmenter, "(See Fig. 2.) Then stop."),
        vec!["-LRB- See Fig. 2 . -RRB-", "Then stop ."]
    );
}

#[test]
fn test_xml_break_element_forces_boundary() {
    let segmenter = Segmenter::builder()
        .xml_break_elements(["p"])
        .build()
        .unwrap();
    let document = segmenter.segment("First part<p>second part.").unwrap();
    let found: Vec<String> = document.sentences().map(|s| s.text()).collect();
    assert_eq!(found, vec!["First part", "second part ."]);
    let discarded: Vec<&str> = document.discarded().map(|t| t.text.as_str()).collect();
    assert_eq!(discarded, vec!["<p>"]);
}

#[test]
fn test_empty_input_has_no_sentences() {
    let segmenter = default_segmenter();
    assert!(segmenter.segment("").unwrap().is_empty());
    assert!(segmenter.segment("   \n\n  ").unwrap().is_empty());

    let config = SplitterConfig::builder()
        .newline_is_sentence_break(NewlineIsSentenceBreak::Always)
        .allow_empty_sentences(true)
        .build();
    let segmenter = Segmenter::new(TokenizerOptions::default(), config).unwrap();
    assert!(segmenter.segment("").unwrap().is_empty());
}

#[test]
fn test_blank_lines_give_empty_sentences_when_allowed() {
    let config = SplitterConfig::builder()
        .newline_is_sentence_break(NewlineIsSentenceBreak::Always)
        .allow_empty_sentences(true)
        .build();
    let segmenter = Segmenter::new(TokenizerOptions::default(), config).unwrap();
    assert_eq!(sentences(&segmenter, "a\n\nb"), vec!["a", "", "b"]);
}

#[test]
fn test_sentence_final_abbreviation() {
    let segmenter = default_segmenter();
    let document = segmenter
        .segment("He works for Acme Corp. The pay is good.")
        .unwrap();
    let found: Vec<String> = document.sentences().map(|s| s.text()).collect();
    assert_eq!(found, vec!["He works for Acme Corp. .", "The pay is good ."]);

    let strict = Segmenter::builder()
        .options_str("strictTreebank3")
        .build()
        .unwrap();
    assert_eq!(
        sentences(&strict, "He works for Acme Corp. The pay is good."),
        vec!["He works for Acme Corp .", "The pay is good ."]
    );
}

#[test]
fn test_sentence_spans_follow_source_offsets() {
    let segmenter = default_segmenter();
    let text = "One two. Three four!";
    let document = segmenter.segment(text).unwrap();
    let spans: Vec<(usize, usize)> = document
        .sentences()
        .filter_map(|s| s.char_span())
        .collect();
    assert_eq!(spans, vec![(0, 8), (9, 20)]);
}
