//! Per-token boundary state machine
//!
//! Items are pushed one at a time together with the token they stand for.
//! The machine holds back the most recently completed sentence until no
//! boundary follower can attach to it any more, then releases it to the
//! output queue.

use std::collections::VecDeque;

use super::{NewlineIsSentenceBreak, SentenceSplitter, SplitToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Drop,
    Attach,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    None,
    Soft,
    Forced,
}

#[derive(Debug, Clone, Copy)]
struct Decision {
    action: Action,
    boundary: Boundary,
    quote: Option<usize>,
}

/// Index into the per-sentence quote counts: double quotes, then single
///
/// Every rendering of a quote counts toward its family, so a latex opening
/// `` ` `` and a bare closing `'` balance each other.
fn quote_slot(word: &str) -> Option<usize> {
    match word {
        "\"" | "``" | "''" | "\u{201C}" | "\u{201D}" => Some(0),
        "'" | "`" | "\u{2018}" | "\u{2019}" => Some(1),
        _ => None,
    }
}

/// Quotes that look the same whether they open or close
fn is_bare_quote(word: &str) -> bool {
    matches!(word, "\"" | "'")
}

pub(crate) struct Machine<'s, I> {
    splitter: &'s SentenceSplitter,
    current: Vec<I>,
    current_quotes: [usize; 2],
    previous: Option<Vec<I>>,
    previous_quotes: [usize; 2],
    inside_region: bool,
    waiting_for_forced_end: bool,
    last_token_was_newline: bool,
    last_end_forced: bool,
    pub(crate) output: VecDeque<Vec<I>>,
    pub(crate) discarded: Vec<I>,
}

impl<'s, I> Machine<'s, I> {
    pub(crate) fn new(splitter: &'s SentenceSplitter) -> Self {
        Self {
            splitter,
            current: Vec::new(),
            current_quotes: [0; 2],
            previous: None,
            previous_quotes: [0; 2],
            inside_region: splitter.region.is_none(),
            waiting_for_forced_end: false,
            last_token_was_newline: false,
            last_end_forced: false,
            output: VecDeque::new(),
            discarded: Vec::new(),
        }
    }

    /// Feed one item together with the token it stands for
    ///
    /// `multi_boundary` is true when a multi-token pattern match ends here.
    pub(crate) fn push<T>(&mut self, item: I, token: &T, multi_boundary: bool)
    where
        T: SplitToken + ?Sized,
    {
        let decision = self.decide(token, multi_boundary);
        self.apply(item, decision);
    }

    /// Feed an item that is itself a token
    pub(crate) fn push_token(&mut self, item: I, multi_boundary: bool)
    where
        I: SplitToken,
    {
        let decision = self.decide(&item, multi_boundary);
        self.apply(item, decision);
    }

    fn apply(&mut self, item: I, decision: Decision) {
        match decision.action {
            Action::Drop => self.discarded.push(item),
            Action::Attach => {
                if let Some(slot) = decision.quote {
                    self.previous_quotes[slot] += 1;
                }
                if let Some(previous) = self.previous.as_mut() {
                    previous.push(item);
                }
            }
            Action::Keep => {
                if let Some(slot) = decision.quote {
                    self.current_quotes[slot] += 1;
                }
                self.current.push(item);
            }
        }

        if decision.boundary != Boundary::None {
            let forced = decision.boundary == Boundary::Forced;
            if !self.current.is_empty() || self.splitter.config.allow_empty_sentences {
                tracing::trace!(
                    tokens = self.current.len(),
                    forced,
                    "splitter emitted sentence"
                );
                self.emit();
                self.last_end_forced = forced;
            } else if forced {
                self.last_end_forced = true;
            }
        }
        self.settle();
    }

    /// Flush everything still buffered
    pub(crate) fn finish(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.output.push_back(previous);
        }
        if !self.current.is_empty() {
            self.output.push_back(std::mem::take(&mut self.current));
        }
    }

    fn decide<T>(&mut self, token: &T, multi_boundary: bool) -> Decision
    where
        T: SplitToken + ?Sized,
    {
        let word = token.word();
        let (action, boundary) = self.classify(token, multi_boundary);
        match action {
            Action::Drop => tracing::trace!(token = word, "splitter discarded token"),
            Action::Attach => tracing::trace!(token = word, "splitter attached follower"),
            Action::Keep => {}
        }
        Decision {
            action,
            boundary,
            quote: quote_slot(word),
        }
    }

    fn classify<T>(&mut self, token: &T, multi_boundary: bool) -> (Action, Boundary)
    where
        T: SplitToken + ?Sized,
    {
        let splitter = self.splitter;
        let word = token.word();
        let forced_end = token.is_forced_end();
        if !forced_end && token.is_forced_until_end() {
            self.waiting_for_forced_end = true;
        }
        let in_multi_token = !forced_end && token.is_multi_token_part();
        let discard = splitter.is_discarded_pattern(word);
        let keep = if discard { Action::Drop } else { Action::Keep };

        if let Some(region) = &splitter.region {
            if !self.inside_region {
                if region.begin.is_match(word) {
                    self.inside_region = true;
                }
                self.last_token_was_newline = false;
                return (Action::Drop, Boundary::None);
            }
        }

        if self.current.is_empty()
            && self.previous.is_some()
            && !self.last_token_was_newline
            && !self.last_end_forced
            && splitter.followers.is_match(word)
            && self.plausible_to_attach(word)
        {
            self.last_token_was_newline = false;
            let action = if discard { Action::Drop } else { Action::Attach };
            return (action, Boundary::None);
        }

        if self.waiting_for_forced_end && !forced_end {
            self.last_token_was_newline = false;
            let action = if splitter.is_discardable_boundary(word) {
                Action::Drop
            } else {
                keep
            };
            return (action, Boundary::None);
        }

        if in_multi_token {
            self.last_token_was_newline = false;
            return (keep, Boundary::None);
        }

        if splitter.is_discardable_boundary(word) {
            let forced = match splitter.config.newline_is_sentence_break {
                NewlineIsSentenceBreak::Always => true,
                NewlineIsSentenceBreak::TwoConsecutive => self.last_token_was_newline,
                NewlineIsSentenceBreak::Never => false,
            };
            self.last_token_was_newline = true;
            let boundary = if forced {
                Boundary::Forced
            } else {
                Boundary::None
            };
            return (Action::Drop, boundary);
        }

        self.last_token_was_newline = false;
        if splitter.is_xml_break(word) {
            return (Action::Drop, Boundary::Forced);
        }
        if let Some(region) = &splitter.region {
            if region.end.is_match(word) {
                self.inside_region = false;
                return (Action::Drop, Boundary::Forced);
            }
        }
        if multi_boundary || splitter.boundary.is_match(word) {
            return (keep, Boundary::Soft);
        }
        if forced_end {
            self.waiting_for_forced_end = false;
            return (keep, Boundary::Forced);
        }
        (keep, Boundary::None)
    }

    /// A bare quote only closes a quotation left open in the previous sentence
    fn plausible_to_attach(&self, word: &str) -> bool {
        if !is_bare_quote(word) {
            return true;
        }
        quote_slot(word).is_some_and(|slot| self.previous_quotes[slot] % 2 == 1)
    }

    fn emit(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.previous_quotes = std::mem::take(&mut self.current_quotes);
        if let Some(done) = self.previous.replace(finished) {
            self.output.push_back(done);
        }
    }

    /// Release the previous sentence once nothing can attach to it
    fn settle(&mut self) {
        if self.previous.is_some() && (!self.current.is_empty() || self.last_end_forced) {
            if let Some(done) = self.previous.take() {
                self.output.push_back(done);
            }
        }
    }
}
