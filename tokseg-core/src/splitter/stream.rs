//! Lazy sentence splitting over a token iterator

use std::collections::VecDeque;

use super::machine::Machine;
use super::SentenceSplitter;
use crate::error::Result;
use crate::token::Token;

/// Iterator of sentences pulled from a fallible token stream
///
/// Tokens are read only as far as needed to complete the next sentence,
/// plus the one token that shows whether a boundary follower attaches to
/// it. With a multi-token pattern or in one-sentence mode the whole input is
/// read first. Discarded tokens are dropped. After an error the stream ends.
pub struct SentenceStream<'s, I> {
    tokens: I,
    splitter: &'s SentenceSplitter,
    machine: Machine<'s, Token>,
    ready: VecDeque<Vec<Token>>,
    exhausted: bool,
}

impl<'s, I> SentenceStream<'s, I>
where
    I: Iterator<Item = Result<Token>>,
{
    /// Split the sentences of `tokens` with `splitter`
    pub fn new(tokens: I, splitter: &'s SentenceSplitter) -> Self {
        Self {
            tokens,
            splitter,
            machine: Machine::new(splitter),
            ready: VecDeque::new(),
            exhausted: false,
        }
    }

    fn fill(&mut self) -> Result<()> {
        if self.splitter.config().one_sentence || self.splitter.needs_whole_input() {
            return self.fill_whole();
        }
        while self.ready.is_empty() && !self.exhausted {
            match self.tokens.next().transpose()? {
                Some(token) => self.machine.push_token(token, false),
                None => {
                    self.exhausted = true;
                    self.machine.finish();
                }
            }
            self.machine.discarded.clear();
            self.ready.append(&mut self.machine.output);
        }
        Ok(())
    }

    fn fill_whole(&mut self) -> Result<()> {
        if self.exhausted {
            return Ok(());
        }
        let tokens = self.tokens.by_ref().collect::<Result<Vec<_>>>()?;
        self.exhausted = true;

        if self.splitter.config().one_sentence {
            if !tokens.is_empty() {
                self.ready.push_back(tokens);
            }
            return Ok(());
        }

        let ends = self.splitter.multi_token_ends(&tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            let multi = ends.binary_search(&index).is_ok();
            self.machine.push_token(token, multi);
        }
        self.machine.finish();
        self.ready.append(&mut self.machine.output);
        self.machine.discarded.clear();
        Ok(())
    }
}

impl<I> Iterator for SentenceStream<'_, I>
where
    I: Iterator<Item = Result<Token>>,
{
    type Item = Result<Vec<Token>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ready.is_empty() {
            if let Err(e) = self.fill() {
                self.exhausted = true;
                self.ready.clear();
                return Some(Err(e));
            }
        }
        self.ready.pop_front().map(Ok)
    }
}
