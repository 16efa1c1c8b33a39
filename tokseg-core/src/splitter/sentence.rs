//! Splitter output

use super::SplitToken;
use crate::token::Token;

/// Result of splitting a token sequence, by token index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    sentences: Vec<Vec<usize>>,
    discarded: Vec<usize>,
}

impl Segmentation {
    pub(crate) fn new(sentences: Vec<Vec<usize>>, discarded: Vec<usize>) -> Self {
        Self {
            sentences,
            discarded,
        }
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// True when no sentence was produced
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Token indices of each sentence, in order
    pub fn sentence_indices(&self) -> &[Vec<usize>] {
        &self.sentences
    }

    /// Indices of tokens that belong to no sentence
    pub fn discarded(&self) -> &[usize] {
        &self.discarded
    }

    /// Borrowing views over `tokens`, which must be the sequence that was split
    pub fn sentences<'a, T>(&'a self, tokens: &'a [T]) -> impl Iterator<Item = Sentence<'a, T>> + 'a {
        self.sentences
            .iter()
            .map(move |indices| Sentence { tokens, indices })
    }
}

/// A sentence: an ordered view over tokens of the split sequence
#[derive(Debug)]
pub struct Sentence<'a, T> {
    tokens: &'a [T],
    indices: &'a [usize],
}

impl<T> Clone for Sentence<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sentence<'_, T> {}

impl<'a, T> Sentence<'a, T> {
    /// Number of tokens
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True for an empty sentence (only with `allow_empty_sentences`)
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions of the tokens in the split sequence
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    /// The tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let tokens = self.tokens;
        self.indices.iter().filter_map(move |&i| tokens.get(i))
    }

    /// Clone the tokens into an owned vector
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T: SplitToken> Sentence<'a, T> {
    /// Token words in order
    pub fn words(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().map(T::word)
    }

    /// Words joined with single spaces
    pub fn text(&self) -> String {
        self.words().collect::<Vec<_>>().join(" ")
    }
}

impl Sentence<'_, Token> {
    /// Char span from the first token's start to the last token's end
    pub fn char_span(&self) -> Option<(usize, usize)> {
        let first = self.iter().next()?;
        let last = self.iter().last()?;
        Some((first.begin, last.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_follow_indices() {
        let tokens = ["a", "b", "<p>", "c"];
        let segmentation = Segmentation::new(vec![vec![0, 1], vec![3]], vec![2]);
        let sentences: Vec<_> = segmentation.sentences(&tokens).collect();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text(), "a b");
        assert_eq!(sentences[1].indices(), &[3]);
        assert_eq!(sentences[1].to_vec(), vec!["c"]);
        assert_eq!(segmentation.discarded(), &[2]);
    }

    #[test]
    fn test_char_span() {
        let mut first = Token::new("Hi");
        first.begin = 0;
        first.end = 2;
        let mut last = Token::new(".");
        last.begin = 2;
        last.end = 3;
        let tokens = vec![first, last];
        let segmentation = Segmentation::new(vec![vec![0, 1]], Vec::new());
        let sentence = segmentation.sentences(&tokens).next().unwrap();
        assert_eq!(sentence.char_span(), Some((0, 3)));
    }
}
