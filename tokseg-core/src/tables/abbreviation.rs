//! Abbreviation trie
//!
//! Compact trie over the abbreviation lists. Lookups walk forward over the
//! candidate word and never allocate.

use std::collections::HashMap;

/// How an abbreviation behaves at a possible sentence end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbrevClass {
    /// Titles and the like, never sentence-final
    NeverFinal,
    /// Protected only when a number follows ("Fig. 2")
    BeforeNumber,
    /// May end a sentence ("Inc.", "etc.")
    PossiblyFinal,
}

/// Trie node using array indices instead of pointers
#[derive(Debug, Clone)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Class if an abbreviation ends here
    class: Option<AbbrevClass>,
}

impl TrieNode {
    fn empty() -> Self {
        Self {
            children: HashMap::new(),
            class: None,
        }
    }
}

/// Case-sensitive abbreviation trie
#[derive(Debug, Clone)]
pub struct AbbreviationTrie {
    nodes: Vec<TrieNode>,
}

impl Default for AbbreviationTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl AbbreviationTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::empty()],
        }
    }

    /// Build from lists of abbreviations per class
    pub fn from_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = (AbbrevClass, &'a [String])>,
    {
        let mut trie = Self::new();
        for (class, words) in lists {
            for word in words {
                trie.insert(word, class);
            }
        }
        trie
    }

    /// Insert an abbreviation (without its trailing period)
    pub fn insert(&mut self, abbreviation: &str, class: AbbrevClass) {
        let mut current = 0u32;
        for ch in abbreviation.chars() {
            current = match self.nodes[current as usize].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::empty());
                    self.nodes[current as usize].children.insert(ch, new_idx);
                    new_idx
                }
            };
        }
        self.nodes[current as usize].class = Some(class);
    }

    /// Class of `word` if it is a known abbreviation
    pub fn lookup<I>(&self, word: I) -> Option<AbbrevClass>
    where
        I: IntoIterator<Item = char>,
    {
        let mut current = 0u32;
        for ch in word {
            current = *self.nodes[current as usize].children.get(&ch)?;
        }
        self.nodes[current as usize].class
    }

    /// Number of stored abbreviations
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.class.is_some()).count()
    }

    /// Whether the trie holds no abbreviations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
