//! Exact curated word sets

use crate::core::Word;
use crate::wordlists::loader::words_from_slice;
use rustc_hash::FxHashSet;

/// Deterministic set of curated words, immutable once built
#[derive(Debug, Clone, Default)]
pub struct ExactSet {
    words: FxHashSet<Word>,
}

impl ExactSet {
    /// Build a set from embedded string constants, skipping malformed entries
    #[must_use]
    pub fn from_slice(slice: &[&str]) -> Self {
        words_from_slice(slice).into_iter().collect()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

impl FromIterator<Word> for ExactSet {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}
