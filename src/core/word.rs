//! Normalized 5-letter word
//!
//! A `Word` is only ever produced by the normalizer, so holding one proves the
//! text is exactly five lowercase ASCII letters.

use super::normalize::normalize;
use crate::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of letters in every puzzle word
pub const WORD_LEN: usize = 5;

/// A normalized 5-letter word, used as the cache key everywhere
///
/// Cheap to copy; stored as raw ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word([u8; WORD_LEN]);

impl Word {
    /// Normalize raw input into a Word
    ///
    /// # Errors
    /// Returns `ShapeError` if the folded text is not exactly five ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::Word;
    ///
    /// let word = Word::new(" Crâne ").unwrap();
    /// assert_eq!(word.as_str(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, ShapeError> {
        normalize(raw)
    }

    /// Wrap bytes the normalizer has already validated
    pub(crate) const fn from_validated(bytes: [u8; WORD_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the word as a string slice
    ///
    /// # Panics
    /// Will not panic - the bytes are validated ASCII on construction.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).expect("word bytes are validated ASCII")
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }
}

impl FromStr for Word {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = ShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.as_str().to_owned()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
