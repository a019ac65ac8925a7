//! Input normalization
//!
//! The only place shape validation happens. Pure and allocation-light.

use super::word::{WORD_LEN, Word};
use crate::error::ShapeError;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold raw text to its canonical lowercase form without checking shape
///
/// Trims surrounding whitespace, applies canonical decomposition (NFD), drops
/// combining marks and lower-cases. `"  Résumé "` folds to `"resume"`.
#[must_use]
pub fn fold(raw: &str) -> String {
    raw.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Fold raw input and check it is exactly five ASCII letters
///
/// # Errors
/// Returns `ShapeError::InvalidLength` when the folded text is not five
/// characters long, and `ShapeError::InvalidCharacters` when any character is
/// not an ASCII letter.
pub fn normalize(raw: &str) -> Result<Word, ShapeError> {
    let text = fold(raw);

    let len = text.chars().count();
    if len != WORD_LEN {
        return Err(ShapeError::InvalidLength { text, len });
    }

    let Ok(bytes) = <[u8; WORD_LEN]>::try_from(text.as_bytes()) else {
        // Five chars but more than five bytes: something non-ASCII survived
        return Err(ShapeError::InvalidCharacters { text });
    };

    if !bytes.iter().all(u8::is_ascii_lowercase) {
        return Err(ShapeError::InvalidCharacters { text });
    }

    Ok(Word::from_validated(bytes))
}
