//! Word list loading utilities
//!
//! Word-list assets are either line-oriented text or a JSON array of strings.
//! Entries that do not normalize to a 5-letter word are skipped.

use crate::core::Word;
use crate::error::AssetError;
use std::fs;
use std::path::Path;

/// Load words from a file
///
/// # Errors
///
/// Returns `AssetError` if the file cannot be read, or if it looks like a
/// JSON array but does not parse as one.
///
/// # Examples
/// ```no_run
/// use wordle_oracle::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/common.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, AssetError> {
    let content = fs::read_to_string(path)?;
    parse_word_list(&content)
}

/// Parse a word list from text, detecting JSON arrays by their leading `[`
///
/// # Errors
///
/// Returns `AssetError::Json` for malformed JSON arrays.
pub fn parse_word_list(content: &str) -> Result<Vec<Word>, AssetError> {
    if content.trim_start().starts_with('[') {
        let entries: Vec<String> = serde_json::from_str(content)?;
        return Ok(entries.iter().filter_map(|s| Word::new(s).ok()).collect());
    }

    let words = content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .collect();

    Ok(words)
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use wordle_oracle::wordlists::loader::words_from_slice;
/// use wordle_oracle::wordlists::COMMON;
///
/// let words = words_from_slice(COMMON);
/// assert_eq!(words.len(), COMMON.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
