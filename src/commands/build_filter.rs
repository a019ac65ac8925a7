//! Build a membership filter asset from a word list

use crate::lexicon::MembershipFilter;
use crate::wordlists::loader::load_from_file;
use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};

/// Default target false-positive rate
pub const DEFAULT_FP_RATE: f64 = 0.01;

#[derive(Debug)]
pub struct BuildFilterResult {
    pub words: usize,
    pub bit_length: u32,
    pub hash_count: u32,
    pub fill_ratio: f64,
    pub bytes: usize,
    pub output: PathBuf,
}

/// Read `input`, size a filter for `fp_rate` and write it to `output`
///
/// # Errors
/// Returns an error if the rate is outside `(0, 1)`, the word list is
/// unreadable or empty, or the asset cannot be written.
pub fn build_filter(input: &Path, output: &Path, fp_rate: f64) -> Result<BuildFilterResult> {
    ensure!(
        fp_rate > 0.0 && fp_rate < 1.0,
        "false-positive rate must be between 0 and 1, got {fp_rate}"
    );

    let mut words = load_from_file(input)
        .with_context(|| format!("cannot load word list {}", input.display()))?;
    words.sort_unstable();
    words.dedup();
    ensure!(!words.is_empty(), "word list {} is empty", input.display());

    let filter = MembershipFilter::from_words(&words, fp_rate);
    let json = filter.to_asset_json()?;
    fs::write(output, &json).with_context(|| format!("cannot write {}", output.display()))?;

    tracing::info!(
        words = words.len(),
        bits = filter.bit_length(),
        hashes = filter.hash_count(),
        output = %output.display(),
        "filter written"
    );

    Ok(BuildFilterResult {
        words: words.len(),
        bit_length: filter.bit_length(),
        hash_count: filter.hash_count(),
        fill_ratio: filter.fill_ratio(),
        bytes: json.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    #[test]
    fn built_asset_loads_and_contains_every_word() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("words.txt");
        let output = dir.path().join("filter.json");
        fs::write(&input, "crane\nslate\nCRANE\nhouse\n").unwrap();

        let result = build_filter(&input, &output, DEFAULT_FP_RATE).unwrap();
        assert_eq!(result.words, 3);
        assert!(result.fill_ratio > 0.0 && result.fill_ratio < 1.0);

        let filter = MembershipFilter::load(&output).unwrap();
        assert_eq!(filter.bit_length(), result.bit_length);
        for w in ["crane", "slate", "house"] {
            assert!(filter.probably_contains(&Word::new(w).unwrap()));
        }
    }

    #[test]
    fn rejects_bad_rate_and_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("words.txt");
        let output = dir.path().join("filter.json");

        fs::write(&input, "crane\n").unwrap();
        assert!(build_filter(&input, &output, 0.0).is_err());
        assert!(build_filter(&input, &output, 1.5).is_err());

        fs::write(&input, "# nothing here\n").unwrap();
        assert!(build_filter(&input, &output, DEFAULT_FP_RATE).is_err());
        assert!(!output.exists());
    }
}
