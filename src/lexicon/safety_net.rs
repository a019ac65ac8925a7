//! Local acceptance with the morphological safety net
//!
//! Acceptance order for a term:
//! 1. membership filter, then the exact common-word set
//! 2. inflectional suffixes (`s`, `es`, `ed`, `ing`, `er`, `est`), tried in
//!    that order; the first one whose stripped base is a 5-letter word passing
//!    step 1 wins
//! 3. US/UK spelling alternates that are 5-letter words passing step 1
//!
//! Bases and alternates only go through step 1, so there is exactly one
//! level of derivation.

use super::exact::ExactSet;
use super::filter::MembershipFilter;
use super::variants::SpellingVariants;
use crate::core::{WORD_LEN, Word, fold};

/// Inflectional suffixes in priority order
pub const SUFFIXES: &[&str] = &["s", "es", "ed", "ing", "er", "est"];

/// Which local path accepted a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalMatch {
    Filter,
    Exact,
    Suffix { base: Word, suffix: &'static str },
    Variant { alternate: Word },
}

/// Filter, curated sets and spelling map, read-only once built
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    filter: Option<MembershipFilter>,
    common: ExactSet,
    exclusions: ExactSet,
    variants: SpellingVariants,
}

impl Lexicon {
    #[must_use]
    pub fn new(common: ExactSet) -> Self {
        Self {
            common,
            variants: SpellingVariants::builtin(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<MembershipFilter>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExactSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub fn with_variants(mut self, variants: SpellingVariants) -> Self {
        self.variants = variants;
        self
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&MembershipFilter> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn common(&self) -> &ExactSet {
        &self.common
    }

    #[must_use]
    pub fn is_excluded(&self, word: &Word) -> bool {
        self.exclusions.contains(word)
    }

    /// True when a loaded filter definitively rules the word out
    #[must_use]
    pub fn filter_rules_out(&self, word: &Word) -> bool {
        self.filter
            .as_ref()
            .is_some_and(|filter| !filter.probably_contains(word))
    }

    /// Whether nothing local is available to answer with
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.is_none() && self.common.is_empty()
    }

    #[must_use]
    pub fn is_accepted_locally(&self, word: &Word) -> bool {
        self.accepts(word.as_str()).is_some()
    }

    /// Run every local path over a term of any length
    ///
    /// The term is folded first, so inflected forms longer than five letters
    /// can still be accepted through their base.
    #[must_use]
    pub fn accepts(&self, raw: &str) -> Option<LocalMatch> {
        let term = fold(raw);

        if let Ok(word) = Word::new(&term) {
            if self.is_excluded(&word) {
                return None;
            }
            if let Some(found) = self.direct_match(&word) {
                return Some(found);
            }
        }

        self.suffix_match(&term)
            .or_else(|| self.variant_match(&term))
    }

    fn direct_match(&self, word: &Word) -> Option<LocalMatch> {
        if self
            .filter
            .as_ref()
            .is_some_and(|filter| filter.probably_contains(word))
        {
            return Some(LocalMatch::Filter);
        }
        self.common.contains(word).then_some(LocalMatch::Exact)
    }

    /// Direct match on a derived candidate, refusing excluded words
    fn derived_match(&self, candidate: &str) -> Option<Word> {
        if candidate.len() != WORD_LEN {
            return None;
        }
        let word = Word::new(candidate).ok()?;
        if self.is_excluded(&word) {
            return None;
        }
        self.direct_match(&word).map(|_| word)
    }

    fn suffix_match(&self, term: &str) -> Option<LocalMatch> {
        SUFFIXES.iter().find_map(|&suffix| {
            let base = term.strip_suffix(suffix)?;
            self.derived_match(base)
                .map(|base| LocalMatch::Suffix { base, suffix })
        })
    }

    fn variant_match(&self, term: &str) -> Option<LocalMatch> {
        self.variants
            .alternates(term)
            .iter()
            .find_map(|alt| self.derived_match(alt))
            .map(|alternate| LocalMatch::Variant { alternate })
    }
}
