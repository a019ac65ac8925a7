//! Probe a filter's false-positive rate with random strings
//!
//! Samples that happen to be known words are skipped, so every hit counted
//! is a genuine false positive.

use crate::core::{WORD_LEN, Word};
use crate::lexicon::{ExactSet, MembershipFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct ProbeResult {
    pub samples: usize,
    pub skipped_known: usize,
    pub false_positives: usize,
    pub bit_length: u32,
    pub hash_count: u32,
    pub fill_ratio: f64,
}

impl ProbeResult {
    /// Measured false-positive rate
    #[must_use]
    pub fn observed_rate(&self) -> f64 {
        let tested = self.samples - self.skipped_known;
        if tested == 0 {
            return 0.0;
        }
        self.false_positives as f64 / tested as f64
    }

    /// Rate predicted from the current fill ratio
    #[must_use]
    pub fn expected_rate(&self) -> f64 {
        self.fill_ratio.powi(self.hash_count as i32)
    }
}

fn random_word(rng: &mut StdRng) -> Word {
    let mut bytes = [0u8; WORD_LEN];
    for b in &mut bytes {
        *b = rng.random_range(b'a'..=b'z');
    }
    Word::from_validated(bytes)
}

/// Test `samples` random strings against `filter`
#[must_use]
pub fn probe_filter(filter: &MembershipFilter, known: &ExactSet, samples: usize, seed: u64) -> ProbeResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut skipped_known = 0;
    let mut false_positives = 0;

    for _ in 0..samples {
        let word = random_word(&mut rng);
        if known.contains(&word) {
            skipped_known += 1;
        } else if filter.probably_contains(&word) {
            false_positives += 1;
        }
    }

    ProbeResult {
        samples,
        skipped_known,
        false_positives,
        bit_length: filter.bit_length(),
        hash_count: filter.hash_count(),
        fill_ratio: filter.fill_ratio(),
    }
}
