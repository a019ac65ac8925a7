//! Approximate membership filter
//!
//! A Bloom-style bit array probed at `k` positions derived by double hashing
//! two 32-bit FNV-style hashes of the word's bytes:
//!
//! ```text
//! position_i = |h1 + i * h2| mod m      (32-bit signed wrapping arithmetic)
//! ```
//!
//! Bits are addressed least-significant-bit first within each byte. The asset
//! format is `{"m": <bit length>, "k": <hash count>, "bits": "<base64>"}`.

use crate::core::Word;
use crate::error::AssetError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;
use std::fs;
use std::path::Path;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;
const MIX_OFFSET: u32 = 0x9e37_79b9;
const MIX_PRIME: u32 = 0x5bd1_e995;

/// Upper bound on `k`; assets claiming more are rejected as corrupt
pub const MAX_HASH_COUNT: u32 = 32;

/// Serialized form of a filter
#[derive(Debug, Serialize, Deserialize)]
struct FilterAsset {
    m: u32,
    k: u32,
    bits: String,
}

/// Probabilistic set with no false negatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipFilter {
    bit_length: u32,
    hash_count: u32,
    bits: Vec<u8>,
}

impl MembershipFilter {
    /// Create an empty filter
    ///
    /// # Errors
    /// Returns `AssetError::Invalid` if `bit_length` is zero or `hash_count`
    /// is outside `1..=MAX_HASH_COUNT`.
    pub fn new(bit_length: u32, hash_count: u32) -> Result<Self, AssetError> {
        let bytes = bit_length.div_ceil(8) as usize;
        Self::from_parts(bit_length, hash_count, vec![0; bytes])
    }

    /// Create an empty filter sized for `expected` words at `fp_rate`
    ///
    /// Uses the textbook optimum `m = -n ln p / (ln 2)^2`, `k = (m / n) ln 2`.
    #[must_use]
    pub fn with_rate(expected: usize, fp_rate: f64) -> Self {
        let n = expected.max(1) as f64;
        let p = fp_rate.clamp(1e-9, 0.5);

        let m = (-n * p.ln() / (LN_2 * LN_2)).ceil().clamp(8.0, f64::from(u32::MAX));
        let k = (m / n * LN_2).round().clamp(1.0, f64::from(MAX_HASH_COUNT));

        let bit_length = m as u32;
        Self {
            bit_length,
            hash_count: k as u32,
            bits: vec![0; bit_length.div_ceil(8) as usize],
        }
    }

    /// Build a filter holding every word in `words`
    #[must_use]
    pub fn from_words(words: &[Word], fp_rate: f64) -> Self {
        let mut filter = Self::with_rate(words.len(), fp_rate);
        for word in words {
            filter.insert(word);
        }
        filter
    }

    /// Assemble a filter from raw parts, validating them
    ///
    /// # Errors
    /// Returns `AssetError::Invalid` if the parameters are out of range or
    /// `bits` is too short to hold `bit_length` bits.
    pub fn from_parts(bit_length: u32, hash_count: u32, bits: Vec<u8>) -> Result<Self, AssetError> {
        if bit_length == 0 {
            return Err(AssetError::Invalid("bit length must be positive".into()));
        }
        if hash_count == 0 || hash_count > MAX_HASH_COUNT {
            return Err(AssetError::Invalid(format!(
                "hash count {hash_count} outside 1..={MAX_HASH_COUNT}"
            )));
        }
        let needed = bit_length.div_ceil(8) as usize;
        if bits.len() < needed {
            return Err(AssetError::Invalid(format!(
                "{} bytes cannot hold {bit_length} bits",
                bits.len()
            )));
        }

        Ok(Self {
            bit_length,
            hash_count,
            bits,
        })
    }

    /// Parse a serialized `{m, k, bits}` asset
    ///
    /// # Errors
    /// Returns `AssetError` if the JSON, the base64 payload or the parameters
    /// are invalid.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let asset: FilterAsset = serde_json::from_str(json)?;
        let bits = STANDARD.decode(asset.bits.trim())?;
        Self::from_parts(asset.m, asset.k, bits)
    }

    /// Load a filter asset from disk
    ///
    /// # Errors
    /// Returns `AssetError` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize into the `{m, k, bits}` asset format
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_asset_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&FilterAsset {
            m: self.bit_length,
            k: self.hash_count,
            bits: STANDARD.encode(&self.bits),
        })
    }

    /// Add a word
    pub fn insert(&mut self, word: &Word) {
        for pos in self.positions(word) {
            self.bits[(pos >> 3) as usize] |= 1 << (pos & 7);
        }
    }

    /// `false` means definitely absent; `true` means possibly present
    #[must_use]
    pub fn probably_contains(&self, word: &Word) -> bool {
        self.positions(word)
            .all(|pos| self.bits[(pos >> 3) as usize] & (1 << (pos & 7)) != 0)
    }

    #[inline]
    #[must_use]
    pub const fn bit_length(&self) -> u32 {
        self.bit_length
    }

    #[inline]
    #[must_use]
    pub const fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// Fraction of bits set, a rough saturation gauge
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        let set: u32 = self.bits.iter().map(|b| b.count_ones()).sum();
        f64::from(set) / f64::from(self.bit_length)
    }

    // Owns its state so `insert` can write bits while iterating
    fn positions(&self, word: &Word) -> impl Iterator<Item = u32> + use<> {
        let (h1, h2) = hash_pair(word.as_bytes());
        let m = self.bit_length;
        (0..self.hash_count).map(move |i| {
            let combined = (h1 as i32).wrapping_add((i as i32).wrapping_mul(h2 as i32));
            combined.unsigned_abs() % m
        })
    }
}

fn hash_pair(bytes: &[u8]) -> (u32, u32) {
    let mut h1 = FNV_OFFSET;
    let mut h2 = MIX_OFFSET;
    for &b in bytes {
        h1 ^= u32::from(b);
        h1 = h1.wrapping_mul(FNV_PRIME);
        h2 ^= u32::from(b);
        h2 = h2.wrapping_mul(MIX_PRIME);
    }
    h2 ^= h2 >> 15;
    (h1, h2)
}
