//! Core domain types for the oracle
//!
//! Pure value types with no I/O: the normalized `Word`, the normalizer itself
//! and the `Verdict` handed back to callers.

mod normalize;
mod verdict;
mod word;

pub use normalize::{fold, normalize};
pub use verdict::{Reason, Source, Verdict};
pub use word::{WORD_LEN, Word};
