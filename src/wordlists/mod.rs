//! Word lists for the oracle
//!
//! Provides the embedded seed lists used when no word-list asset is reachable.

mod embedded;
pub mod loader;

pub use embedded::{COMMON, COMMON_COUNT, EXCLUSIONS, EXCLUSIONS_COUNT};
