//! Local word knowledge
//!
//! Everything the oracle can answer without touching the network.

mod exact;
mod filter;
mod safety_net;
mod variants;

pub use exact::ExactSet;
pub use filter::{MAX_HASH_COUNT, MembershipFilter};
pub use safety_net::{Lexicon, LocalMatch, SUFFIXES};
pub use variants::SpellingVariants;
