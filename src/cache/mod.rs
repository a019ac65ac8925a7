//! Verdict caching
//!
//! A process-local memo backed by a best-effort durable key/value store.

mod store;
mod verdict_cache;

pub use store::{DurableStore, FileStore, MemoryStore};
pub use verdict_cache::{DEFAULT_CAPACITY, TABLE_KEY, VerdictCache};
