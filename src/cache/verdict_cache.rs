//! Two-tier verdict cache
//!
//! Tier one is a session memo, authoritative for the life of the process.
//! Tier two is a durable table kept under a single versioned key, loaded once
//! on the blocking pool and rewritten in the background after new
//! resolutions. Rewrites coalesce: while one is queued, further resolutions
//! ride along with it. The durable table is capped; the oldest insertions go
//! first.
//!
//! Durable failures never reach callers: unreadable or corrupt data is an
//! empty table and failed writes are logged and dropped.

use super::store::DurableStore;
use crate::core::{Verdict, Word};
use crate::error::CacheError;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Key holding the serialized durable table
pub const TABLE_KEY: &str = "wordle-oracle.verdicts.v1";

/// Default cap on durable entries
pub const DEFAULT_CAPACITY: usize = 5000;

/// Insertion-ordered, size-bounded map persisted as `[[word, verdict], ...]`
#[derive(Debug, Default)]
struct DurableTable {
    order: VecDeque<Word>,
    entries: FxHashMap<Word, Verdict>,
}

impl DurableTable {
    fn parse(json: &str) -> Result<Self, CacheError> {
        let pairs: Vec<(Word, Verdict)> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (word, verdict) in pairs {
            table.insert(word, verdict, usize::MAX);
        }
        Ok(table)
    }

    fn to_json(&self) -> Result<String, CacheError> {
        let pairs: Vec<(&Word, &Verdict)> = self
            .order
            .iter()
            .filter_map(|word| self.entries.get(word).map(|verdict| (word, verdict)))
            .collect();
        Ok(serde_json::to_string(&pairs)?)
    }

    fn insert(&mut self, word: Word, verdict: Verdict, capacity: usize) {
        if self.entries.insert(word, verdict).is_none() {
            self.order.push_back(word);
        }
        while self.order.len() > capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }
}

struct DurableTier {
    store: Arc<dyn DurableStore>,
    capacity: usize,
    table: Mutex<Option<DurableTable>>,
    // Serializes snapshot+write so the last write always carries the newest table
    write_gate: Mutex<()>,
    // Set while a background write is queued and has not yet taken its snapshot
    write_pending: AtomicBool,
}

impl DurableTier {
    fn with_table<R>(&self, f: impl FnOnce(&mut DurableTable) -> R) -> R {
        let mut guard = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let table = guard.get_or_insert_with(|| self.load());
        f(table)
    }

    fn is_loaded(&self) -> bool {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn load(&self) -> DurableTable {
        match self.store.get(TABLE_KEY) {
            Ok(Some(json)) => DurableTable::parse(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "durable verdict table is corrupt, starting empty");
                DurableTable::default()
            }),
            Ok(None) => DurableTable::default(),
            Err(e) => {
                tracing::warn!(error = %e, "durable verdict table unreadable, starting empty");
                DurableTable::default()
            }
        }
    }

    fn write_snapshot(&self) -> Result<(), CacheError> {
        let _gate = self.write_gate.lock().unwrap_or_else(PoisonError::into_inner);
        // Cleared before the snapshot, so any later insert queues a fresh write
        self.write_pending.store(false, Ordering::SeqCst);
        let json = {
            let guard = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            match guard.as_ref() {
                Some(table) => table.to_json()?,
                None => return Ok(()),
            }
        };
        self.store.set(TABLE_KEY, &json)
    }

    fn persist_in_background(self: &Arc<Self>) {
        if self.write_pending.swap(true, Ordering::SeqCst) {
            return;
        }
        let tier = Arc::clone(self);
        let write = move || {
            if let Err(e) = tier.write_snapshot() {
                tracing::warn!(error = %e, "failed to persist verdict table");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(write);
            }
            Err(_) => write(),
        }
    }
}

/// Session memo in front of an optional durable table
pub struct VerdictCache {
    memo: Mutex<FxHashMap<Word, Verdict>>,
    durable: Option<Arc<DurableTier>>,
}

impl Default for VerdictCache {
    fn default() -> Self {
        Self::memory_only()
    }
}

impl VerdictCache {
    /// Cache with no durable tier
    #[must_use]
    pub fn memory_only() -> Self {
        Self {
            memo: Mutex::new(FxHashMap::default()),
            durable: None,
        }
    }

    /// Cache backed by `store`, keeping at most `capacity` durable entries
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>, capacity: usize) -> Self {
        Self {
            memo: Mutex::new(FxHashMap::default()),
            durable: Some(Arc::new(DurableTier {
                store,
                capacity: capacity.max(1),
                table: Mutex::new(None),
                write_gate: Mutex::new(()),
                write_pending: AtomicBool::new(false),
            })),
        }
    }

    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable.is_some()
    }

    /// Read the durable table on the blocking pool
    ///
    /// Does nothing once the table is in memory. `get` still loads it lazily
    /// for callers that skip this step.
    pub async fn load_durable(&self) {
        let Some(tier) = &self.durable else {
            return;
        };
        if tier.is_loaded() {
            return;
        }

        let tier = Arc::clone(tier);
        if let Err(e) = tokio::task::spawn_blocking(move || tier.with_table(|_| ())).await {
            tracing::warn!(error = %e, "durable verdict table load did not finish");
        }
    }

    /// Look up a verdict, consulting the memo first and then the durable table
    ///
    /// Durable hits are mirrored into the memo.
    pub fn get(&self, word: &Word) -> Option<Verdict> {
        if let Some(verdict) = self.memo().get(word).copied() {
            return Some(verdict);
        }

        let verdict = self
            .durable
            .as_ref()?
            .with_table(|table| table.entries.get(word).copied())?;

        tracing::debug!(%word, "durable cache hit");
        self.memo().insert(*word, verdict);
        Some(verdict)
    }

    /// Record a verdict in the memo and, when durable, in the durable table
    ///
    /// The durable write happens in the background and is shared with any
    /// write already queued; this never blocks on it.
    pub fn put(&self, word: Word, verdict: Verdict) {
        self.memo().insert(word, verdict);

        let Some(tier) = &self.durable else {
            return;
        };
        if !verdict.is_durable() {
            return;
        }

        tier.with_table(|table| table.insert(word, verdict, tier.capacity));
        tier.persist_in_background();
    }

    /// Write the durable table now and report failures
    ///
    /// # Errors
    /// Returns `CacheError` if the table cannot be serialized or stored.
    pub fn flush(&self) -> Result<(), CacheError> {
        match &self.durable {
            Some(tier) => tier.write_snapshot(),
            None => Ok(()),
        }
    }

    /// Number of verdicts memoized this session
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo().len()
    }

    fn memo(&self) -> std::sync::MutexGuard<'_, FxHashMap<Word, Verdict>> {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;
    use crate::core::{Reason, Source};
    use std::sync::atomic::AtomicUsize;
    use std::thread::{self, ThreadId};
    use std::time::Duration;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl DurableStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::Io(std::io::Error::other("read-only")))
        }
    }

    /// Store counting writes, whose `set` waits while `gate` is held
    #[derive(Default)]
    struct GatedStore {
        inner: MemoryStore,
        sets: AtomicUsize,
        gate: Mutex<()>,
    }

    impl DurableStore for GatedStore {
        fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
            let _open = self.gate.lock().unwrap();
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }
    }

    /// Store remembering which thread read it
    #[derive(Default)]
    struct ThreadTrackingStore {
        inner: MemoryStore,
        readers: Mutex<Vec<ThreadId>>,
    }

    impl DurableStore for ThreadTrackingStore {
        fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.readers.lock().unwrap().push(thread::current().id());
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
            self.inner.set(key, value)
        }
    }

    fn distinct_words(count: usize) -> Vec<Word> {
        (0..count)
            .map(|i| {
                let bytes = [b'a' + (i / 26) as u8, b'a' + (i % 26) as u8, b'q', b'x', b'z'];
                Word::new(std::str::from_utf8(&bytes).unwrap()).unwrap()
            })
            .collect()
    }

    #[test]
    fn memo_only_round_trip() {
        let cache = VerdictCache::memory_only();
        assert_eq!(cache.get(&word("crane")), None);

        cache.put(word("crane"), Verdict::accepted(Source::Local));
        assert_eq!(cache.get(&word("crane")), Some(Verdict::accepted(Source::Local)));
        assert_eq!(cache.memo_len(), 1);
        assert!(cache.flush().is_ok());
    }

    #[test]
    fn survives_a_new_session() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let first = VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY);
        first.put(word("crane"), Verdict::accepted(Source::Remote));
        first.put(word("zzzzz"), Verdict::not_found());
        first.flush().unwrap();

        let second = VerdictCache::new(store, DEFAULT_CAPACITY);
        assert_eq!(second.memo_len(), 0);
        assert_eq!(second.get(&word("crane")), Some(Verdict::accepted(Source::Remote)));
        assert_eq!(second.get(&word("zzzzz")), Some(Verdict::not_found()));
        // Hits are mirrored into the memo
        assert_eq!(second.memo_len(), 2);
    }

    #[test]
    fn table_layout_is_ordered_pairs() {
        let store = Arc::new(MemoryStore::new());
        let cache = VerdictCache::new(store.clone(), DEFAULT_CAPACITY);
        cache.put(word("house"), Verdict::accepted(Source::Local));
        cache.flush().unwrap();

        let raw = store.get(TABLE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[["house",{"valid":true,"source":"local"}]]"#);
    }

    #[test]
    fn corrupt_table_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(TABLE_KEY, "{not json").unwrap();

        let cache = VerdictCache::new(store.clone(), DEFAULT_CAPACITY);
        assert_eq!(cache.get(&word("crane")), None);

        // The next write replaces the corrupt payload
        cache.put(word("crane"), Verdict::accepted(Source::Local));
        cache.flush().unwrap();
        let fresh = VerdictCache::new(store, DEFAULT_CAPACITY);
        assert!(fresh.get(&word("crane")).is_some());
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let cache = VerdictCache::new(Arc::clone(&store), 2);
        for w in ["crane", "slate", "irate"] {
            cache.put(word(w), Verdict::accepted(Source::Local));
        }
        cache.flush().unwrap();

        let reloaded = VerdictCache::new(store, 2);
        assert_eq!(reloaded.get(&word("crane")), None);
        assert!(reloaded.get(&word("slate")).is_some());
        assert!(reloaded.get(&word("irate")).is_some());
        // The session memo is not bounded
        assert!(cache.get(&word("crane")).is_some());
    }

    #[test]
    fn rewriting_a_word_keeps_its_slot() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let cache = VerdictCache::new(Arc::clone(&store), 2);
        cache.put(word("crane"), Verdict::not_found());
        cache.put(word("slate"), Verdict::accepted(Source::Local));
        cache.put(word("crane"), Verdict::accepted(Source::Remote));
        cache.flush().unwrap();

        let reloaded = VerdictCache::new(store, 2);
        assert_eq!(reloaded.get(&word("crane")), Some(Verdict::accepted(Source::Remote)));
        assert!(reloaded.get(&word("slate")).is_some());
    }

    #[test]
    fn unverified_stays_in_the_session() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let cache = VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY);
        let unverified = Verdict::rejected(Source::None, Reason::Unverified);

        cache.put(word("crane"), unverified);
        cache.flush().unwrap();
        assert_eq!(cache.get(&word("crane")), Some(unverified));

        let next_session = VerdictCache::new(store, DEFAULT_CAPACITY);
        assert_eq!(next_session.get(&word("crane")), None);
    }

    #[test]
    fn write_failures_are_not_fatal() {
        let cache = VerdictCache::new(Arc::new(ReadOnlyStore), DEFAULT_CAPACITY);
        cache.put(word("crane"), Verdict::accepted(Source::Local));

        assert_eq!(cache.get(&word("crane")), Some(Verdict::accepted(Source::Local)));
        assert!(cache.flush().is_err());
    }

    #[tokio::test]
    async fn background_write_inside_runtime() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let cache = VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY);
        cache.put(word("crane"), Verdict::accepted(Source::Local));

        // Wait for the spawned write without calling flush
        for _ in 0..100 {
            if store.get(TABLE_KEY).unwrap().is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let raw = store.get(TABLE_KEY).unwrap().expect("background write landed");
        assert!(raw.contains("crane"));
    }

    #[tokio::test]
    async fn queued_writes_coalesce() {
        let store = Arc::new(GatedStore::default());
        let cache = VerdictCache::new(store.clone(), DEFAULT_CAPACITY);
        let words = distinct_words(200);

        // Hold writers at the store so puts pile up behind the first one
        let held = store.gate.lock().unwrap();
        for &w in &words {
            cache.put(w, Verdict::not_found());
        }
        drop(held);

        let mut stored = 0;
        for _ in 0..200 {
            if let Some(raw) = store.get(TABLE_KEY).unwrap() {
                stored = serde_json::from_str::<Vec<serde_json::Value>>(&raw).unwrap().len();
                if stored == words.len() {
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(stored, words.len());
        let sets = store.sets.load(Ordering::SeqCst);
        assert!((1..=2).contains(&sets), "{sets} writes for {} puts", words.len());
    }

    #[tokio::test]
    async fn durable_table_loads_off_the_executor() {
        let store = Arc::new(ThreadTrackingStore::default());
        let seed = VerdictCache::new(store.clone(), DEFAULT_CAPACITY);
        seed.put(word("crane"), Verdict::accepted(Source::Remote));
        seed.flush().unwrap();
        store.readers.lock().unwrap().clear();

        let cache = VerdictCache::new(store.clone(), DEFAULT_CAPACITY);
        cache.load_durable().await;
        cache.load_durable().await;

        let readers = store.readers.lock().unwrap().clone();
        assert_eq!(readers.len(), 1);
        assert_ne!(readers[0], thread::current().id());

        assert_eq!(cache.get(&word("crane")), Some(Verdict::accepted(Source::Remote)));
        assert_eq!(store.readers.lock().unwrap().len(), 1);
    }
}
