//! Main oracle interface
//!
//! Resolution order for one lookup:
//!
//! ```text
//! normalize ─▶ cache ─▶ exclusions ─▶ filter / exact set / safety net ─▶ remote fan-out
//!     │          │           │                      │                           │
//!   format      hit       excluded             local accept            remote / not-found
//! ```
//!
//! Every stage but the fan-out is synchronous and runs to completion before
//! any request is issued. Every resolution except a format failure is cached.

use crate::cache::VerdictCache;
use crate::core::{Reason, Source, Verdict, Word, normalize};
use crate::lexicon::Lexicon;
use crate::remote::{RemoteFanout, RemoteOutcome};

/// Word-validity oracle
///
/// Owns its lexicon, fan-out (with breaker state) and cache, so independent
/// instances never share state.
pub struct Oracle {
    lexicon: Lexicon,
    remote: RemoteFanout,
    cache: VerdictCache,
    trust_filter_negatives: bool,
}

impl Oracle {
    #[must_use]
    pub const fn new(lexicon: Lexicon, remote: RemoteFanout, cache: VerdictCache) -> Self {
        Self {
            lexicon,
            remote,
            cache,
            trust_filter_negatives: true,
        }
    }

    /// Whether a loaded filter's negative ends the lookup locally
    #[must_use]
    pub const fn with_trust_filter_negatives(mut self, trust: bool) -> Self {
        self.trust_filter_negatives = trust;
        self
    }

    #[must_use]
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    #[must_use]
    pub const fn remote(&self) -> &RemoteFanout {
        &self.remote
    }

    #[must_use]
    pub const fn cache(&self) -> &VerdictCache {
        &self.cache
    }

    /// Decide whether `raw` is an acceptable word
    ///
    /// Never fails: malformed input, unreachable providers and broken caches
    /// all end in a `Verdict`. Remote work is bounded by the fan-out timeout.
    pub async fn check_word(&self, raw: &str) -> Verdict {
        let word = match normalize(raw) {
            Ok(word) => word,
            Err(e) => {
                tracing::debug!(input = raw, error = %e, "rejected on shape");
                return Verdict::bad_format();
            }
        };

        self.cache.load_durable().await;
        if let Some(verdict) = self.cache.get(&word) {
            tracing::debug!(%word, ?verdict, "cache hit");
            return verdict;
        }

        let verdict = self.resolve(&word).await;
        tracing::debug!(%word, ?verdict, "resolved");
        self.cache.put(word, verdict);
        verdict
    }

    async fn resolve(&self, word: &Word) -> Verdict {
        if self.lexicon.is_excluded(word) {
            return Verdict::rejected(Source::Local, Reason::Excluded);
        }

        if let Some(found) = self.lexicon.accepts(word.as_str()) {
            tracing::debug!(%word, ?found, "accepted locally");
            return Verdict::accepted(Source::Local);
        }

        if self.trust_filter_negatives && self.lexicon.filter_rules_out(word) {
            return Verdict::rejected(Source::Local, Reason::Absent);
        }

        if self.remote.provider_count() == 0 {
            return Verdict::not_found();
        }
        if !self.remote.has_usable_provider() {
            tracing::debug!(%word, "every provider is circuit-open");
            return Verdict::rejected(Source::None, Reason::Unverified);
        }

        match self.remote.verify(word).await {
            RemoteOutcome::Confirmed { provider } => {
                tracing::debug!(%word, provider, "confirmed remotely");
                Verdict::accepted(Source::Remote)
            }
            RemoteOutcome::Rejected => Verdict::not_found(),
            RemoteOutcome::Unverified => Verdict::rejected(Source::None, Reason::Unverified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DEFAULT_CAPACITY, DurableStore, MemoryStore, TABLE_KEY};
    use crate::error::ProviderError;
    use crate::lexicon::{ExactSet, MembershipFilter};
    use crate::remote::{HttpProvider, MockProvider, Provider};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local endpoint answering every request with `404` and a dictionary's
    /// "no definitions" body
    async fn missing_word_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let body = r#"{"title":"No Definitions Found"}"#;
                let response = format!(
                    "HTTP/1.1 404 Not Found\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/define")
    }

    fn lexicon(words: &[&str]) -> Lexicon {
        Lexicon::new(ExactSet::from_slice(words))
    }

    fn remote(providers: &[&Arc<MockProvider>]) -> RemoteFanout {
        RemoteFanout::new(
            providers
                .iter()
                .map(|&p| Arc::clone(p) as Arc<dyn Provider>)
                .collect(),
        )
    }

    fn oracle(words: &[&str], providers: &[&Arc<MockProvider>]) -> Oracle {
        Oracle::new(lexicon(words), remote(providers), VerdictCache::memory_only())
    }

    fn sparse_filter(words: &[&str]) -> MembershipFilter {
        let mut filter = MembershipFilter::with_rate(1000, 0.001);
        for w in words {
            filter.insert(&Word::new(w).unwrap());
        }
        filter
    }

    #[tokio::test]
    async fn known_word_resolves_locally() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&["crane"], &[&provider]);

        assert_eq!(oracle.check_word("Crane").await, Verdict::accepted(Source::Local));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn bad_shape_is_a_format_rejection() {
        let oracle = oracle(&["crane"], &[]);

        for raw in ["", "cran", "cranes", "cr4ne", "日本語です"] {
            assert_eq!(oracle.check_word(raw).await, Verdict::bad_format(), "{raw:?}");
        }
        assert_eq!(oracle.cache().memo_len(), 0);
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&[], &[&provider]);

        let first = oracle.check_word("quiet").await;
        let second = oracle.check_word("quiet").await;

        assert_eq!(first, Verdict::accepted(Source::Remote));
        assert_eq!(first, second);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn accented_spellings_share_a_cache_entry() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&[], &[&provider]);

        let a = oracle.check_word("RÉSUM").await;
        let b = oracle.check_word("re\u{301}sum").await;

        assert_eq!(a, b);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn negative_remote_answers_are_cached() {
        let provider = MockProvider::new("dict", Ok(false));
        let oracle = oracle(&[], &[&provider]);

        assert_eq!(oracle.check_word("qzxvj").await, Verdict::not_found());
        assert_eq!(oracle.check_word("qzxvj").await, Verdict::not_found());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn auth_failure_isolates_one_provider() {
        let a = MockProvider::new("a", Err(ProviderError::Auth { status: 403 }));
        let b = MockProvider::new("b", Ok(false));
        let oracle = oracle(&[], &[&a, &b]);

        assert_eq!(oracle.check_word("qzxvj").await, Verdict::not_found());
        assert_eq!(oracle.check_word("vjqzx").await, Verdict::not_found());

        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn all_circuits_open_is_unverified() {
        let a = MockProvider::new("a", Err(ProviderError::Auth { status: 401 }));
        let oracle = oracle(&[], &[&a]);

        let unverified = Verdict::rejected(Source::None, Reason::Unverified);
        assert_eq!(oracle.check_word("qzxvj").await, unverified);
        assert_eq!(oracle.check_word("vjqzx").await, unverified);
        assert_eq!(a.calls(), 1);
    }

    #[tokio::test]
    async fn safety_net_variant_needs_no_remote_call() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&["meter"], &[&provider]);

        assert_eq!(oracle.check_word("METRE").await, Verdict::accepted(Source::Local));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn inflected_forms_resolve_through_the_lexicon() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&["house"], &[&provider]);

        // A plural of a known word is accepted by the safety net, yet only
        // five-letter input passes `normalize`, so the same plural given to
        // `check_word` ends as a format rejection. Both halves are intended.
        assert!(oracle.lexicon().accepts("houses").is_some());
        assert_eq!(oracle.check_word("houses").await, Verdict::bad_format());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_word_without_filter_or_providers() {
        let oracle = oracle(&["stare"], &[]);

        let verdict = oracle.check_word("stars").await;
        assert_eq!(
            verdict,
            Verdict {
                valid: false,
                source: Source::None,
                reason: Some(Reason::NotFound)
            }
        );
    }

    #[tokio::test]
    async fn definitive_filter_negative_skips_remote() {
        let provider = MockProvider::new("dict", Ok(true));
        let lexicon = Lexicon::default().with_filter(Some(sparse_filter(&["crane"])));
        let oracle = Oracle::new(lexicon, remote(&[&provider]), VerdictCache::memory_only());

        let verdict = oracle.check_word("zzzzz").await;
        assert!(!verdict.valid);
        assert_eq!(verdict, Verdict::rejected(Source::Local, Reason::Absent));
        assert_eq!(provider.calls(), 0);

        assert_eq!(oracle.check_word("crane").await, Verdict::accepted(Source::Local));
    }

    #[tokio::test]
    async fn untrusted_filter_negative_goes_remote() {
        let provider = MockProvider::new("dict", Ok(true));
        let lexicon = Lexicon::default().with_filter(Some(sparse_filter(&["crane"])));
        let oracle = Oracle::new(lexicon, remote(&[&provider]), VerdictCache::memory_only())
            .with_trust_filter_negatives(false);

        assert_eq!(oracle.check_word("quiet").await, Verdict::accepted(Source::Remote));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn exclusions_win_over_every_source() {
        let provider = MockProvider::new("dict", Ok(true));
        let lexicon = lexicon(&["qwert"]).with_exclusions(ExactSet::from_slice(&["qwert"]));
        let oracle = Oracle::new(lexicon, remote(&[&provider]), VerdictCache::memory_only());

        assert_eq!(
            oracle.check_word("qwert").await,
            Verdict::rejected(Source::Local, Reason::Excluded)
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn unverified_is_memoized_but_not_persisted() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let provider = MockProvider::new("dict", Err(ProviderError::Transport("connection refused".into())));
        let oracle = Oracle::new(
            lexicon(&[]),
            remote(&[&provider]),
            VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY),
        );

        let unverified = Verdict::rejected(Source::None, Reason::Unverified);
        assert_eq!(oracle.check_word("quiet").await, unverified);
        assert_eq!(oracle.check_word("quiet").await, unverified);
        assert_eq!(provider.calls(), 1);

        oracle.cache().flush().unwrap();
        let next = VerdictCache::new(store, DEFAULT_CAPACITY);
        assert_eq!(next.get(&Word::new("quiet").unwrap()), None);
    }

    #[tokio::test]
    async fn dictionary_404_is_a_persisted_not_found() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        let provider = HttpProvider::new("dict", missing_word_endpoint().await, Duration::from_secs(2)).unwrap();
        let oracle = Oracle::new(
            lexicon(&[]),
            RemoteFanout::new(vec![Arc::new(provider) as Arc<dyn Provider>]),
            VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY),
        );

        assert_eq!(oracle.check_word("qzxvj").await, Verdict::not_found());
        oracle.cache().flush().unwrap();

        let raw = store.get(TABLE_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[["qzxvj",{"valid":false,"source":"none","reason":"not-found"}]]"#
        );
        let next = VerdictCache::new(store, DEFAULT_CAPACITY);
        assert_eq!(next.get(&Word::new("qzxvj").unwrap()), Some(Verdict::not_found()));
    }

    #[tokio::test]
    async fn durable_tier_spares_the_next_session() {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let first_provider = MockProvider::new("dict", Ok(true));
        let first = Oracle::new(
            lexicon(&[]),
            remote(&[&first_provider]),
            VerdictCache::new(Arc::clone(&store), DEFAULT_CAPACITY),
        );
        assert_eq!(first.check_word("quiet").await, Verdict::accepted(Source::Remote));
        first.cache().flush().unwrap();

        let second_provider = MockProvider::new("dict", Ok(false));
        let second = Oracle::new(
            lexicon(&[]),
            remote(&[&second_provider]),
            VerdictCache::new(store, DEFAULT_CAPACITY),
        );
        assert_eq!(second.check_word("QUIET").await, Verdict::accepted(Source::Remote));
        assert_eq!(second_provider.calls(), 0);
    }

    #[tokio::test]
    async fn lookups_for_different_words_run_concurrently() {
        let provider = MockProvider::new("dict", Ok(true));
        let oracle = oracle(&["crane"], &[&provider]);

        let (a, b, c) = tokio::join!(
            oracle.check_word("crane"),
            oracle.check_word("quiet"),
            oracle.check_word("x"),
        );
        assert_eq!(a, Verdict::accepted(Source::Local));
        assert_eq!(b, Verdict::accepted(Source::Remote));
        assert_eq!(c, Verdict::bad_format());
    }
}
