//! Assemble an `Oracle` from configuration
//!
//! Asset failures degrade rather than abort: a missing filter leaves the
//! lexicon filterless, unreadable word lists fall back to the embedded seed.

use super::Oracle;
use crate::cache::{DurableStore, FileStore, VerdictCache};
use crate::config::OracleConfig;
use crate::lexicon::{ExactSet, Lexicon, MembershipFilter};
use crate::remote::{CircuitBreaker, HttpProvider, Provider, RemoteFanout};
use crate::wordlists::{COMMON, EXCLUSIONS, loader::load_from_file};
use std::path::Path;
use std::sync::Arc;

pub struct OracleBuilder {
    config: OracleConfig,
    lexicon: Option<Lexicon>,
    providers: Vec<Arc<dyn Provider>>,
    store: Option<Arc<dyn DurableStore>>,
}

impl OracleBuilder {
    #[must_use]
    pub const fn new(config: OracleConfig) -> Self {
        Self {
            config,
            lexicon: None,
            providers: Vec::new(),
            store: None,
        }
    }

    /// Use this lexicon instead of loading one from the configured paths
    #[must_use]
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Add a provider after the configured HTTP ones
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Back the durable tier with this store instead of the cache directory
    #[must_use]
    pub fn store(mut self, store: Arc<dyn DurableStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn build(self) -> Oracle {
        let config = self.config;
        let lexicon = self.lexicon.unwrap_or_else(|| load_lexicon(&config));

        let mut providers: Vec<Arc<dyn Provider>> = config
            .providers
            .iter()
            .filter_map(|p| {
                match HttpProvider::new(&p.name, &p.endpoint, config.provider_timeout()) {
                    Ok(provider) => Some(Arc::new(provider) as Arc<dyn Provider>),
                    Err(e) => {
                        tracing::warn!(provider = %p.name, error = %e, "cannot create provider, skipping it");
                        None
                    }
                }
            })
            .collect();
        providers.extend(self.providers);

        let remote = RemoteFanout::new(providers)
            .with_breaker(CircuitBreaker::new(config.breaker_cooldown()))
            .with_timeouts(config.provider_timeout(), config.lookup_timeout());

        let cache = match self.store {
            Some(store) => VerdictCache::new(store, config.durable_capacity),
            None => default_cache(&config),
        };

        tracing::info!(
            common = lexicon.common().len(),
            filter = lexicon.filter().is_some(),
            providers = remote.provider_count(),
            durable = cache.is_durable(),
            "oracle ready"
        );

        Oracle::new(lexicon, remote, cache)
            .with_trust_filter_negatives(config.trust_filter_negatives)
    }
}

impl Oracle {
    /// Build an oracle from configuration alone
    #[must_use]
    pub fn from_config(config: OracleConfig) -> Self {
        OracleBuilder::new(config).build()
    }
}

fn default_cache(config: &OracleConfig) -> VerdictCache {
    if !config.durable_cache {
        return VerdictCache::memory_only();
    }
    match config.cache_dir.clone().or_else(FileStore::default_dir) {
        Some(dir) => VerdictCache::new(Arc::new(FileStore::new(dir)), config.durable_capacity),
        None => {
            tracing::warn!("no cache directory available, verdicts will not persist");
            VerdictCache::memory_only()
        }
    }
}

/// Load filter, common words and exclusions named by `config`
#[must_use]
pub fn load_lexicon(config: &OracleConfig) -> Lexicon {
    let filter = config.filter_path.as_deref().and_then(|path| {
        match MembershipFilter::load(path) {
            Ok(filter) => {
                tracing::info!(
                    path = %path.display(),
                    bits = filter.bit_length(),
                    hashes = filter.hash_count(),
                    "filter loaded"
                );
                Some(filter)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "filter unavailable, continuing without it");
                None
            }
        }
    });

    let common = word_set(config.words_path.as_deref(), COMMON, "common words");
    let exclusions = word_set(config.exclusions_path.as_deref(), EXCLUSIONS, "exclusions");

    Lexicon::new(common)
        .with_filter(filter)
        .with_exclusions(exclusions)
}

fn word_set(path: Option<&Path>, seed: &[&str], what: &str) -> ExactSet {
    let Some(path) = path else {
        return ExactSet::from_slice(seed);
    };
    match load_from_file(path) {
        Ok(words) => {
            tracing::info!(path = %path.display(), count = words.len(), "loaded {what}");
            words.into_iter().collect()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot load {what}, using embedded list");
            ExactSet::from_slice(seed)
        }
    }
}
