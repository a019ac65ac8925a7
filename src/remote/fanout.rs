//! Concurrent remote verification
//!
//! Every usable provider is queried in parallel, each under its own timeout.
//! The first positive answer wins and drops the remaining requests; the whole
//! lookup is bounded by a second, overall timeout.

use super::breaker::CircuitBreaker;
use super::provider::Provider;
use crate::core::Word;
use crate::error::ProviderError;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default per-provider request budget
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default budget for a whole fan-out
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(5000);

/// Aggregated result of a fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// A provider knows the word
    Confirmed { provider: String },
    /// At least one provider answered and none knew the word
    Rejected,
    /// No provider produced an answer
    Unverified,
}

pub struct RemoteFanout {
    providers: Vec<Arc<dyn Provider>>,
    breaker: CircuitBreaker,
    provider_timeout: Duration,
    lookup_timeout: Duration,
}

impl Default for RemoteFanout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RemoteFanout {
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers,
            breaker: CircuitBreaker::default(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_breaker(mut self, breaker: CircuitBreaker) -> Self {
        self.breaker = breaker;
        self
    }

    #[must_use]
    pub const fn with_timeouts(mut self, provider_timeout: Duration, lookup_timeout: Duration) -> Self {
        self.provider_timeout = provider_timeout;
        self.lookup_timeout = lookup_timeout;
        self
    }

    #[must_use]
    pub const fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// At least one provider is configured and not circuit-open
    #[must_use]
    pub fn has_usable_provider(&self) -> bool {
        self.providers
            .iter()
            .any(|provider| !self.breaker.is_open(provider.name()))
    }

    /// Ask every usable provider about `word`
    pub async fn verify(&self, word: &Word) -> RemoteOutcome {
        let word = *word;
        let usable: Vec<&Arc<dyn Provider>> = self
            .providers
            .iter()
            .filter(|provider| {
                let open = self.breaker.is_open(provider.name());
                if open {
                    tracing::debug!(provider = provider.name(), "skipping circuit-open provider");
                }
                !open
            })
            .collect();

        if usable.is_empty() {
            return RemoteOutcome::Unverified;
        }

        let mut pending: FuturesUnordered<_> = usable
            .into_iter()
            .map(|provider| async move {
                let result = timeout(self.provider_timeout, provider.lookup(&word))
                    .await
                    .unwrap_or(Err(ProviderError::Timeout));
                (provider, result)
            })
            .collect();

        let mut answered = false;
        let gather = async {
            while let Some((provider, result)) = pending.next().await {
                match result {
                    Ok(true) => {
                        return Some(provider.name().to_owned());
                    }
                    Ok(false) => answered = true,
                    Err(err) => {
                        if err.is_auth() {
                            self.breaker.trip(provider.name());
                        }
                        tracing::warn!(provider = provider.name(), %word, error = %err, "provider failed");
                    }
                }
            }
            None
        };

        // Dropping `gather` (on a win or on timeout) cancels every request still in flight
        let confirmed = timeout(self.lookup_timeout, gather).await;
        match confirmed {
            Ok(Some(provider)) => RemoteOutcome::Confirmed { provider },
            Ok(None) if answered => RemoteOutcome::Rejected,
            Ok(None) => RemoteOutcome::Unverified,
            Err(_) => {
                tracing::warn!(%word, timeout_ms = self.lookup_timeout.as_millis() as u64, "remote lookup timed out");
                if answered {
                    RemoteOutcome::Rejected
                } else {
                    RemoteOutcome::Unverified
                }
            }
        }
    }
}
