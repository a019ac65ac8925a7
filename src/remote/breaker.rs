//! Per-provider circuit breaker
//!
//! A provider that fails with an auth/permission error is skipped until its
//! cooldown elapses. State is a single `open_until` timestamp per provider;
//! concurrent trips simply overwrite each other.

use rustc_hash::FxHashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Default time a tripped provider stays skipped
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10 * 60);

#[derive(Debug)]
pub struct CircuitBreaker {
    cooldown: Duration,
    open_until: Mutex<FxHashMap<String, Instant>>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            open_until: Mutex::new(FxHashMap::default()),
        }
    }

    /// Whether `provider` must be skipped right now
    ///
    /// Expired entries are dropped on the way, which is the implicit reset.
    pub fn is_open(&self, provider: &str) -> bool {
        let mut state = self.open_until.lock().unwrap_or_else(PoisonError::into_inner);
        match state.get(provider).copied() {
            Some(until) if Instant::now() < until => true,
            Some(_) => {
                state.remove(provider);
                tracing::info!(provider, "circuit closed after cooldown");
                false
            }
            None => false,
        }
    }

    /// Open the circuit for `provider` for one cooldown period
    pub fn trip(&self, provider: &str) {
        let until = Instant::now() + self.cooldown;
        self.open_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(provider.to_owned(), until);
        tracing::warn!(
            provider,
            cooldown_secs = self.cooldown.as_secs(),
            "circuit opened"
        );
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }
}
