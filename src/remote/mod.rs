//! Remote verification
//!
//! Last-resort fan-out to dictionary providers, guarded by timeouts and a
//! per-provider circuit breaker.

mod breaker;
mod fanout;
mod provider;

pub use breaker::{CircuitBreaker, DEFAULT_COOLDOWN};
pub use fanout::{DEFAULT_LOOKUP_TIMEOUT, DEFAULT_PROVIDER_TIMEOUT, RemoteFanout, RemoteOutcome};
pub use provider::{HttpProvider, Provider, interpret_body};

#[cfg(test)]
pub(crate) use fanout::tests::MockProvider;
