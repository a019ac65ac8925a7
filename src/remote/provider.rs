//! Remote dictionary providers
//!
//! Each provider sits behind a trusted proxy endpoint that takes a single
//! `word` query parameter. No credentials are sent from here.

use crate::core::Word;
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// A remote source that can vouch for a word
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable name, used as the circuit-breaker key
    fn name(&self) -> &str;

    /// `Ok(true)` if the provider knows the word, `Ok(false)` if it answered
    /// but does not. A non-2xx reply other than 401/403 is an answer.
    async fn lookup(&self, word: &Word) -> Result<bool, ProviderError>;
}

/// Interpret a provider's JSON body
///
/// A non-empty array (dictionary entries) or an object with `"valid": true`
/// counts as positive; anything else is negative.
#[must_use]
pub fn interpret_body(body: &Value) -> bool {
    match body {
        Value::Array(entries) => !entries.is_empty(),
        Value::Object(map) => map.get("valid").and_then(Value::as_bool).unwrap_or(false),
        _ => false,
    }
}

/// Provider reached over HTTP GET
#[derive(Clone)]
pub struct HttpProvider {
    name: String,
    endpoint: String,
    client: Client,
}

impl HttpProvider {
    /// Create a provider whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns `ProviderError::Transport` if the HTTP client cannot be built
    /// (for example when no TLS backend can be initialized).
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(4)
            .no_proxy()
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, word: &Word) -> Result<bool, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("word", word.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ProviderError::Auth {
                status: status.as_u16(),
            });
        }
        // Dictionaries answer unknown words with 404 and friends
        if !status.is_success() {
            tracing::debug!(provider = %self.name, %word, status = status.as_u16(), "provider answered negatively");
            return Ok(false);
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Decode(e.to_string())
            }
        })?;

        let found = interpret_body(&body);
        tracing::debug!(provider = %self.name, %word, found, "provider answered");
        Ok(found)
    }
}
