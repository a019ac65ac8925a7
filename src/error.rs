//! Error types for each layer of the oracle
//!
//! None of these reach `Oracle::check_word` callers: every failure is folded
//! into a `Verdict` or logged and degraded.

use thiserror::Error;

/// Input did not normalize to exactly five ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("word must be exactly 5 letters, got {len} in {text:?}")]
    InvalidLength { text: String, len: usize },
    #[error("word must contain only ASCII letters, got {text:?}")]
    InvalidCharacters { text: String },
}

/// A filter or word-list asset could not be loaded
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("filter bits are not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid asset: {0}")]
    Invalid(String),
}

/// A single remote provider failed to answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider timed out")]
    Timeout,
    #[error("provider rejected credentials (HTTP {status})")]
    Auth { status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Auth and permission failures open the provider's circuit
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

/// The durable cache tier could not be read or written
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("durable store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("durable table (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The configuration file could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid provider {0:?}, expected NAME=URL")]
    ProviderSpec(String),
}
