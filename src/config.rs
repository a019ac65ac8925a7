//! Oracle configuration
//!
//! Every field has a default, so an empty JSON object is a valid config file.
//! CLI flags override individual fields after the file is read.

use crate::cache::DEFAULT_CAPACITY;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// A remote provider endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub endpoint: String,
}

impl FromStr for ProviderConfig {
    type Err = ConfigError;

    /// Parse `NAME=URL`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, endpoint) = s
            .split_once('=')
            .ok_or_else(|| ConfigError::ProviderSpec(s.to_owned()))?;
        let (name, endpoint) = (name.trim(), endpoint.trim());
        if name.is_empty() || endpoint.is_empty() {
            return Err(ConfigError::ProviderSpec(s.to_owned()));
        }
        Ok(Self {
            name: name.to_owned(),
            endpoint: endpoint.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Budget for a single provider request
    pub provider_timeout_ms: u64,
    /// Budget for a whole remote fan-out
    pub lookup_timeout_ms: u64,
    /// How long an auth failure keeps a provider skipped
    pub breaker_cooldown_secs: u64,
    /// Maximum number of verdicts kept in the durable tier
    pub durable_capacity: usize,
    /// Treat a loaded filter's "absent" as final instead of asking providers
    pub trust_filter_negatives: bool,
    /// Persist verdicts across runs
    pub durable_cache: bool,
    pub providers: Vec<ProviderConfig>,
    pub filter_path: Option<PathBuf>,
    pub words_path: Option<PathBuf>,
    pub exclusions_path: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 2000,
            lookup_timeout_ms: 5000,
            breaker_cooldown_secs: 600,
            durable_capacity: DEFAULT_CAPACITY,
            trust_filter_negatives: true,
            durable_cache: true,
            providers: Vec::new(),
            filter_path: None,
            words_path: None,
            exclusions_path: None,
            cache_dir: None,
        }
    }
}

impl OracleConfig {
    /// Read a JSON config file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    #[must_use]
    pub const fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    #[must_use]
    pub const fn breaker_cooldown(&self) -> Duration {
        Duration::from_secs(self.breaker_cooldown_secs)
    }
}
