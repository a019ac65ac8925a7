//! Wordle Oracle
//!
//! Decides whether a five-letter string is an acceptable word, using a
//! membership filter, an exact word set with suffix and spelling fallbacks,
//! and a fan-out to remote dictionaries guarded by circuit breakers. Verdicts
//! are cached per session and, optionally, across runs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_oracle::config::OracleConfig;
//! use wordle_oracle::oracle::Oracle;
//!
//! # async fn run() {
//! let oracle = Oracle::from_config(OracleConfig::default());
//!
//! let verdict = oracle.check_word("Crane").await;
//! println!("valid: {} via {}", verdict.valid, verdict.source);
//! # }
//! ```

// Core domain types
pub mod core;

// Error types per layer
pub mod error;

// Runtime configuration
pub mod config;

// Local word knowledge
pub mod lexicon;

// Remote dictionary providers
pub mod remote;

// Verdict caching
pub mod cache;

// Lookup orchestration
pub mod oracle;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
