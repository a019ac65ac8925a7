//! Check command
//!
//! Runs each input through the oracle and keeps the normalized key alongside
//! the verdict.

use crate::core::{Verdict, normalize};
use crate::oracle::Oracle;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome for one input
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub input: String,
    /// Normalized key, absent when the input failed the shape check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(skip)]
    pub duration: Duration,
}

/// Check a single input
pub async fn check_input(oracle: &Oracle, input: &str) -> CheckResult {
    let start = Instant::now();
    let verdict = oracle.check_word(input).await;
    CheckResult {
        input: input.to_owned(),
        word: normalize(input).ok().map(String::from),
        verdict,
        duration: start.elapsed(),
    }
}

/// Check inputs one after another, in order
pub async fn check_words(oracle: &Oracle, inputs: &[String]) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        results.push(check_input(oracle, input).await);
    }
    results
}
