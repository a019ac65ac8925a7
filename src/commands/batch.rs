//! Batch command - check every word in a file
//!
//! Lookups run with bounded concurrency; results come back in file order.

use super::check::{CheckResult, check_input};
use crate::core::{Reason, Source};
use crate::oracle::Oracle;
use anyhow::{Context, Result};
use futures_util::StreamExt;
use futures_util::stream;
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Default number of lookups in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Totals for a batch run
#[derive(Debug)]
pub struct BatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub by_source: FxHashMap<Source, usize>,
    pub by_reason: FxHashMap<Reason, usize>,
    pub duration: Duration,
    pub results: Vec<CheckResult>,
}

impl BatchSummary {
    fn from_results(results: Vec<CheckResult>, duration: Duration) -> Self {
        let mut by_source = FxHashMap::default();
        let mut by_reason = FxHashMap::default();
        for result in &results {
            if result.verdict.valid {
                *by_source.entry(result.verdict.source).or_insert(0) += 1;
            }
            if let Some(reason) = result.verdict.reason {
                *by_reason.entry(reason).or_insert(0) += 1;
            }
        }

        Self {
            total: results.len(),
            accepted: results.iter().filter(|r| r.verdict.valid).count(),
            by_source,
            by_reason,
            duration,
            results,
        }
    }

    #[must_use]
    pub fn rejected(&self) -> usize {
        self.total - self.accepted
    }

    #[must_use]
    pub fn accepted_from(&self, source: Source) -> usize {
        self.by_source.get(&source).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn rejected_for(&self, reason: Reason) -> usize {
        self.by_reason.get(&reason).copied().unwrap_or(0)
    }
}

/// Read batch inputs, one per line
///
/// Blank lines and `#` comments are skipped. Lines are not validated here:
/// malformed entries are reported as format rejections.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read batch file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Check every input, at most `concurrency` at a time
pub async fn run_batch(
    oracle: &Oracle,
    inputs: Vec<String>,
    concurrency: usize,
    show_progress: bool,
) -> BatchSummary {
    let start = Instant::now();

    let pb = if show_progress {
        let pb = ProgressBar::new(inputs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<CheckResult> = stream::iter(inputs)
        .map(|input| {
            let pb = pb.clone();
            async move {
                let result = check_input(oracle, &input).await;
                pb.set_message(input);
                pb.inc(1);
                result
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    pb.finish_and_clear();
    BatchSummary::from_results(results, start.elapsed())
}
