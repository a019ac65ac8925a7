//! Command implementations

pub mod batch;
pub mod build_filter;
pub mod check;
pub mod probe;

pub use batch::{BatchSummary, DEFAULT_CONCURRENCY, read_inputs, run_batch};
pub use build_filter::{BuildFilterResult, DEFAULT_FP_RATE, build_filter};
pub use check::{CheckResult, check_input, check_words};
pub use probe::{ProbeResult, probe_filter};
