//! Display functions for command results

use super::formatters::{create_progress_bar, percent, source_glyph, verdict_label};
use crate::commands::{BatchSummary, BuildFilterResult, CheckResult, ProbeResult};
use crate::core::{Reason, Source};
use colored::Colorize;

/// Print one line per checked word
pub fn print_check_results(results: &[CheckResult]) {
    for result in results {
        let shown = result.word.as_deref().unwrap_or(&result.input);
        let label = verdict_label(&result.verdict);
        let label = if result.verdict.valid {
            label.green().bold()
        } else {
            label.red()
        };
        println!(
            "{} {:<7} {}",
            source_glyph(result.verdict.source),
            shown.to_uppercase().bright_yellow(),
            label
        );
    }
}

/// Print batch totals
pub fn print_batch_summary(summary: &BatchSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BATCH RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Verdicts:".bright_cyan().bold());
    println!("   Words checked:    {}", summary.total);
    println!(
        "   Accepted:         {} ({})",
        summary.accepted.to_string().green().bold(),
        percent(summary.accepted, summary.total)
    );
    for source in [Source::Local, Source::Remote] {
        let count = summary.accepted_from(source);
        if count > 0 {
            println!("     {} {source:<8}      {count}", source_glyph(source));
        }
    }
    println!(
        "   Rejected:         {} ({})",
        summary.rejected().to_string().red(),
        percent(summary.rejected(), summary.total)
    );
    for reason in [
        Reason::NotFound,
        Reason::Absent,
        Reason::Excluded,
        Reason::Format,
        Reason::Unverified,
    ] {
        let count = summary.rejected_for(reason);
        if count > 0 {
            println!("     {reason:<12}    {count}");
        }
    }

    let secs = summary.duration.as_secs_f64();
    println!("\n   Time taken:       {secs:.2}s");
    if secs > 0.0 {
        println!("   Words/second:     {:.1}", summary.total as f64 / secs);
    }

    let unverified = summary.rejected_for(Reason::Unverified);
    if unverified > 0 {
        println!(
            "\n{}",
            format!("⚠ {unverified} words could not be verified (providers unavailable)").yellow()
        );
    }
}

/// Print the outcome of building a filter
pub fn print_build_result(result: &BuildFilterResult) {
    println!(
        "{} {}",
        "✅ Filter written to".green().bold(),
        result.output.display()
    );
    println!("   Words:        {}", result.words);
    println!("   Bits (m):     {}", result.bit_length);
    println!("   Hashes (k):   {}", result.hash_count);
    println!(
        "   Fill:         [{}] {:.1}%",
        create_progress_bar(result.fill_ratio, 1.0, 30).green(),
        result.fill_ratio * 100.0
    );
    println!("   Asset size:   {} bytes", result.bytes);
}

/// Print a false-positive probe
pub fn print_probe_result(result: &ProbeResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        " {} m={} k={}",
        "FILTER PROBE".bright_cyan().bold(),
        result.bit_length,
        result.hash_count
    );
    println!("{}", "─".repeat(60).cyan());

    println!(
        "   Fill:         [{}] {:.1}%",
        create_progress_bar(result.fill_ratio, 1.0, 30).green(),
        result.fill_ratio * 100.0
    );
    println!(
        "   Samples:      {} ({} known words skipped)",
        result.samples, result.skipped_known
    );
    println!("   False hits:   {}", result.false_positives);
    println!(
        "   Observed FPR: {}",
        format!("{:.3}%", result.observed_rate() * 100.0).bright_yellow().bold()
    );
    println!("   Expected FPR: {:.3}%", result.expected_rate() * 100.0);
}
