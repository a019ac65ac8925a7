//! Formatting utilities for terminal output

use crate::core::{Source, Verdict};

/// Short plain-text label for a verdict
#[must_use]
pub fn verdict_label(verdict: &Verdict) -> String {
    match (verdict.valid, verdict.reason) {
        (true, _) => format!("valid ({})", verdict.source),
        (false, Some(reason)) => format!("invalid ({reason})"),
        (false, None) => "invalid".to_owned(),
    }
}

/// Glyph marking where a verdict came from
#[must_use]
pub const fn source_glyph(source: Source) -> &'static str {
    match source {
        Source::Local => "●",
        Source::Remote => "◆",
        Source::None => "○",
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a ratio as a percentage with two decimals
#[must_use]
pub fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.00%".to_owned();
    }
    format!("{:.2}%", part as f64 * 100.0 / whole as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Reason;

    #[test]
    fn labels() {
        assert_eq!(verdict_label(&Verdict::accepted(Source::Remote)), "valid (remote)");
        assert_eq!(verdict_label(&Verdict::not_found()), "invalid (not-found)");
        assert_eq!(
            verdict_label(&Verdict::rejected(Source::Local, Reason::Excluded)),
            "invalid (excluded)"
        );
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 1.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(1.0, 1.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(0.5, 1.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn percentages() {
        assert_eq!(percent(1, 4), "25.00%");
        assert_eq!(percent(0, 0), "0.00%");
    }
}
