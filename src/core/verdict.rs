//! Oracle verdicts and their provenance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Filter, exact set, safety net or exclusion list
    Local,
    /// At least one remote provider confirmed the word
    Remote,
    /// Nothing could vouch for the word
    None,
}

/// Why a word was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    /// Input was not five letters after normalization
    Format,
    /// No local or remote source knows the word
    NotFound,
    /// Listed in the curated exclusions
    Excluded,
    /// The membership filter definitively ruled it out
    Absent,
    /// Remote providers were asked but none could answer
    Unverified,
}

impl Reason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::NotFound => "not-found",
            Self::Excluded => "excluded",
            Self::Absent => "absent",
            Self::Unverified => "unverified",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::None => "none",
        })
    }
}

/// Answer to "is this an acceptable word?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl Verdict {
    #[must_use]
    pub const fn accepted(source: Source) -> Self {
        Self {
            valid: true,
            source,
            reason: None,
        }
    }

    #[must_use]
    pub const fn rejected(source: Source, reason: Reason) -> Self {
        Self {
            valid: false,
            source,
            reason: Some(reason),
        }
    }

    /// Verdict for input that failed shape validation
    #[must_use]
    pub const fn bad_format() -> Self {
        Self::rejected(Source::None, Reason::Format)
    }

    /// Verdict when nothing vouched for the word
    #[must_use]
    pub const fn not_found() -> Self {
        Self::rejected(Source::None, Reason::NotFound)
    }

    /// Whether this verdict may be written to the durable tier
    ///
    /// Unverified outcomes stem from transient provider trouble, so they live
    /// only for the session.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        !matches!(self.reason, Some(Reason::Unverified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_json_shape() {
        let json = serde_json::to_string(&Verdict::not_found()).unwrap();
        assert_eq!(
            json,
            r#"{"valid":false,"source":"none","reason":"not-found"}"#
        );

        let json = serde_json::to_string(&Verdict::accepted(Source::Remote)).unwrap();
        assert_eq!(json, r#"{"valid":true,"source":"remote"}"#);
    }

    #[test]
    fn verdict_parses_without_reason() {
        let verdict: Verdict = serde_json::from_str(r#"{"valid":true,"source":"local"}"#).unwrap();
        assert_eq!(verdict, Verdict::accepted(Source::Local));
    }

    #[test]
    fn unverified_is_session_only() {
        assert!(!Verdict::rejected(Source::None, Reason::Unverified).is_durable());
        assert!(Verdict::not_found().is_durable());
        assert!(Verdict::accepted(Source::Local).is_durable());
    }

    #[test]
    fn reason_strings_match_serde() {
        for reason in [
            Reason::Format,
            Reason::NotFound,
            Reason::Excluded,
            Reason::Absent,
            Reason::Unverified,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{reason}\""));
        }
    }
}
