/// Sentiment labels and verdicts
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A categorical sentiment tag as returned by the classifier.
///
/// The set is open-ended: the service decides which tags exist, we only
/// know how to derive the three standard ones from a raw score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentLabel(String);

impl SentimentLabel {
    pub const POSITIVE: &'static str = "positive";
    pub const NEGATIVE: &'static str = "negative";
    pub const NEUTRAL: &'static str = "neutral";

    /// Wrap a label, rejecting blank ones
    pub fn new(label: impl Into<String>) -> Option<SentimentLabel> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SentimentLabel(trimmed.to_string()))
        }
    }

    /// Map a positive-class probability onto a label.
    ///
    /// Below 0.5 is negative, above is positive, exactly 0.5 is neutral.
    pub fn from_score(score: f64) -> SentimentLabel {
        let label = if score < 0.5 {
            Self::NEGATIVE
        } else if score > 0.5 {
            Self::POSITIVE
        } else {
            Self::NEUTRAL
        };
        SentimentLabel(label.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS class for styling the label badge.
    ///
    /// Labels come from a remote service, so anything outside
    /// `[a-z0-9_-]` is collapsed to a single dash.
    pub fn css_class(&self) -> String {
        static UNSAFE: OnceLock<Regex> = OnceLock::new();
        let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^a-z0-9_-]+").unwrap());

        let lowered = self.0.to_lowercase();
        let class = unsafe_chars.replace_all(&lowered, "-");
        let class = class.trim_matches('-');

        if class.is_empty() {
            "unknown".to_string()
        } else {
            class.to_string()
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a successful classification
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub label: SentimentLabel,
    pub score: Option<f64>,
}

impl Verdict {
    pub fn new(label: SentimentLabel, score: Option<f64>) -> Verdict {
        Verdict { label, score }
    }

    /// Score as a whole percentage, e.g. "87%"
    pub fn score_percent(&self) -> Option<String> {
        self.score
            .filter(|s| s.is_finite())
            .map(|s| format!("{}%", (s.clamp(0.0, 1.0) * 100.0).round() as u8))
    }
}
