//! Content filter for translation candidates.
//!
//! A candidate is accepted only if it passes every check: non-empty, not an
//! echo of the input, free of blocklisted terms, within the length bounds and
//! (when the provider reports one) at or above the quality threshold.

use crate::providers::TranslationCandidate;
use regex::Regex;
use std::sync::OnceLock;

/// Default minimum provider quality score (0-100 scale).
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 60.0;

/// Longest accepted candidate, in characters.
pub const MAX_CANDIDATE_CHARS: usize = 500;

/// Terms that disqualify a candidate wherever they appear, in any language pair.
const BLOCKLIST: &[&str] = &[
    "allah", "god", "jesus", "pray", "religion", "muslim", "christian", "hindu", "bible",
    "quran", "sex", "fuck", "shit", "ass",
];

static BLOCKLIST_REGEX: OnceLock<Regex> = OnceLock::new();

/// Reason a candidate was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("candidate is empty")]
    Empty,

    #[error("candidate is identical to the input")]
    EchoesInput,

    #[error("candidate contains blocked term '{0}'")]
    BlockedTerm(String),

    #[error("candidate length {0} is outside 1..=500")]
    Length(usize),

    #[error("quality {score} is below threshold {threshold}")]
    LowQuality { score: f64, threshold: f64 },
}

/// Blocklist and quality validator shared by the engine and adapters.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    quality_threshold: f64,
}

impl ContentFilter {
    pub fn new(quality_threshold: f64) -> Self {
        Self { quality_threshold }
    }

    /// Whether `candidate` is an acceptable translation of `original`.
    pub fn is_acceptable(&self, candidate: &str, original: &str) -> bool {
        self.check_text(candidate, None, original).is_ok()
    }

    /// Validate a candidate, reporting the first failed check.
    pub fn check(&self, candidate: &TranslationCandidate, original: &str) -> Result<(), Rejection> {
        self.check_text(&candidate.text, candidate.quality_score, original)
    }

    /// Validate raw text with an optional provider quality score.
    pub fn check_text(
        &self,
        text: &str,
        quality_score: Option<f64>,
        original: &str,
    ) -> Result<(), Rejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Rejection::Empty);
        }

        if trimmed.to_lowercase() == original.trim().to_lowercase() {
            return Err(Rejection::EchoesInput);
        }

        if let Some(term) = blocked_term(trimmed) {
            return Err(Rejection::BlockedTerm(term));
        }

        let length = trimmed.chars().count();
        if !(1..=MAX_CANDIDATE_CHARS).contains(&length) {
            return Err(Rejection::Length(length));
        }

        if let Some(score) = quality_score {
            if score < self.quality_threshold {
                return Err(Rejection::LowQuality {
                    score,
                    threshold: self.quality_threshold,
                });
            }
        }

        Ok(())
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY_THRESHOLD)
    }
}

/// First blocklisted term found in `text` (case-insensitive substring match).
fn blocked_term(text: &str) -> Option<String> {
    let regex = BLOCKLIST_REGEX.get_or_init(|| {
        let alternation = BLOCKLIST
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i)(?:{})", alternation)).unwrap()
    });

    regex.find(text).map(|m| m.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderId;
    use proptest::prelude::*;

    fn filter() -> ContentFilter {
        ContentFilter::default()
    }

    #[test]
    fn test_accepts_plain_translation() {
        assert!(filter().is_acceptable("Bonjour le monde", "Hello world"));
        assert!(filter().is_acceptable("नमस्ते", "hello"));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(filter().check_text("", None, "hello"), Err(Rejection::Empty));
        assert_eq!(filter().check_text("   ", None, "hello"), Err(Rejection::Empty));
    }

    #[test]
    fn test_rejects_echo_case_insensitively() {
        assert_eq!(
            filter().check_text("HELLO", None, "hello"),
            Err(Rejection::EchoesInput)
        );
        assert_eq!(
            filter().check_text(" Hello ", None, "hello"),
            Err(Rejection::EchoesInput)
        );
    }

    #[test]
    fn test_rejects_blocklisted_terms_anywhere() {
        assert_eq!(
            filter().check_text("Praise GOD today", None, "hello"),
            Err(Rejection::BlockedTerm("god".to_string()))
        );
        assert_eq!(
            filter().check_text("May Allah bless", None, "hi"),
            Err(Rejection::BlockedTerm("allah".to_string()))
        );
        // Substring match is deliberate
        assert!(!filter().is_acceptable("passport", "pasaporte"));
    }

    #[test]
    fn test_length_bounds() {
        let long = "a".repeat(MAX_CANDIDATE_CHARS + 1);
        assert_eq!(
            filter().check_text(&long, None, "x"),
            Err(Rejection::Length(MAX_CANDIDATE_CHARS + 1))
        );

        let at_limit = "b".repeat(MAX_CANDIDATE_CHARS);
        assert!(filter().is_acceptable(&at_limit, "x"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 200 Devanagari characters are ~600 bytes
        let text = "न".repeat(200);
        assert!(filter().is_acceptable(&text, "no"));
    }

    #[test]
    fn test_quality_threshold() {
        let low = TranslationCandidate::from_provider(ProviderId::MyMemory, "Bonjour", Some(59.0));
        assert_eq!(
            filter().check(&low, "Hello"),
            Err(Rejection::LowQuality {
                score: 59.0,
                threshold: 60.0
            })
        );

        let ok = TranslationCandidate::from_provider(ProviderId::MyMemory, "Bonjour", Some(60.0));
        assert!(filter().check(&ok, "Hello").is_ok());

        let unscored = TranslationCandidate::from_provider(ProviderId::Google, "Bonjour", None);
        assert!(filter().check(&unscored, "Hello").is_ok());
    }

    #[test]
    fn test_custom_threshold() {
        let strict = ContentFilter::new(90.0);
        assert!(strict.check_text("Hola", Some(85.0), "Hello").is_err());
        assert!(strict.check_text("Hola", Some(95.0), "Hello").is_ok());
    }

    proptest! {
        #[test]
        fn prop_rejects_its_own_input(x in "[a-zA-Z0-9 ]{0,40}[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}") {
            prop_assert!(!filter().is_acceptable(&x, &x));
            prop_assert!(!filter().is_acceptable(&x.to_uppercase(), &x));
        }
    }
}
