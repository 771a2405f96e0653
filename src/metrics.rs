//! Resolution metrics.
//!
//! Counters are owned by each engine instance rather than a global, so
//! independent engines (and tests) never observe each other's traffic.

use crate::providers::ProviderId;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-engine resolution counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Accepted requests (rejections are not counted)
    requests: AtomicUsize,

    /// Requests answered from the phrase dictionary
    dictionary_hits: AtomicUsize,

    /// Provider attempts that settled (candidate, error or timeout)
    provider_attempts: AtomicUsize,

    /// Race attempts dropped once another provider won
    cancelled_attempts: AtomicUsize,

    /// Attempts that ended in an error or timeout
    provider_failures: AtomicUsize,

    /// Candidates the content filter rejected
    candidates_rejected: AtomicUsize,

    /// Requests answered by a provider
    provider_successes: AtomicUsize,

    /// Requests answered with the synthetic fallback
    fallbacks: AtomicUsize,

    /// Wins per provider, indexed like `ProviderId::ALL`
    wins: [AtomicUsize; 4],
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_hit(&self) {
        self.dictionary_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_attempt(&self) {
        self.provider_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self, count: usize) {
        self.cancelled_attempts.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.candidates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_success(&self, id: ProviderId) {
        self.provider_successes.fetch_add(1, Ordering::Relaxed);
        self.wins[win_slot(id)].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn dictionary_hits(&self) -> usize {
        self.dictionary_hits.load(Ordering::Relaxed)
    }

    pub fn provider_attempts(&self) -> usize {
        self.provider_attempts.load(Ordering::Relaxed)
    }

    pub fn cancelled_attempts(&self) -> usize {
        self.cancelled_attempts.load(Ordering::Relaxed)
    }

    pub fn provider_failures(&self) -> usize {
        self.provider_failures.load(Ordering::Relaxed)
    }

    pub fn candidates_rejected(&self) -> usize {
        self.candidates_rejected.load(Ordering::Relaxed)
    }

    pub fn provider_successes(&self) -> usize {
        self.provider_successes.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn wins(&self, id: ProviderId) -> usize {
        self.wins[win_slot(id)].load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let fallbacks = self.fallbacks();
        let fallback_rate = if requests > 0 {
            (fallbacks as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        // Cancelled race losers never settle, so they stay out of the rate
        let attempts = self.provider_attempts();
        let failures = self.provider_failures();
        let provider_success_rate = if attempts > 0 {
            (attempts.saturating_sub(failures) as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            dictionary_hits: self.dictionary_hits(),
            provider_attempts: attempts,
            cancelled_attempts: self.cancelled_attempts(),
            provider_failures: failures,
            candidates_rejected: self.candidates_rejected(),
            provider_successes: self.provider_successes(),
            fallbacks,
            fallback_rate,
            provider_success_rate,
            wins: ProviderId::ALL
                .iter()
                .map(|id| ProviderWins {
                    provider: id.as_str(),
                    wins: self.wins(*id),
                })
                .collect(),
        }
    }
}

fn win_slot(id: ProviderId) -> usize {
    match id {
        ProviderId::Google => 0,
        ProviderId::Bing => 1,
        ProviderId::MyMemory => 2,
        ProviderId::LibreTranslate => 3,
    }
}

/// Snapshot of the resolution counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub requests: usize,
    pub dictionary_hits: usize,
    pub provider_attempts: usize,
    pub cancelled_attempts: usize,
    pub provider_failures: usize,
    pub candidates_rejected: usize,
    pub provider_successes: usize,
    pub fallbacks: usize,

    /// Fallback responses as a percentage of accepted requests (0-100)
    pub fallback_rate: f64,

    /// Settled attempts that returned a candidate, as a percentage (0-100)
    pub provider_success_rate: f64,

    pub wins: Vec<ProviderWins>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderWins {
    pub provider: &'static str,
    pub wins: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = ResolutionMetrics::new();
        let report = metrics.report();
        assert_eq!(report.requests, 0);
        assert_eq!(report.fallback_rate, 0.0);
        assert_eq!(report.provider_success_rate, 0.0);
        assert!(report.wins.iter().all(|w| w.wins == 0));
    }

    #[test]
    fn test_rates() {
        let metrics = ResolutionMetrics::new();
        for _ in 0..4 {
            metrics.record_request();
        }
        metrics.record_fallback();
        for _ in 0..5 {
            metrics.record_provider_attempt();
        }
        metrics.record_provider_failure();
        metrics.record_provider_failure();

        let report = metrics.report();
        assert_eq!(report.fallback_rate, 25.0);
        assert_eq!(report.provider_success_rate, 60.0);
    }

    #[test]
    fn test_wins_are_per_provider() {
        let metrics = ResolutionMetrics::new();
        metrics.record_provider_success(ProviderId::Bing);
        metrics.record_provider_success(ProviderId::Bing);
        metrics.record_provider_success(ProviderId::Google);

        assert_eq!(metrics.provider_successes(), 3);
        assert_eq!(metrics.wins(ProviderId::Bing), 2);
        assert_eq!(metrics.wins(ProviderId::Google), 1);
        assert_eq!(metrics.wins(ProviderId::MyMemory), 0);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let metrics = ResolutionMetrics::new();
        metrics.record_dictionary_hit();

        let json = serde_json::to_value(metrics.report()).expect("serialize");
        assert_eq!(json["dictionaryHits"], 1);
        assert_eq!(json["wins"][0]["provider"], "google");
    }

    #[test]
    fn test_cancelled_attempts_do_not_dilute_success_rate() {
        let metrics = ResolutionMetrics::new();
        metrics.record_provider_attempt();
        metrics.record_provider_success(ProviderId::Bing);
        metrics.record_cancelled(3);

        let report = metrics.report();
        assert_eq!(report.provider_attempts, 1);
        assert_eq!(report.cancelled_attempts, 3);
        assert_eq!(report.provider_success_rate, 100.0);
    }
}
