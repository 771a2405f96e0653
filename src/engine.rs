//! Translation resolution engine.
//!
//! Resolves a `(message, source, target)` triple through a fixed pipeline:
//!
//! 1. validate the request
//! 2. normalize both language identifiers
//! 3. consult the phrase dictionary (no network on a hit)
//! 4. ask providers in routing-policy order, each bounded by its own timeout,
//!    passing every candidate through the content filter
//! 5. if nothing is accepted, build a synthetic fallback
//!
//! Only invalid requests and same-language requests are surfaced as errors.
//! Every provider failure is absorbed, so an accepted request always produces
//! a [`TranslationResult`].

use crate::config::Config;
use crate::filter::ContentFilter;
use crate::i18n::{self, Language};
use crate::metrics::ResolutionMetrics;
use crate::providers::{
    BingTranslator, GoogleTranslate, LibreTranslate, MyMemory, Provider, ProviderError,
    ProviderId, TranslationCandidate,
};
use crate::retry::{with_retry_if, RetryConfig};
use crate::routing::RoutingPolicy;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest accepted message, in characters (after trimming).
pub const MAX_MESSAGE_CHARS: usize = 500;

/// An inbound translation request as clients send it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// The only value handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub source_lang: Language,
    pub target_lang: Language,
    pub is_fallback: bool,
    pub timestamp: DateTime<Utc>,
}

/// Request rejections. Nothing else is ever observable from outside the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("source and target languages cannot be the same ({0})")]
    SameLanguage(Language),
}

impl ResolveError {
    /// Stable machine-readable name for transports.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::InvalidRequest(_) => "invalid_request",
            ResolveError::SameLanguage(_) => "same_language",
        }
    }
}

/// How providers are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionStrategy {
    /// One provider at a time, in policy order.
    #[default]
    Sequential,
    /// All providers at once; the first accepted candidate wins and the
    /// remaining requests are dropped.
    Race,
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(ResolutionStrategy::Sequential),
            "race" => Ok(ResolutionStrategy::Race),
            other => Err(format!(
                "unknown resolution strategy '{}' (expected 'sequential' or 'race')",
                other
            )),
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStrategy::Sequential => f.write_str("sequential"),
            ResolutionStrategy::Race => f.write_str("race"),
        }
    }
}

/// A provider together with its per-attempt time budget.
#[derive(Clone)]
pub struct RegisteredProvider {
    provider: Arc<dyn Provider>,
    timeout: Duration,
}

impl RegisteredProvider {
    pub fn new(provider: impl Provider + 'static, timeout: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            timeout,
        }
    }

    pub fn id(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Dictionary-first, multi-provider translation resolver.
///
/// Holds no mutable state besides relaxed metric counters, so one instance can
/// be shared (behind an `Arc`) by every connection.
pub struct ResolutionEngine {
    providers: Vec<RegisteredProvider>,
    routing: RoutingPolicy,
    filter: Arc<ContentFilter>,
    strategy: ResolutionStrategy,
    retry: RetryConfig,
    metrics: ResolutionMetrics,
}

impl ResolutionEngine {
    /// Create an engine over `providers` with the default routing policy,
    /// sequential strategy and provider-call retries.
    pub fn new(providers: Vec<RegisteredProvider>, filter: Arc<ContentFilter>) -> Self {
        Self {
            providers,
            routing: RoutingPolicy::default(),
            filter,
            strategy: ResolutionStrategy::default(),
            retry: RetryConfig::provider_call(),
            metrics: ResolutionMetrics::new(),
        }
    }

    /// Build the engine and its HTTP adapters from process configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("linguabridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let filter = Arc::new(ContentFilter::new(config.quality_threshold));

        let providers = config
            .providers
            .iter()
            .map(|settings| {
                let client = client.clone();
                let url = settings.url.clone();
                match settings.id {
                    ProviderId::Google => {
                        RegisteredProvider::new(GoogleTranslate::new(client, url), settings.timeout)
                    }
                    ProviderId::Bing => {
                        RegisteredProvider::new(BingTranslator::new(client, url), settings.timeout)
                    }
                    ProviderId::MyMemory => RegisteredProvider::new(
                        MyMemory::new(client, url, Arc::clone(&filter)),
                        settings.timeout,
                    ),
                    ProviderId::LibreTranslate => RegisteredProvider::new(
                        LibreTranslate::new(client, url, config.libretranslate_api_key.clone()),
                        settings.timeout,
                    ),
                }
            })
            .collect();

        Ok(Self::new(providers, filter).with_strategy(config.strategy))
    }

    pub fn with_routing(mut self, routing: RoutingPolicy) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    /// Registered providers, in registration order.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(RegisteredProvider::id).collect()
    }

    /// Resolve a request received from a transport.
    pub async fn resolve_request(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ResolveError> {
        self.resolve(
            &request.message,
            request.source_lang.as_deref().unwrap_or_default(),
            request.target_lang.as_deref().unwrap_or_default(),
        )
        .await
    }

    /// Translate `message` from `source_raw` to `target_raw`.
    ///
    /// Language identifiers may be names, codes or region-qualified codes.
    /// Fails only with [`ResolveError::InvalidRequest`] or
    /// [`ResolveError::SameLanguage`]; otherwise always returns a result,
    /// marked `is_fallback` when no provider produced an acceptable candidate.
    pub async fn resolve(
        &self,
        message: &str,
        source_raw: &str,
        target_raw: &str,
    ) -> Result<TranslationResult, ResolveError> {
        let message = validate(message, source_raw, target_raw)?;

        let source = i18n::normalize(source_raw);
        let target = i18n::normalize(target_raw);
        debug!(
            "Normalized: {:?} → {}, {:?} → {}",
            source_raw, source, target_raw, target
        );
        if source == target {
            return Err(ResolveError::SameLanguage(source));
        }

        self.metrics.record_request();
        info!("Translating {:?} from {} to {}", message, source, target);

        if let Some(phrase) = i18n::lookup(message, source, target) {
            let candidate = TranslationCandidate::from_dictionary(phrase);
            info!("Using {}: {:?}", candidate.origin, candidate.text);
            self.metrics.record_dictionary_hit();
            return Ok(result(message, candidate.text, source, target, false));
        }

        let candidate = match self.strategy {
            ResolutionStrategy::Sequential => self.run_sequential(message, source, target).await,
            ResolutionStrategy::Race => self.run_race(message, source, target).await,
        };

        match candidate {
            Some(candidate) => Ok(result(message, candidate.text, source, target, false)),
            None => {
                warn!(
                    "All translation providers failed for {} → {}, using fallback",
                    source, target
                );
                self.metrics.record_fallback();
                let text = fallback_text(message, source, target);
                Ok(result(message, text, source, target, true))
            }
        }
    }

    /// Registered providers in the order the policy prescribes for this pair.
    ///
    /// Providers the policy does not mention are appended in registration
    /// order so that none is silently unused.
    fn ordered_providers(&self, source: Language, target: Language) -> Vec<&RegisteredProvider> {
        let order = self.routing.order_for(source, target);

        let mut ordered: Vec<&RegisteredProvider> = order
            .iter()
            .filter_map(|id| self.providers.iter().find(|p| p.id() == *id))
            .collect();
        ordered.extend(self.providers.iter().filter(|p| !order.contains(&p.id())));
        ordered
    }

    async fn run_sequential(
        &self,
        message: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        for slot in self.ordered_providers(source, target) {
            debug!("Trying {}", slot.id());
            let outcome = self.attempt(slot, message, source, target).await;
            if let Some(candidate) = self.accept(slot.id(), outcome, message) {
                return Some(candidate);
            }
        }
        None
    }

    async fn run_race(
        &self,
        message: &str,
        source: Language,
        target: Language,
    ) -> Option<TranslationCandidate> {
        let mut in_flight: FuturesUnordered<_> = self
            .ordered_providers(source, target)
            .into_iter()
            .map(|slot| async move {
                let outcome = self.attempt(slot, message, source, target).await;
                (slot.id(), outcome)
            })
            .collect();

        while let Some((id, outcome)) = in_flight.next().await {
            if let Some(candidate) = self.accept(id, outcome, message) {
                if !in_flight.is_empty() {
                    debug!("{} won the race, cancelling {} attempts", id, in_flight.len());
                    self.metrics.record_cancelled(in_flight.len());
                }
                return Some(candidate);
            }
        }
        None
    }

    /// One bounded attempt: retries of transient failures happen inside the
    /// provider's timeout, never beyond it.
    async fn attempt(
        &self,
        slot: &RegisteredProvider,
        message: &str,
        source: Language,
        target: Language,
    ) -> Result<TranslationCandidate, ProviderError> {
        let operation_name = slot.id().display_name();
        let call = with_retry_if(
            &self.retry,
            operation_name,
            || slot.provider.translate(message, source, target),
            ProviderError::is_retryable,
        );

        let budget = slot.timeout();
        tokio::time::timeout(budget, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout(budget)))
    }

    /// Log and count one settled attempt; return the candidate, trimmed, if
    /// the content filter accepts it.
    fn accept(
        &self,
        id: ProviderId,
        outcome: Result<TranslationCandidate, ProviderError>,
        message: &str,
    ) -> Option<TranslationCandidate> {
        self.metrics.record_provider_attempt();

        match outcome.map(trimmed) {
            Ok(candidate) => match self.filter.check(&candidate, message) {
                Ok(()) => {
                    info!("{} success: {:?}", id, candidate.text);
                    self.metrics.record_provider_success(id);
                    Some(candidate)
                }
                Err(rejection) => {
                    info!("{} returned an unusable translation: {}", id, rejection);
                    self.metrics.record_rejection();
                    None
                }
            },
            Err(e) => {
                warn!("{} failed: {}", id, e);
                self.metrics.record_provider_failure();
                None
            }
        }
    }
}

/// Check the raw request and return the trimmed message.
fn validate<'a>(
    message: &'a str,
    source_raw: &str,
    target_raw: &str,
) -> Result<&'a str, ResolveError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ResolveError::InvalidRequest(
            "message cannot be empty".to_string(),
        ));
    }

    let length = message.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(ResolveError::InvalidRequest(format!(
            "message is {} characters, the limit is {}",
            length, MAX_MESSAGE_CHARS
        )));
    }

    if source_raw.trim().is_empty() || target_raw.trim().is_empty() {
        return Err(ResolveError::InvalidRequest(
            "source and target languages must be specified".to_string(),
        ));
    }

    Ok(message)
}

/// Synthetic response used when no provider yields an acceptable candidate.
///
/// The English/Hindi pairs carry a readable tag in the target language; every
/// other pair gets `[src → tgt]`.
pub fn fallback_text(message: &str, source: Language, target: Language) -> String {
    match (source, target) {
        (Language::Hi, Language::En) => format!("[Translated from {}] {}", source.name(), message),
        (Language::En, Language::Hi) => format!("[अंग्रेजी से अनुवादित] {}", message),
        _ => format!("[{} → {}] {}", source, target, message),
    }
}

fn trimmed(mut candidate: TranslationCandidate) -> TranslationCandidate {
    let text = candidate.text.trim();
    if text.len() != candidate.text.len() {
        candidate.text = text.to_string();
    }
    candidate
}

fn result(
    message: &str,
    translated: String,
    source: Language,
    target: Language,
    is_fallback: bool,
) -> TranslationResult {
    TranslationResult {
        original: message.to_string(),
        translated,
        source_lang: source,
        target_lang: target,
        is_fallback,
        timestamp: Utc::now(),
    }
}
