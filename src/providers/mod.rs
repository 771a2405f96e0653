//! External translation providers.
//!
//! Every provider sits behind the [`Provider`] trait and hands back a typed
//! [`TranslationCandidate`] or a [`ProviderError`]. Response-shape differences
//! stay inside each adapter.

pub mod bing;
pub mod google;
pub mod libretranslate;
pub mod mymemory;

pub use bing::BingTranslator;
pub use google::GoogleTranslate;
pub use libretranslate::LibreTranslate;
pub use mymemory::MyMemory;

use crate::i18n::Language;
use futures::future::BoxFuture;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identifies a provider in logs, configuration and routing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Google,
    Bing,
    MyMemory,
    LibreTranslate,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Google,
        ProviderId::Bing,
        ProviderId::MyMemory,
        ProviderId::LibreTranslate,
    ];

    /// Lowercase identifier used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::Bing => "bing",
            ProviderId::MyMemory => "mymemory",
            ProviderId::LibreTranslate => "libretranslate",
        }
    }

    /// Human-readable name used in logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Google => "Google Translate",
            ProviderId::Bing => "Bing Translator",
            ProviderId::MyMemory => "MyMemory",
            ProviderId::LibreTranslate => "LibreTranslate",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderId::Google),
            "bing" => Ok(ProviderId::Bing),
            "mymemory" => Ok(ProviderId::MyMemory),
            "libretranslate" | "libre" => Ok(ProviderId::LibreTranslate),
            other => Err(format!("unknown translation provider '{}'", other)),
        }
    }
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Dictionary,
    Provider(ProviderId),
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateOrigin::Dictionary => f.write_str("phrase dictionary"),
            CandidateOrigin::Provider(id) => id.fmt(f),
        }
    }
}

/// A translation that has not been validated yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCandidate {
    pub text: String,

    /// Provider-reported quality on a 0-100 scale, when the provider exposes one
    pub quality_score: Option<f64>,

    pub origin: CandidateOrigin,
}

impl TranslationCandidate {
    pub fn from_provider(id: ProviderId, text: impl Into<String>, quality_score: Option<f64>) -> Self {
        Self {
            text: text.into(),
            quality_score,
            origin: CandidateOrigin::Provider(id),
        }
    }

    pub fn from_dictionary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quality_score: None,
            origin: CandidateOrigin::Dictionary,
        }
    }
}

/// Why a single provider attempt produced no candidate.
///
/// Never surfaced to callers of the engine; it only decides whether the
/// attempt is retried and what gets logged before moving to the next provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no translation found in response")]
    NoTranslation,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Transient failures worth retrying within the provider's time budget:
    /// network errors, 429 and 5xx. Other 4xx and shape errors are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Network(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Malformed(_) | ProviderError::NoTranslation => false,
            ProviderError::Timeout(_) => false,
        }
    }
}

/// Capability shared by every translation service adapter.
pub trait Provider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Translate `message` between two canonical languages.
    ///
    /// Implementations must not impose their own overall deadline; the engine
    /// bounds every attempt with the provider's configured timeout.
    fn translate<'a>(
        &'a self,
        message: &'a str,
        source: Language,
        target: Language,
    ) -> BoxFuture<'a, Result<TranslationCandidate, ProviderError>>;
}

/// Turn a non-2xx response into [`ProviderError::Status`].
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: truncate(&body, 200),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
