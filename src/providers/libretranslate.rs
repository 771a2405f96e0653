use super::{ensure_success, Provider, ProviderError, ProviderId, TranslationCandidate};
use crate::i18n::Language;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hosted LibreTranslate instance.
pub const DEFAULT_URL: &str = "https://libretranslate.com/translate";

/// LibreTranslate request body
#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    translated_text: Option<String>,
}

/// LibreTranslate (JSON POST).
pub struct LibreTranslate {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl LibreTranslate {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }

    async fn request(
        &self,
        message: &str,
        source: Language,
        target: Language,
    ) -> Result<TranslationCandidate, ProviderError> {
        debug!("LibreTranslate API: {} → {}", source, target);

        let body = LibreRequest {
            q: message,
            source: source.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        let response = ensure_success(response).await?;

        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let text = parsed
            .translated_text
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::NoTranslation)?;

        Ok(TranslationCandidate::from_provider(
            ProviderId::LibreTranslate,
            text,
            None,
        ))
    }
}

impl Provider for LibreTranslate {
    fn id(&self) -> ProviderId {
        ProviderId::LibreTranslate
    }

    fn translate<'a>(
        &'a self,
        message: &'a str,
        source: Language,
        target: Language,
    ) -> BoxFuture<'a, Result<TranslationCandidate, ProviderError>> {
        Box::pin(self.request(message, source, target))
    }
}
