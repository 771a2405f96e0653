use super::{ensure_success, Provider, ProviderError, ProviderId, TranslationCandidate};
use crate::i18n::Language;
use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::debug;

/// Public web translator endpoint.
pub const DEFAULT_URL: &str = "https://www.bing.com/ttranslatev3?isVertical=1&IG=1&IID=translator.5023";

#[derive(Debug, Deserialize)]
struct BingEntry {
    #[serde(default)]
    translations: Vec<BingTranslation>,
}

#[derive(Debug, Deserialize)]
struct BingTranslation {
    text: Option<String>,
}

/// Bing Translator (form-encoded POST).
pub struct BingTranslator {
    client: reqwest::Client,
    url: String,
}

impl BingTranslator {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn request(
        &self,
        message: &str,
        source: Language,
        target: Language,
    ) -> Result<TranslationCandidate, ProviderError> {
        debug!("Bing Translator: {} → {}", source, target);

        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("text", message),
                ("fromLang", bing_code(source)),
                ("to", bing_code(target)),
            ])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let entries: Vec<BingEntry> = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let text = entries
            .into_iter()
            .next()
            .and_then(|entry| entry.translations.into_iter().next())
            .and_then(|translation| translation.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::NoTranslation)?;

        Ok(TranslationCandidate::from_provider(ProviderId::Bing, text, None))
    }
}

impl Provider for BingTranslator {
    fn id(&self) -> ProviderId {
        ProviderId::Bing
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

/// Bing names Chinese by script rather than by the bare ISO 639-1 code.
fn bing_code(language: Language) -> &'static str {
    match language {
        Language::Zh => "zh-Hans",
        other => other.code(),
    }
}
