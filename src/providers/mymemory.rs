use super::{ensure_success, Provider, ProviderError, ProviderId, TranslationCandidate};
use crate::filter::ContentFilter;
use crate::i18n::Language;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Public translation-memory endpoint.
pub const DEFAULT_URL: &str = "https://api.mymemory.translated.net/get";

/// MyMemory translation memory (query-string GET).
///
/// The response carries several crowd-sourced `matches`, each with a quality
/// score. Matches the content filter would reject are dropped here so that a
/// blocked top match does not hide an acceptable runner-up; the survivors are
/// ranked by descending quality, first encountered winning ties.
pub struct MyMemory {
    client: reqwest::Client,
    url: String,
    filter: Arc<ContentFilter>,
}

/// A usable match extracted from the response.
#[derive(Debug, Clone, PartialEq)]
struct RankedMatch {
    text: String,
    quality: Option<f64>,
}

impl MyMemory {
    pub fn new(client: reqwest::Client, url: impl Into<String>, filter: Arc<ContentFilter>) -> Self {
        Self {
            client,
            url: url.into(),
            filter,
        }
    }

    async fn request(
        &self,
        message: &str,
        source: Language,
        target: Language,
    ) -> Result<TranslationCandidate, ProviderError> {
        debug!("MyMemory API: {} → {}", source, target);

        let langpair = format!("{}|{}", source.code(), target.code());
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", message), ("langpair", langpair.as_str())])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        // Errors are reported in-band with an HTTP 200
        if let Some(status) = body.get("responseStatus").and_then(status_code) {
            if status != 200 {
                let details = body
                    .get("responseDetails")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                return Err(ProviderError::Status {
                    status,
                    body: details,
                });
            }
        }

        let best = self
            .best_match(&body, message)
            .or_else(|| response_data(&body))
            .ok_or(ProviderError::NoTranslation)?;

        debug!(
            "MyMemory best match (quality {:?}): {:?}",
            best.quality, best.text
        );
        Ok(TranslationCandidate::from_provider(
            ProviderId::MyMemory,
            best.text,
            best.quality,
        ))
    }

    /// Highest-quality acceptable entry of `matches`.
    fn best_match(&self, body: &Value, message: &str) -> Option<RankedMatch> {
        let mut ranked: Vec<RankedMatch> = body
            .get("matches")?
            .as_array()?
            .iter()
            .filter_map(|entry| {
                let text = entry.get("translation")?.as_str()?.trim().to_string();
                let quality = entry.get("match").and_then(quality_score);
                Some(RankedMatch { text, quality })
            })
            .filter(|candidate| {
                match self.filter.check_text(&candidate.text, candidate.quality, message) {
                    Ok(()) => true,
                    Err(rejection) => {
                        debug!("MyMemory match dropped ({}): {:?}", rejection, candidate.text);
                        false
                    }
                }
            })
            .collect();

        // Stable sort keeps the first encountered on equal quality
        ranked.sort_by(|a, b| {
            b.quality
                .unwrap_or(0.0)
                .total_cmp(&a.quality.unwrap_or(0.0))
        });
        ranked.into_iter().next()
    }
}

impl Provider for MyMemory {
    fn id(&self) -> ProviderId {
        ProviderId::MyMemory
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

/// `responseData.translatedText`, the service's own pick.
fn response_data(body: &Value) -> Option<RankedMatch> {
    let data = body.get("responseData")?;
    let text = data.get("translatedText")?.as_str()?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    let quality = data.get("match").and_then(quality_score);
    Some(RankedMatch { text, quality })
}

/// MyMemory reports quality as a 0-1 fraction (sometimes as a string);
/// scale it to 0-100.
fn quality_score(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    if raw <= 1.0 {
        Some(raw * 100.0)
    } else {
        Some(raw)
    }
}

fn status_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
