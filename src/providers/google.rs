use super::{ensure_success, Provider, ProviderError, ProviderId, TranslationCandidate};
use crate::i18n::Language;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

/// Public `translate_a/single` endpoint used by the gtx client.
pub const DEFAULT_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate through the keyless gtx endpoint (query-string GET).
pub struct GoogleTranslate {
    client: reqwest::Client,
    url: String,
}

impl GoogleTranslate {
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
        debug!("Google Translate API: {} → {}", source, target);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", message),
            ])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let text = extract_translation(&body).ok_or(ProviderError::NoTranslation)?;
        Ok(TranslationCandidate::from_provider(ProviderId::Google, text, None))
    }
}

impl Provider for GoogleTranslate {
    fn id(&self) -> ProviderId {
        ProviderId::Google
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

/// The body is a nested array; `body[0]` lists one `[translated, original, ...]`
/// entry per sentence. Sentences are concatenated in order.
fn extract_translation(body: &Value) -> Option<String> {
    let sentences = body.get(0)?.as_array()?;
    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0)?.as_str())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_extract_single_sentence() {
        let body = json!([[["Bonjour", "Hello", null, null, 10]], null, "en"]);
        assert_eq!(extract_translation(&body), Some("Bonjour".to_string()));
    }

    #[test]
    fn test_extract_joins_sentences() {
        let body = json!([
            [["Bonjour. ", "Hello. ", null], ["Comment ça va ?", "How are you?", null]],
            null,
            "en"
        ]);
        assert_eq!(
            extract_translation(&body),
            Some("Bonjour. Comment ça va ?".to_string())
        );
    }

    #[test]
    fn test_extract_missing_fields() {
        assert_eq!(extract_translation(&json!([])), None);
        assert_eq!(extract_translation(&json!({"error": "x"})), None);
        assert_eq!(extract_translation(&json!([[[null]]])), None);
        assert_eq!(extract_translation(&json!([[["  "]]])), None);
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "fr"))
            .and(query_param("q", "good cheese"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([[["bon fromage", "good cheese", null]], null, "en"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GoogleTranslate::new(
            reqwest::Client::new(),
            format!("{}/translate_a/single", mock_server.uri()),
        );
        let candidate = provider
            .translate("good cheese", Language::En, Language::Fr)
            .await
            .expect("Should succeed");

        assert_eq!(candidate.text, "bon fromage");
        assert_eq!(candidate.quality_score, None);
        assert_eq!(candidate.origin, crate::providers::CandidateOrigin::Provider(ProviderId::Google));
    }

    #[tokio::test]
    async fn test_translate_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let provider = GoogleTranslate::new(reqwest::Client::new(), mock_server.uri());
        let err = provider
            .translate("hello", Language::En, Language::De)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_translate_non_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&mock_server)
            .await;

        let provider = GoogleTranslate::new(reqwest::Client::new(), mock_server.uri());
        let err = provider
            .translate("hello", Language::En, Language::De)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}
