use async_trait::async_trait;
use log::{error, trace};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::ProviderError;

use super::{Provider, join_endpoint, redact};

/// Public LibreTranslate instance
pub const DEFAULT_ENDPOINT: &str = "https://libretranslate.com";

/// LibreTranslate client: `/translate` through `Provider`, `/detect` inherent
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Optional API key
    api_key: String,
    /// Base URL of the service
    endpoint: String,
}

/// Translation request
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub q: String,
    /// Source language code or "auto"
    pub source: String,
    /// Target language code
    pub target: String,
    /// "text" or "html"
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// Language guessed by the service
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DetectedLanguage {
    /// Confidence in percent
    #[serde(default)]
    pub confidence: f64,
    /// Language code
    pub language: String,
}

/// Translation response
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(rename = "detectedLanguage", default)]
    pub detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl TranslateRequest {
    /// Plain-text translation request
    pub fn new(q: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
            api_key: None,
        }
    }
}

impl LibreTranslate {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn key(&self) -> Option<&str> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(self.api_key.as_str())
        }
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ProviderError> {
        let url = join_endpoint(&self.endpoint, path);

        let response = self.client.post(&url)
            .json(body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("LibreTranslate error on /{} ({}): {}", path, status, error_text);
            return Err(ProviderError::from_status(status, error_text));
        }

        let raw = response.text().await.map_err(ProviderError::from_transport)?;
        trace!("LibreTranslate raw response from /{}: {}", path, raw);
        Ok(raw)
    }

    /// Detect the language of a text; candidates are ordered by confidence
    pub async fn detect(&self, text: &str) -> Result<Vec<DetectedLanguage>, ProviderError> {
        let raw = self.post_json("detect", &DetectRequest { q: text, api_key: self.key() }).await?;

        let mut candidates = serde_json::from_str::<Vec<DetectedLanguage>>(&raw)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse detect response: {}", e)))?;
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(candidates)
    }
}

impl fmt::Debug for LibreTranslate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibreTranslate")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, mut request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        request.api_key = self.key().map(str::to_string);
        let raw = self.post_json("translate", &request).await?;

        serde_json::from_str::<TranslateResponse>(&raw)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse translate response: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.detect("hello").await.map(|_| ())
    }

    fn extract_text(response: &TranslateResponse) -> String {
        response.translated_text.clone()
    }
}
