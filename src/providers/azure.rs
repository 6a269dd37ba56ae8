use async_trait::async_trait;
use log::{error, trace};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::ProviderError;

use super::{Provider, join_endpoint, redact};

/// Global endpoint of the Translator service
pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

/// Client for the Translator `transliterate` operation
pub struct AzureTransliterator {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key
    api_key: String,
    /// Resource region, required for regional resources
    region: String,
    /// Base URL of the service
    endpoint: String,
}

/// Transliteration request for one language and script pair
#[derive(Debug, Clone)]
pub struct TransliterateRequest {
    /// Language of the texts, e.g. "ja" or "zh-Hans"
    pub language: String,
    /// ISO 15924 source script
    pub from_script: String,
    /// ISO 15924 target script
    pub to_script: String,
    /// Texts to convert
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

/// One converted text
#[derive(Debug, Deserialize)]
pub struct TransliteratedText {
    /// Converted text
    pub text: String,
    /// Script of the converted text
    #[serde(default)]
    pub script: String,
}

impl TransliterateRequest {
    /// Request a conversion to Latin script
    pub fn to_latin(language: impl Into<String>, from_script: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            from_script: from_script.into(),
            to_script: "Latn".to_string(),
            texts: vec![text.into()],
        }
    }
}

impl AzureTransliterator {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, region: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            region: region.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl fmt::Debug for AzureTransliterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureTransliterator")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[async_trait]
impl Provider for AzureTransliterator {
    type Request = TransliterateRequest;
    type Response = Vec<TransliteratedText>;

    async fn complete(&self, request: TransliterateRequest) -> Result<Vec<TransliteratedText>, ProviderError> {
        let url = join_endpoint(&self.endpoint, "transliterate");
        let body: Vec<TextItem<'_>> = request.texts.iter().map(|t| TextItem { text: t }).collect();

        let mut builder = self.client.post(&url)
            .query(&[
                ("api-version", "3.0"),
                ("language", request.language.as_str()),
                ("fromScript", request.from_script.as_str()),
                ("toScript", request.to_script.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body);

        if !self.region.is_empty() {
            builder = builder.header("Ocp-Apim-Subscription-Region", &self.region);
        }

        let response = builder.send().await.map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translator transliterate error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status, error_text));
        }

        let raw = response.text().await.map_err(ProviderError::from_transport)?;
        trace!("Translator raw response: {}", raw);

        serde_json::from_str::<Vec<TransliteratedText>>(&raw)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse transliterate response: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let converted = self.complete(TransliterateRequest::to_latin("ja", "Jpan", "こんにちは")).await?;
        if converted.is_empty() {
            return Err(ProviderError::ParseError("Empty transliteration result".to_string()));
        }
        Ok(())
    }

    fn extract_text(response: &Vec<TransliteratedText>) -> String {
        response.iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
