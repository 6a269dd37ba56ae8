use async_trait::async_trait;
use log::{error, trace};
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;

use super::{Provider, join_endpoint};

/// Public plugin endpoint of Aksharamukha
pub const DEFAULT_ENDPOINT: &str = "https://aksharamukha-plugin.appspot.com";

/// Client for the Aksharamukha script converter
#[derive(Debug)]
pub struct Aksharamukha {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the service
    endpoint: String,
}

/// One conversion between two scheme-A scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Source script name, e.g. "Devanagari"
    pub source: String,
    /// Target scheme, e.g. "ISO" or "IAST"
    pub target: String,
    /// Text to convert
    pub text: String,
}

impl ConversionRequest {
    pub fn new(source: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            text: text.into(),
        }
    }
}

impl Aksharamukha {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Provider for Aksharamukha {
    type Request = ConversionRequest;
    type Response = String;

    async fn complete(&self, request: ConversionRequest) -> Result<String, ProviderError> {
        let url = join_endpoint(&self.endpoint, "api/public");

        let response = self.client.get(&url)
            .query(&[
                ("source", request.source.as_str()),
                ("target", request.target.as_str()),
                ("text", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Aksharamukha error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status, error_text));
        }

        let body = response.text().await.map_err(ProviderError::from_transport)?;
        trace!("Aksharamukha raw response: {}", body);
        Ok(body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let converted = self.complete(ConversionRequest::new("Devanagari", "ISO", "क")).await?;
        if converted.trim().is_empty() {
            return Err(ProviderError::ParseError("Empty conversion result".to_string()));
        }
        Ok(())
    }

    fn extract_text(response: &String) -> String {
        response.trim_end_matches(['\r', '\n']).to_string()
    }
}
