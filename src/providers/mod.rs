/*!
 * Provider implementations for the networked services the engine consumes.
 *
 * This module contains raw HTTP clients:
 * - Aksharamukha: script-to-script conversion keyed by script names
 * - Azure: Translator `transliterate` endpoint keyed by ISO 15924 codes
 * - Anthropic: Messages API used for generative romanization
 * - LibreTranslate: language detection and machine translation
 *
 * The clients know nothing about romanization; the strategies in
 * `transliteration` wrap them with deadlines and validation.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all provider clients
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing strategies to treat every client the same way.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

/// Join a base endpoint and a path without doubling slashes
pub(crate) fn join_endpoint(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Hide all but the last four chars of a secret
pub(crate) fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }
    let tail: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("***{}", tail)
}

pub mod aksharamukha;
pub mod anthropic;
pub mod azure;
pub mod libretranslate;
