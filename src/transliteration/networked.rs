/*!
 * Strategies backed by networked providers.
 *
 * Each strategy wraps one provider client, runs exactly one call per chunk
 * under the deadline it is given, and reports "unavailable" without any
 * call when it cannot apply (missing mapping or credential).
 */

use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::app_config::{AksharamukhaConfig, AzureConfig, LlmConfig, TranslateConfig, secs};
use crate::errors::{AttemptError, ProviderError};
use crate::language_utils::LanguageCode;
use crate::providers::Provider;
use crate::providers::aksharamukha::{Aksharamukha, ConversionRequest};
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::azure::{AzureTransliterator, TransliterateRequest};
use crate::providers::libretranslate::{LibreTranslate, TranslateRequest};
use crate::validation::strip_wrappers;

use super::deadline::Deadline;
use super::strategy::{LanguageContext, RomanizationStrategy};

/// Aksharamukha conversion keyed by scheme-A script names
#[derive(Debug)]
pub struct AksharamukhaStrategy {
    client: Aksharamukha,
    target_scheme: String,
    timeout: Duration,
}

impl AksharamukhaStrategy {
    pub fn new(client: Aksharamukha, target_scheme: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            target_scheme: target_scheme.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AksharamukhaConfig) -> Self {
        Self::new(
            Aksharamukha::new(config.endpoint.clone()),
            config.target_scheme.clone(),
            secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl RomanizationStrategy for AksharamukhaStrategy {
    fn name(&self) -> &'static str {
        "aksharamukha"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError> {
        let source = context.script_names.scheme_a.ok_or_else(|| {
            AttemptError::unavailable(format!("no Aksharamukha script for '{}'", context.language))
        })?;

        let request = ConversionRequest::new(source, self.target_scheme.clone(), chunk);
        let response = deadline.run(self.client.complete(request)).await?;
        Ok(Aksharamukha::extract_text(&response))
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        Deadline::after(self.timeout).run(self.client.test_connection()).await
    }
}

/// Translator `transliterate` keyed by ISO 15924 codes
#[derive(Debug)]
pub struct AzureStrategy {
    client: Option<AzureTransliterator>,
    timeout: Duration,
}

impl AzureStrategy {
    /// `client` is `None` when no subscription key is configured
    pub fn new(client: Option<AzureTransliterator>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &AzureConfig) -> Self {
        let client = if config.api_key.is_empty() {
            debug!("No Translator subscription key configured, azure strategy disabled");
            None
        } else {
            Some(AzureTransliterator::new(
                config.api_key.clone(),
                config.region.clone(),
                config.endpoint.clone(),
            ))
        };
        Self::new(client, secs(config.timeout_secs))
    }
}

/// Language tag the Translator service expects for `language`
fn azure_language(language: &LanguageCode) -> String {
    match language.as_str() {
        "zh" => "zh-Hans".to_string(),
        code => code.to_string(),
    }
}

#[async_trait]
impl RomanizationStrategy for AzureStrategy {
    fn name(&self) -> &'static str {
        "azure"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError> {
        let client = self.client.as_ref()
            .ok_or_else(|| AttemptError::unavailable("no subscription key configured"))?;
        let from_script = context.script_names.scheme_b.ok_or_else(|| {
            AttemptError::unavailable(format!("no ISO 15924 script for '{}'", context.language))
        })?;

        let request = TransliterateRequest::to_latin(azure_language(&context.language), from_script, chunk);
        let response = deadline.run(client.complete(request)).await?;
        Ok(AzureTransliterator::extract_text(&response))
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        match &self.client {
            Some(client) => Deadline::after(self.timeout).run(client.test_connection()).await,
            None => Err(ProviderError::AuthenticationError("no subscription key configured".to_string())),
        }
    }
}

/// Generative romanization through a completion model
#[derive(Debug)]
pub struct LlmStrategy {
    client: Option<Anthropic>,
    config: LlmConfig,
}

impl LlmStrategy {
    /// `client` is `None` when no API key is configured
    pub fn new(client: Option<Anthropic>, config: LlmConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        let client = if config.api_key.is_empty() {
            debug!("No LLM API key configured, llm strategy disabled");
            None
        } else {
            Some(Anthropic::new(
                config.api_key.clone(),
                config.endpoint.clone(),
                config.model.clone(),
            ))
        };
        Self::new(client, config.clone())
    }

    fn build_request(&self, chunk: &str, context: &LanguageContext) -> AnthropicRequest {
        let language_name = context
            .language
            .english_name()
            .unwrap_or_else(|| "non-Latin".to_string());

        AnthropicRequest::new(self.config.model.clone(), self.config.max_tokens)
            .system(self.config.render_system_prompt(&language_name))
            .temperature(self.config.temperature)
            .add_message("user", chunk)
    }
}

#[async_trait]
impl RomanizationStrategy for LlmStrategy {
    fn name(&self) -> &'static str {
        "llm"
    }

    fn timeout(&self) -> Duration {
        secs(self.config.timeout_secs)
    }

    fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError> {
        let client = self.client.as_ref()
            .ok_or_else(|| AttemptError::unavailable("no API key configured"))?;

        let request = self.build_request(chunk, context);
        let response = deadline.run(client.complete(request)).await?;
        Ok(strip_wrappers(&Anthropic::extract_text(&response)))
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        match &self.client {
            Some(client) => Deadline::after(self.timeout()).run(client.test_connection()).await,
            None => Err(ProviderError::AuthenticationError("no API key configured".to_string())),
        }
    }
}

/// Machine translation into a Latin-script language; last resort only
#[derive(Debug)]
pub struct TranslateStrategy {
    client: LibreTranslate,
    target_language: String,
    timeout: Duration,
}

impl TranslateStrategy {
    pub fn new(client: LibreTranslate, target_language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            target_language: target_language.into(),
            timeout,
        }
    }

    pub fn from_config(config: &TranslateConfig) -> Self {
        Self::new(
            LibreTranslate::new(config.api_key.clone(), config.endpoint.clone()),
            config.target_language.clone(),
            secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl RomanizationStrategy for TranslateStrategy {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError> {
        let request = TranslateRequest::new(chunk, context.language.as_str(), self.target_language.clone());
        let response = deadline.run(self.client.complete(request)).await?;
        Ok(LibreTranslate::extract_text(&response))
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        Deadline::after(self.timeout).run(self.client.test_connection()).await
    }
}
