/*!
 * Failover orchestration across romanization strategies.
 *
 * A request is detected once, chunked once, then offered to each enabled
 * strategy in configured order. A strategy must romanize every chunk to a
 * validated result; the first chunk it cannot handle abandons it with no
 * partial output kept. When no strategy succeeds the input is returned as is.
 */

use log::{debug, info, warn};

use crate::app_config::{Config, StrategyKind};
use crate::errors::{AttemptError, ProviderError, TransliterationError};
use crate::script::scripts_present;
use crate::validation::{check_romanization, latin_ratio, non_ascii_count};

use super::chunker::{DEFAULT_MAX_CHUNK_CHARS, chunk_text, split_edges};
use super::deadline::Deadline;
use super::detector::LanguageDetector;
use super::local::LocalStrategy;
use super::networked::{AksharamukhaStrategy, AzureStrategy, LlmStrategy, TranslateStrategy};
use super::result::TransliterationResult;
use super::strategy::{LanguageContext, RomanizationStrategy};

/// Connectivity report for one strategy
#[derive(Debug)]
pub struct StrategyStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub outcome: Result<(), ProviderError>,
}

/// The romanization engine
#[derive(Debug)]
pub struct Transliterator {
    detector: LanguageDetector,
    strategies: Vec<Box<dyn RomanizationStrategy>>,
    max_chunk_chars: usize,
}

/// Build the strategy for one configured chain entry
fn build_strategy(kind: StrategyKind, config: &Config) -> Box<dyn RomanizationStrategy> {
    match kind {
        StrategyKind::Local => Box::new(LocalStrategy::new()),
        StrategyKind::Aksharamukha => Box::new(AksharamukhaStrategy::from_config(&config.aksharamukha)),
        StrategyKind::Azure => Box::new(AzureStrategy::from_config(&config.azure)),
        StrategyKind::Llm => Box::new(LlmStrategy::from_config(&config.llm)),
        StrategyKind::Translate => Box::new(TranslateStrategy::from_config(&config.translate)),
    }
}

impl Transliterator {
    /// Engine over an explicit strategy list, tried in the given order
    pub fn new(
        detector: LanguageDetector,
        strategies: Vec<Box<dyn RomanizationStrategy>>,
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            detector,
            strategies,
            max_chunk_chars,
        }
    }

    /// Engine wired from configuration
    pub fn from_config(config: &Config) -> Self {
        let strategies = config
            .chain
            .iter()
            .map(|kind| build_strategy(*kind, config))
            .collect();
        let max_chunk_chars = if config.max_chunk_chars == 0 {
            DEFAULT_MAX_CHUNK_CHARS
        } else {
            config.max_chunk_chars
        };
        Self::new(LanguageDetector::from_config(&config.detection), strategies, max_chunk_chars)
    }

    /// Strategy names in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    /// Romanize `text`; `None` is a malformed request
    pub async fn transliterate(&self, text: Option<&str>) -> Result<TransliterationResult, TransliterationError> {
        let text = text.ok_or(TransliterationError::MissingInput)?;
        Ok(self.romanize(text).await)
    }

    /// `transliterate` bounded by a caller deadline
    pub async fn transliterate_by(
        &self,
        text: Option<&str>,
        deadline: Deadline,
    ) -> Result<TransliterationResult, TransliterationError> {
        let text = text.ok_or(TransliterationError::MissingInput)?;
        Ok(self.romanize_by(text, deadline).await)
    }

    /// Romanize `text`. Never fails; the worst outcome is the identity result.
    pub async fn romanize(&self, text: &str) -> TransliterationResult {
        self.romanize_within(text, None).await
    }

    /// Romanize `text`, capping every call at `deadline`
    ///
    /// Strategies not yet tried when the deadline passes are skipped.
    pub async fn romanize_by(&self, text: &str, deadline: Deadline) -> TransliterationResult {
        self.romanize_within(text, Some(deadline)).await
    }

    async fn romanize_within(&self, text: &str, limit: Option<Deadline>) -> TransliterationResult {
        if text.trim().is_empty() {
            debug!("Empty input, nothing to romanize");
            return TransliterationResult::unchanged(text, None);
        }

        if non_ascii_count(text) == 0 {
            debug!("Input is already ASCII, skipping detection and strategies");
            return TransliterationResult::unchanged(text, None);
        }

        let detected = self.detector.detect_within(text, limit).await;
        let context = LanguageContext::new(detected, text);
        let lang = Some(context.language.to_string());
        debug!(
            "Language '{}', dominant script {}, scripts present: {:?}",
            context.language,
            context.script,
            scripts_present(text)
        );

        let chunks = chunk_text(text, self.max_chunk_chars);
        debug!("Split input into {} chunk(s) of at most {} chars", chunks.len(), self.max_chunk_chars);

        for strategy in &self.strategies {
            let name = strategy.name();
            if limit.is_some_and(|limit| limit.is_expired()) {
                info!("Deadline passed before '{}' could be tried", name);
                break;
            }
            if !strategy.is_enabled() {
                debug!("Strategy '{}' is disabled, skipping", name);
                continue;
            }

            match self.run_strategy(strategy.as_ref(), &chunks, &context, text, limit).await {
                Ok(result) => {
                    info!(
                        "Romanized {} chunk(s) with '{}' (latin ratio {:.2})",
                        chunks.len(),
                        name,
                        latin_ratio(&result)
                    );
                    return TransliterationResult::romanized(text, lang, result, name);
                }
                Err(AttemptError::Unavailable(reason)) => {
                    debug!("Strategy '{}' not applicable: {}", name, reason);
                }
                Err(AttemptError::Failed(e)) => {
                    warn!("Strategy '{}' failed: {}", name, e);
                }
                Err(AttemptError::Rejected(reason)) => {
                    info!("Output of '{}' rejected: {}", name, reason);
                }
            }
        }

        info!("No strategy produced a valid romanization, returning input unchanged");
        TransliterationResult::unchanged(text, lang)
    }

    /// Run one strategy over every chunk; any chunk failure abandons it
    async fn run_strategy(
        &self,
        strategy: &dyn RomanizationStrategy,
        chunks: &[String],
        context: &LanguageContext,
        text: &str,
        limit: Option<Deadline>,
    ) -> Result<String, AttemptError> {
        let mut parts = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            // blank lines at the edges stay ours, whatever the provider trims
            let (leading, body, trailing) = split_edges(chunk);
            if non_ascii_count(body) == 0 {
                debug!("Chunk {} is already ASCII, passing through", index + 1);
                parts.push(chunk.clone());
                continue;
            }

            let own = Deadline::after(strategy.timeout());
            let deadline = limit.map_or(own, |limit| own.earliest(limit));
            let output = strategy.attempt(body, context, deadline).await?;
            let output = output.trim();
            check_romanization(body, output)
                .map_err(|r| AttemptError::Rejected(format!("chunk {}: {}", index + 1, r)))?;
            debug!("Chunk {} accepted from '{}'", index + 1, strategy.name());
            parts.push(format!("{}{}{}", leading, output, trailing));
        }

        let joined = parts.join("\n");
        check_romanization(text, &joined)
            .map_err(|r| AttemptError::Rejected(format!("joined text: {}", r)))?;
        Ok(joined)
    }

    /// Check the detection service, if any
    pub async fn check_detector(&self) -> Option<Result<(), ProviderError>> {
        self.detector.check_connection().await
    }

    /// Check every enabled strategy's backing service in priority order
    pub async fn check_strategies(&self) -> Vec<StrategyStatus> {
        let mut statuses = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let enabled = strategy.is_enabled();
            let outcome = if enabled {
                strategy.check_connection().await
            } else {
                Ok(())
            };
            statuses.push(StrategyStatus {
                name: strategy.name(),
                enabled,
                outcome,
            });
        }
        statuses
    }
}
