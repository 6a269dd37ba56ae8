/*!
 * The interface every romanization strategy implements.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::{AttemptError, ProviderError};
use crate::language_utils::LanguageCode;
use crate::script::{ProviderScriptName, ScriptTag, classify, resolve_language, script_names_for};

use super::deadline::Deadline;

/// Per-request facts about the text, computed once before any attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageContext {
    /// Language after detection and script fallback
    pub language: LanguageCode,
    /// Dominant script of the whole text
    pub script: ScriptTag,
    /// Provider script identifiers for `language`
    pub script_names: ProviderScriptName,
}

impl LanguageContext {
    /// Derive the context for `text` from the detected language
    pub fn new(detected: LanguageCode, text: &str) -> Self {
        let language = resolve_language(&detected, text);
        let script_names = script_names_for(&language, text);
        Self {
            language,
            script: classify(text),
            script_names,
        }
    }
}

/// One provider family able to romanize a bounded chunk of text
#[async_trait]
pub trait RomanizationStrategy: Send + Sync + Debug {
    /// Identifier reported in results and logs
    fn name(&self) -> &'static str;

    /// Per-call budget; the orchestrator turns it into a `Deadline`
    fn timeout(&self) -> Duration;

    /// False when the strategy is permanently unusable (missing credential)
    fn is_enabled(&self) -> bool {
        true
    }

    /// Romanize one chunk. Must not retry and must honour `deadline`.
    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        deadline: Deadline,
    ) -> Result<String, AttemptError>;

    /// Check the backing service, if any
    async fn check_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
