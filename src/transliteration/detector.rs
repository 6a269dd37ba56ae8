/*!
 * Best-effort language detection.
 *
 * One networked call with a short deadline; any failure, or an answer of
 * "unknown", falls back to the script heuristic. Detection never fails.
 */

use log::{debug, warn};
use std::time::Duration;

use crate::app_config::{DetectionConfig, secs};
use crate::errors::ProviderError;
use crate::language_utils::LanguageCode;
use crate::providers::Provider;
use crate::providers::libretranslate::LibreTranslate;
use crate::script::{SCAN_LIMIT, guess_language};

use super::deadline::Deadline;

/// Networked detector with a script-based fallback
#[derive(Debug)]
pub struct LanguageDetector {
    client: Option<LibreTranslate>,
    timeout: Duration,
}

impl LanguageDetector {
    /// Detector backed by a detection service
    pub fn new(client: LibreTranslate, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            timeout,
        }
    }

    /// Detector that only uses the script heuristic
    pub fn heuristic_only() -> Self {
        Self {
            client: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        if !config.enabled {
            return Self::heuristic_only();
        }
        Self::new(
            LibreTranslate::new(config.api_key.clone(), config.endpoint.clone()),
            secs(config.timeout_secs),
        )
    }

    /// Whether a networked call is attempted
    pub fn is_networked(&self) -> bool {
        self.client.is_some()
    }

    /// Check the detection service; `None` when detection is heuristic only
    pub async fn check_connection(&self) -> Option<Result<(), ProviderError>> {
        let client = self.client.as_ref()?;
        Some(Deadline::after(self.timeout).run(client.test_connection()).await)
    }

    /// Best-guess language of `text`; `auto` when nothing can be said
    pub async fn detect(&self, text: &str) -> LanguageCode {
        self.detect_within(text, None).await
    }

    /// Same as `detect`, with the service call also bounded by `limit`
    pub async fn detect_within(&self, text: &str, limit: Option<Deadline>) -> LanguageCode {
        if let Some(client) = &self.client {
            let sample: String = text.chars().take(SCAN_LIMIT).collect();
            let own = Deadline::after(self.timeout);
            let deadline = limit.map_or(own, |limit| own.earliest(limit));

            match deadline.run(client.detect(&sample)).await {
                Ok(candidates) => {
                    let detected = candidates
                        .first()
                        .map(|c| LanguageCode::new(&c.language))
                        .unwrap_or_else(LanguageCode::auto);
                    if !detected.is_auto() {
                        debug!("Detection service reports '{}'", detected);
                        return detected;
                    }
                    debug!("Detection service could not identify the language");
                }
                Err(e) => warn!("Language detection failed, using script heuristic: {}", e),
            }
        }

        let guessed = guess_language(text);
        debug!("Script heuristic guesses '{}'", guessed);
        guessed
    }
}
