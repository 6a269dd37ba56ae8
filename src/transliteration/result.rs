use serde::{Deserialize, Serialize};

/// Provider value reported when no strategy produced a valid romanization
pub const NO_PROVIDER: &str = "none";

/// Outcome of one transliteration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationResult {
    /// Input text, unchanged
    pub original: String,

    /// Resolved language code; `None` when no detection took place
    pub lang: Option<String>,

    /// Romanized text, or the original when every strategy failed
    pub result: String,

    /// Strategy that produced `result`, or "none"
    pub provider: String,
}

impl TransliterationResult {
    /// Identity result: nothing was romanized
    pub fn unchanged(original: impl Into<String>, lang: Option<String>) -> Self {
        let original = original.into();
        Self {
            result: original.clone(),
            original,
            lang,
            provider: NO_PROVIDER.to_string(),
        }
    }

    pub fn romanized(
        original: impl Into<String>,
        lang: Option<String>,
        result: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            lang,
            result: result.into(),
            provider: provider.into(),
        }
    }

    /// Whether a strategy produced the result
    pub fn is_romanized(&self) -> bool {
        self.provider != NO_PROVIDER
    }
}
