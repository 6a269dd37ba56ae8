/*!
 * Static lookup tables between languages, scripts and the script
 * identifiers networked transliteration services expect.
 *
 * Two independent naming schemes exist:
 * - scheme A: Aksharamukha script names ("Devanagari", "Urdu", ...)
 * - scheme B: ISO 15924 codes ("Deva", "Arab", "Jpan", ...)
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::language_utils::LanguageCode;

use super::classifier::{ScriptTag, classify, scripts_present};

/// Provider-specific source script identifiers for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProviderScriptName {
    /// Aksharamukha source script
    pub scheme_a: Option<&'static str>,
    /// ISO 15924 source script
    pub scheme_b: Option<&'static str>,
}

impl ProviderScriptName {
    /// No provider can take this language
    pub fn none() -> Self {
        Self::default()
    }
}

static SCHEME_A: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("hi", "Devanagari"),
        ("mr", "Devanagari"),
        ("ne", "Devanagari"),
        ("sa", "Devanagari"),
        ("bn", "Bengali"),
        ("as", "Assamese"),
        ("pa", "Gurmukhi"),
        ("gu", "Gujarati"),
        ("or", "Oriya"),
        ("ta", "Tamil"),
        ("te", "Telugu"),
        ("kn", "Kannada"),
        ("ml", "Malayalam"),
        ("si", "Sinhala"),
        ("ur", "Urdu"),
        ("ar", "Arab"),
        ("fa", "Arab-Fa"),
        ("he", "Hebrew"),
        ("th", "Thai"),
        ("my", "Burmese"),
        ("km", "Khmer"),
        ("bo", "Tibetan"),
    ])
});

static SCHEME_B: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("hi", "Deva"),
        ("mr", "Deva"),
        ("ne", "Deva"),
        ("bn", "Beng"),
        ("as", "Beng"),
        ("pa", "Guru"),
        ("gu", "Gujr"),
        ("or", "Orya"),
        ("ta", "Taml"),
        ("te", "Telu"),
        ("kn", "Knda"),
        ("ml", "Mlym"),
        ("si", "Sinh"),
        ("ar", "Arab"),
        ("ur", "Arab"),
        ("fa", "Arab"),
        ("he", "Hebr"),
        ("el", "Grek"),
        ("ru", "Cyrl"),
        ("uk", "Cyrl"),
        ("be", "Cyrl"),
        ("bg", "Cyrl"),
        ("sr", "Cyrl"),
        ("mk", "Cyrl"),
        ("kk", "Cyrl"),
        ("ja", "Jpan"),
        ("zh", "Hans"),
        ("ko", "Kore"),
        ("th", "Thai"),
        ("am", "Ethi"),
        ("ka", "Geor"),
        ("hy", "Armn"),
    ])
});

/// Heuristic language for a script; Han is split into ja/zh by looking for kana
pub fn language_for_script(tag: ScriptTag, sample: &str) -> Option<&'static str> {
    let code = match tag {
        ScriptTag::Devanagari => "hi",
        ScriptTag::Bengali => "bn",
        ScriptTag::Gurmukhi => "pa",
        ScriptTag::Gujarati => "gu",
        ScriptTag::Oriya => "or",
        ScriptTag::Tamil => "ta",
        ScriptTag::Telugu => "te",
        ScriptTag::Kannada => "kn",
        ScriptTag::Malayalam => "ml",
        ScriptTag::Sinhala => "si",
        ScriptTag::Thai => "th",
        ScriptTag::Arabic => "ur",
        ScriptTag::Hebrew => "he",
        ScriptTag::Greek => "el",
        ScriptTag::Cyrillic => "ru",
        ScriptTag::Armenian => "hy",
        ScriptTag::Georgian => "ka",
        ScriptTag::Hangul => "ko",
        ScriptTag::Kana => "ja",
        ScriptTag::Han => {
            if scripts_present(sample).contains(&ScriptTag::Kana) {
                "ja"
            } else {
                "zh"
            }
        }
        ScriptTag::None => return None,
    };
    Some(code)
}

/// Language guessed from the script of the text alone
pub fn guess_language(text: &str) -> LanguageCode {
    match language_for_script(classify(text), text) {
        Some(code) => LanguageCode::new(code),
        None => LanguageCode::auto(),
    }
}

/// Resolve `auto` through the classifier, keep concrete codes as they are
pub fn resolve_language(language: &LanguageCode, text: &str) -> LanguageCode {
    if language.is_auto() {
        guess_language(text)
    } else {
        language.clone()
    }
}

/// Provider script identifiers for a language; empty when unresolvable
pub fn script_names_for(language: &LanguageCode, text: &str) -> ProviderScriptName {
    let resolved = resolve_language(language, text);
    if resolved.is_auto() {
        return ProviderScriptName::none();
    }

    ProviderScriptName {
        scheme_a: SCHEME_A.get(resolved.as_str()).copied(),
        scheme_b: SCHEME_B.get(resolved.as_str()).copied(),
    }
}
