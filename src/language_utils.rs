use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Serialize, Serializer};
use std::fmt;

/// Language utilities for ISO language code handling
///
/// Detection services answer with a mix of ISO 639-1 codes, ISO 639-2/3
/// codes and BCP 47 tags ("zh-CN", "pt_BR"). Everything downstream keys on
/// the primary ISO 639-1 subtag, so all codes go through `LanguageCode::new`.

/// Marker value for "language not resolved"
pub const AUTO: &str = "auto";

/// Best-guess language of a text, normalized to a short lowercase code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Normalize a raw code; anything unusable becomes `auto`
    pub fn new(raw: &str) -> Self {
        let primary = raw
            .trim()
            .to_lowercase()
            .replace('_', "-")
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();

        match primary.as_str() {
            "" | "und" | "unknown" | "auto" | "zxx" | "mul" => Self::auto(),
            code => match normalize_to_part1_or_part2t(code) {
                Ok(normalized) => Self(normalized),
                Err(_) => Self(code.to_string()),
            },
        }
    }

    /// The unresolved language
    pub fn auto() -> Self {
        Self(AUTO.to_string())
    }

    /// Whether the language is still unresolved
    pub fn is_auto(&self) -> bool {
        self.0 == AUTO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English name of the language, when known
    pub fn english_name(&self) -> Option<String> {
        if self.is_auto() {
            return None;
        }
        get_language_name(&self.0).ok()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for LanguageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// ISO 639-2/B codes that differ from their 639-2/T counterpart
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        "tib" => "bod",
        _ => return None,
    };
    Some(part2t)
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        let part2t = part2b_to_part2t(&normalized_code).unwrap_or(&normalized_code);

        if let Some(lang) = Language::from_639_3(part2t) {
            if let Some(code_639_1) = lang.to_639_1() {
                return Ok(code_639_1.to_string());
            }
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
