/*!
 * Unicode-range script classification.
 *
 * The classifier answers "which non-Latin writing system does this text
 * use" from static code-point tables. Only a bounded prefix of the text is
 * scanned.
 */

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Number of characters inspected per sample
pub const SCAN_LIMIT: usize = 4000;

/// Writing system detected in a text sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTag {
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Arabic,
    Hebrew,
    Greek,
    Cyrillic,
    Armenian,
    Georgian,
    Hangul,
    Han,
    /// Hiragana and Katakana
    Kana,
    /// No known non-Latin script in the sample
    None,
}

/// Ordered classification table; the first tag with a matching char wins
const SCRIPT_TABLE: &[(ScriptTag, &[RangeInclusive<u32>])] = &[
    (ScriptTag::Devanagari, &[0x0900..=0x097F, 0xA8E0..=0xA8FF]),
    (ScriptTag::Bengali, &[0x0980..=0x09FF]),
    (ScriptTag::Gurmukhi, &[0x0A00..=0x0A7F]),
    (ScriptTag::Gujarati, &[0x0A80..=0x0AFF]),
    (ScriptTag::Oriya, &[0x0B00..=0x0B7F]),
    (ScriptTag::Tamil, &[0x0B80..=0x0BFF]),
    (ScriptTag::Telugu, &[0x0C00..=0x0C7F]),
    (ScriptTag::Kannada, &[0x0C80..=0x0CFF]),
    (ScriptTag::Malayalam, &[0x0D00..=0x0D7F]),
    (ScriptTag::Sinhala, &[0x0D80..=0x0DFF]),
    (ScriptTag::Thai, &[0x0E00..=0x0E7F]),
    (
        ScriptTag::Arabic,
        &[0x0600..=0x06FF, 0x0750..=0x077F, 0x08A0..=0x08FF, 0xFB50..=0xFDFF, 0xFE70..=0xFEFF],
    ),
    (ScriptTag::Hebrew, &[0x0590..=0x05FF, 0xFB1D..=0xFB4F]),
    (ScriptTag::Greek, &[0x0370..=0x03FF, 0x1F00..=0x1FFF]),
    (ScriptTag::Cyrillic, &[0x0400..=0x04FF, 0x0500..=0x052F, 0x2DE0..=0x2DFF, 0xA640..=0xA69F]),
    (ScriptTag::Armenian, &[0x0530..=0x058F]),
    (ScriptTag::Georgian, &[0x10A0..=0x10FF, 0x2D00..=0x2D2F]),
    (ScriptTag::Hangul, &[0xAC00..=0xD7AF, 0x1100..=0x11FF, 0x3130..=0x318F]),
    (
        ScriptTag::Han,
        &[0x4E00..=0x9FFF, 0x3400..=0x4DBF, 0xF900..=0xFAFF, 0x20000..=0x2A6DF],
    ),
    (ScriptTag::Kana, &[0x3040..=0x309F, 0x30A0..=0x30FF, 0x31F0..=0x31FF, 0xFF66..=0xFF9F]),
];

impl ScriptTag {
    /// Classify a single character
    pub fn of(c: char) -> ScriptTag {
        let code = c as u32;
        SCRIPT_TABLE
            .iter()
            .find(|(_, ranges)| ranges.iter().any(|r| r.contains(&code)))
            .map(|(tag, _)| *tag)
            .unwrap_or(ScriptTag::None)
    }

    /// Whether the tag names an actual script
    pub fn is_detected(self) -> bool {
        self != ScriptTag::None
    }

    /// Lowercase name used in logs and JSON
    pub fn name(self) -> &'static str {
        match self {
            Self::Devanagari => "devanagari",
            Self::Bengali => "bengali",
            Self::Gurmukhi => "gurmukhi",
            Self::Gujarati => "gujarati",
            Self::Oriya => "oriya",
            Self::Tamil => "tamil",
            Self::Telugu => "telugu",
            Self::Kannada => "kannada",
            Self::Malayalam => "malayalam",
            Self::Sinhala => "sinhala",
            Self::Thai => "thai",
            Self::Arabic => "arabic",
            Self::Hebrew => "hebrew",
            Self::Greek => "greek",
            Self::Cyrillic => "cyrillic",
            Self::Armenian => "armenian",
            Self::Georgian => "georgian",
            Self::Hangul => "hangul",
            Self::Han => "han",
            Self::Kana => "kana",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return the first script of the table that occurs in the sample
pub fn classify(text: &str) -> ScriptTag {
    let sample: Vec<u32> = text.chars().take(SCAN_LIMIT).map(|c| c as u32).collect();

    SCRIPT_TABLE
        .iter()
        .find(|(_, ranges)| {
            sample
                .iter()
                .any(|code| ranges.iter().any(|r| r.contains(code)))
        })
        .map(|(tag, _)| *tag)
        .unwrap_or(ScriptTag::None)
}

/// Every distinct script found in the sample, in table order
pub fn scripts_present(text: &str) -> Vec<ScriptTag> {
    let mut found: Vec<ScriptTag> = Vec::new();
    for tag in text.chars().take(SCAN_LIMIT).map(ScriptTag::of) {
        if tag.is_detected() && !found.contains(&tag) {
            found.push(tag);
        }
    }
    found.sort_by_key(|tag| {
        SCRIPT_TABLE
            .iter()
            .position(|(t, _)| t == tag)
            .unwrap_or(usize::MAX)
    });
    found
}
