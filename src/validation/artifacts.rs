/*!
 * Cleanup of formatting artifacts around generated text.
 *
 * Completion models like to wrap answers in code fences, quotes, or a
 * one-line preamble. These are removed before the answer reaches the
 * validator.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\n?(.*?)\n?```$").expect("valid fence regex")
});

static PREAMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(here\s+is|here's|sure[,!]?|romani[sz]ed|romani[sz]ation|transliteration|transliterated)[^\n]*:\s*\n")
        .expect("valid preamble regex")
});

/// Strip code fences, a leading "Here is..." line, and wrapping quotes
pub fn strip_wrappers(text: &str) -> String {
    let mut cleaned = text.trim().to_string();

    if let Some(stripped) = PREAMBLE_REGEX.find(&cleaned).map(|m| cleaned[m.end()..].to_string()) {
        cleaned = stripped.trim().to_string();
    }

    if let Some(inner) = FENCE_REGEX
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
    {
        cleaned = inner.trim().to_string();
    }

    strip_quotes(&cleaned).to_string()
}

/// Remove one pair of matching quotes surrounding the whole text
fn strip_quotes(text: &str) -> &str {
    const PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('「', '」')];

    for (open, close) in PAIRS {
        if let Some(inner) = text.strip_prefix(*open).and_then(|t| t.strip_suffix(*close)) {
            if !inner.contains(*open) && !inner.contains(*close) {
                return inner.trim();
            }
        }
    }
    text
}
