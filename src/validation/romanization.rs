/*!
 * Acceptance gate for romanization candidates.
 *
 * A candidate is accepted when it is non-empty, contains at least one Latin
 * letter and, for non-ASCII input, carries strictly fewer non-ASCII chars
 * than the input. The check is a heuristic: short strings with a handful of
 * non-Latin chars are noisy, and the thresholds are deliberately loose.
 */

use std::fmt;
use unicode_script::{Script, UnicodeScript};

/// Reason a candidate was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing but whitespace came back
    Empty,
    /// No Latin letter anywhere in the candidate
    NoLatinLetters,
    /// The candidate is the untouched input
    Unchanged,
    /// The candidate is not more Latin than the input
    NotMoreLatin {
        /// Non-ASCII chars in the input
        original: usize,
        /// Non-ASCII chars in the candidate
        candidate: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty output"),
            Self::NoLatinLetters => write!(f, "output contains no Latin letters"),
            Self::Unchanged => write!(f, "output echoes the input"),
            Self::NotMoreLatin { original, candidate } => write!(
                f,
                "non-ASCII count did not drop ({} in input, {} in output)",
                original, candidate
            ),
        }
    }
}

/// ASCII letter or any alphabetic char of the Latin script
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (c.is_alphabetic() && c.script() == Script::Latin)
}

/// Number of chars outside ASCII
pub fn non_ascii_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_ascii()).count()
}

/// Share of alphabetic chars that are Latin letters, 1.0 for text without letters
pub fn latin_ratio(text: &str) -> f64 {
    let (latin, letters) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(latin, letters), c| {
            (latin + usize::from(is_latin_letter(c)), letters + 1)
        });

    if letters == 0 {
        1.0
    } else {
        latin as f64 / letters as f64
    }
}

/// Check a candidate against the text it claims to romanize
pub fn check_romanization(original: &str, candidate: &str) -> Result<(), Rejection> {
    if candidate.trim().is_empty() {
        return Err(Rejection::Empty);
    }

    if !candidate.chars().any(is_latin_letter) {
        return Err(Rejection::NoLatinLetters);
    }

    let before = non_ascii_count(original);
    if before == 0 {
        return Ok(());
    }

    if candidate == original {
        return Err(Rejection::Unchanged);
    }

    let after = non_ascii_count(candidate);
    if after >= before {
        return Err(Rejection::NotMoreLatin { original: before, candidate: after });
    }

    Ok(())
}

/// Boolean form of `check_romanization`
pub fn is_valid_romanization(original: &str, candidate: &str) -> bool {
    check_romanization(original, candidate).is_ok()
}
