/*!
 * Rule-based converters that run without any network access.
 *
 * Covered scripts: Kana, Han, Hangul, Cyrillic, Greek and Hebrew. Text in
 * any other script is left to the networked strategies. Kana is read with
 * Hepburn rules, Hangul with Revised Romanization, and Han only as Mandarin
 * pinyin: kanji in Japanese text have no local reading.
 */

use any_ascii::any_ascii_char;
use async_trait::async_trait;
use ib_romaji::HepburnRomanizer;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::errors::AttemptError;
use crate::language_utils::LanguageCode;
use crate::script::ScriptTag;

use super::deadline::Deadline;
use super::strategy::{LanguageContext, RomanizationStrategy};

static ROMANIZER: Lazy<HepburnRomanizer> = Lazy::new(HepburnRomanizer::default);

/// Scripts the local converters understand
pub const LOCAL_SCRIPTS: [ScriptTag; 6] = [
    ScriptTag::Kana,
    ScriptTag::Han,
    ScriptTag::Hangul,
    ScriptTag::Cyrillic,
    ScriptTag::Greek,
    ScriptTag::Hebrew,
];

/// Local rule-based romanization
#[derive(Debug, Default)]
pub struct LocalStrategy;

impl LocalStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Whether the local converters handle `script`
    pub fn supports(script: ScriptTag) -> bool {
        LOCAL_SCRIPTS.contains(&script)
    }
}

const HANGUL_FIRST: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const SILENT_INITIAL: usize = 11;
const RIEUL_INITIAL: usize = 5;
const RIEUL_FINAL: usize = 8;

const INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p", "h",
];

const MEDIALS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we", "wi",
    "yu", "eu", "ui", "i",
];

const FINALS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "k", "m", "l", "l", "l", "p", "l", "m", "p", "p", "t",
    "t", "ng", "t", "t", "k", "t", "p", "t",
];

/// A final re-read as the onset of a following syllable that starts silent
const LIAISON: [Option<&str>; 28] = [
    None, Some("g"), Some("kk"), None, Some("n"), None, None, Some("d"), Some("r"), None, None, None,
    None, None, None, None, Some("m"), Some("b"), None, Some("s"), Some("ss"), None, Some("j"),
    Some("ch"), Some("k"), Some("t"), Some("p"), Some(""),
];

fn is_hangul_syllable(c: char) -> bool {
    (HANGUL_FIRST..=HANGUL_LAST).contains(&(c as u32))
}

/// Revised Romanization of a run of precomposed syllables
///
/// Handles liaison into a silent onset and the doubled `ll`; other sound
/// changes across syllables are not applied.
fn romanize_hangul(run: &[char]) -> String {
    let jamo: Vec<(usize, usize, usize)> = run
        .iter()
        .map(|&c| {
            let index = (c as u32 - HANGUL_FIRST) as usize;
            (index / 588, (index % 588) / 28, index % 28)
        })
        .collect();

    let mut out = String::with_capacity(run.len() * 3);
    for (i, &(initial, medial, last)) in jamo.iter().enumerate() {
        let previous_final = if i > 0 { jamo[i - 1].2 } else { 0 };
        let carried = initial == SILENT_INITIAL && LIAISON[previous_final].is_some();

        if initial == RIEUL_INITIAL && previous_final == RIEUL_FINAL {
            out.push('l');
        } else if !carried {
            out.push_str(INITIALS[initial]);
        }
        out.push_str(MEDIALS[medial]);

        let next_silent = jamo.get(i + 1).is_some_and(|next| next.0 == SILENT_INITIAL);
        match LIAISON[last] {
            Some(onset) if next_silent => out.push_str(onset),
            _ => out.push_str(FINALS[last]),
        }
    }
    out
}

/// CJK and fullwidth punctuation that travels with kana and Han text
fn is_cjk_punctuation(c: char) -> bool {
    matches!(c as u32, 0x3000..=0x303F | 0xFF01..=0xFF65 | 0x2018..=0x201F | 0x2026)
}

/// Kind of the last piece written, for word spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emitted {
    Other,
    Han,
    ClausePunctuation,
    Word,
}

/// Append a romanized word, spaced off from a preceding Han syllable or clause mark
fn push_word(out: &mut String, previous: &mut Emitted, word: &str) {
    if word.is_empty() {
        return;
    }
    if matches!(previous, Emitted::Han | Emitted::ClausePunctuation) {
        out.push(' ');
    }
    out.push_str(word);
    *previous = Emitted::Word;
}

/// Index just past the run of chars satisfying `same` that begins at `start`
fn run_end(chars: &[char], start: usize, same: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|&c| !same(c))
        .map_or(chars.len(), |offset| start + offset)
}

/// Romanize `text` read as `language`; other scripts pass through
///
/// Returns `None` when the text needs a reading the local tables lack: Han
/// outside Chinese, or kana the romanizer rejects.
pub fn convert(text: &str, language: &LanguageCode) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut previous = Emitted::Other;
    let mut start = 0;

    while start < chars.len() {
        let c = chars[start];
        let tag = ScriptTag::of(c);

        if tag == ScriptTag::Kana {
            let end = run_end(&chars, start, |c| ScriptTag::of(c) == ScriptTag::Kana);
            let run: String = chars[start..end].iter().collect();
            let romaji = ROMANIZER.romanize_kana_str_all(&run)?;
            push_word(&mut out, &mut previous, &romaji);
            start = end;
            continue;
        }

        if is_hangul_syllable(c) {
            let end = run_end(&chars, start, is_hangul_syllable);
            push_word(&mut out, &mut previous, &romanize_hangul(&chars[start..end]));
            start = end;
            continue;
        }

        if tag == ScriptTag::Han {
            if language.as_str() != "zh" {
                return None;
            }
            let syllable = any_ascii_char(c).to_lowercase();
            if !syllable.is_empty() {
                if previous != Emitted::Other {
                    out.push(' ');
                }
                out.push_str(&syllable);
                previous = Emitted::Han;
            }
        } else if is_cjk_punctuation(c) {
            let mark = any_ascii_char(c);
            out.push_str(mark);
            previous = if mark.ends_with([',', '.', '!', '?', ';', ':']) {
                Emitted::ClausePunctuation
            } else {
                Emitted::Other
            };
        } else if tag == ScriptTag::Hangul {
            // loose jamo
            push_word(&mut out, &mut previous, &any_ascii_char(c).to_lowercase());
        } else if LocalStrategy::supports(tag) {
            push_word(&mut out, &mut previous, any_ascii_char(c));
        } else if c.is_alphanumeric() {
            let mut buffer = [0; 4];
            push_word(&mut out, &mut previous, c.encode_utf8(&mut buffer));
        } else {
            out.push(c);
            previous = Emitted::Other;
        }
        start += 1;
    }

    Some(out)
}

#[async_trait]
impl RomanizationStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    fn timeout(&self) -> Duration {
        Duration::ZERO
    }

    async fn attempt(
        &self,
        chunk: &str,
        context: &LanguageContext,
        _deadline: Deadline,
    ) -> Result<String, AttemptError> {
        if !Self::supports(context.script) {
            return Err(AttemptError::unavailable(format!(
                "no local converter for {} script",
                context.script
            )));
        }
        convert(chunk, &context.language).ok_or_else(|| {
            AttemptError::unavailable(format!("no local reading for this '{}' chunk", context.language))
        })
    }
}
