//! Text cleaner pipelines.
//!
//! Cleaners run over raw text before character sequencing (phoneme
//! segments in braces are never cleaned). Checkpoints name the pipeline
//! they were trained with in their preprocessing configuration:
//!
//! - `basic_cleaners`: lowercase and whitespace collapse, any language.
//! - `transliteration_cleaners`: the above plus ASCII transliteration.
//! - `english_cleaners`: the above plus number and abbreviation
//!   expansion.

use once_cell::sync::Lazy;
use regex::Regex;
use tts_core::{TtsError, TtsResult};
use unicode_normalization::UnicodeNormalization;

use crate::numbers;

/// Title abbreviations expanded by the English pipeline. Matched against
/// already-lowercased text; the trailing dot is part of the match.
const ABBREVIATIONS: [(&str, &str); 18] = [
    ("mrs", "misess"),
    ("mr", "mister"),
    ("dr", "doctor"),
    ("st", "saint"),
    ("co", "company"),
    ("jr", "junior"),
    ("maj", "major"),
    ("gen", "general"),
    ("drs", "doctors"),
    ("rev", "reverend"),
    ("lt", "lieutenant"),
    ("hon", "honorable"),
    ("sgt", "sergeant"),
    ("capt", "captain"),
    ("esq", "esquire"),
    ("ltd", "limited"),
    ("col", "colonel"),
    ("ft", "fort"),
];

static ABBREVIATION_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|&(abbr, expansion)| {
            let re = Regex::new(&format!(r"(?i)\b{abbr}\.")).unwrap();
            (re, expansion)
        })
        .collect()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Apply the named cleaner pipelines to `text`, in order.
pub fn apply(text: &str, cleaner_names: &[String]) -> TtsResult<String> {
    let mut out = text.to_string();
    for name in cleaner_names {
        out = match name.as_str() {
            "basic_cleaners" => basic_cleaners(&out),
            "transliteration_cleaners" => transliteration_cleaners(&out),
            "english_cleaners" => english_cleaners(&out),
            other => {
                return Err(TtsError::config(format!("unknown text cleaner: {other}")));
            }
        };
    }
    Ok(out)
}

/// Lowercase and collapse whitespace, without transliteration.
pub fn basic_cleaners(text: &str) -> String {
    collapse_whitespace(&lowercase(text))
}

/// ASCII transliteration, lowercase, collapse whitespace.
pub fn transliteration_cleaners(text: &str) -> String {
    collapse_whitespace(&lowercase(&convert_to_ascii(text)))
}

/// Full English pipeline, including number and abbreviation expansion.
pub fn english_cleaners(text: &str) -> String {
    let text = convert_to_ascii(text);
    let text = lowercase(&text);
    let text = numbers::normalize_numbers(&text);
    let text = expand_abbreviations(&text);
    collapse_whitespace(&text)
}

fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Transliterate to ASCII: canonical decomposition separates accents
/// from their base letters, then everything non-ASCII is dropped.
fn convert_to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}

fn expand_abbreviations(text: &str) -> String {
    let mut out = text.to_string();
    for (re, expansion) in ABBREVIATION_RES.iter() {
        out = re.replace_all(&out, *expansion).into_owned();
    }
    out
}
