//! # symbols
//!
//! The symbol inventory and text-to-ID sequencing for the Fonetica TTS
//! engine.
//!
//! Model inputs are sequences of symbol IDs. [`text_to_sequence`]
//! accepts the mixed convention normalization produces: phoneme segments
//! wrapped in curly braces (`{HH AH0 L OW1}`), with any text outside
//! braces cleaned and sequenced character by character.

pub mod cleaners;
mod numbers;
mod table;

pub use numbers::{normalize_numbers, num_to_words, ordinal_to_words};
pub use table::{id_symbol, symbol_count, symbol_id, PAD, SYMBOLS};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use tts_core::{TtsError, TtsResult};

/// Splits off the first curly-brace phoneme segment.
static CURLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^(.*?)\{(.+?)\}(.*)$").unwrap());

/// Convert mixed text into symbol IDs.
///
/// Text outside braces runs through the named cleaner pipelines and is
/// looked up per character; characters without a symbol are skipped.
/// Phonemes inside braces are looked up with the `@` prefix and are
/// never cleaned; an unknown phoneme there is an error, because brace
/// content comes from a lexicon and a miss means the lexicon disagrees
/// with the model's symbol inventory.
pub fn text_to_sequence(text: &str, cleaner_names: &[String]) -> TtsResult<Vec<i64>> {
    let mut sequence = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match CURLY_RE.captures(rest) {
            Some(caps) => {
                push_cleaned_text(
                    &mut sequence,
                    caps.get(1).map_or("", |m| m.as_str()),
                    cleaner_names,
                )?;
                push_phonemes(&mut sequence, caps.get(2).map_or("", |m| m.as_str()))?;
                rest = caps.get(3).map_or("", |m| m.as_str());
            }
            None => {
                push_cleaned_text(&mut sequence, rest, cleaner_names)?;
                break;
            }
        }
    }
    Ok(sequence)
}

/// Map a sequence back to its symbols, skipping out-of-range IDs.
pub fn sequence_to_symbols(sequence: &[i64]) -> Vec<&'static str> {
    sequence.iter().filter_map(|&id| id_symbol(id)).collect()
}

fn push_cleaned_text(
    sequence: &mut Vec<i64>,
    text: &str,
    cleaner_names: &[String],
) -> TtsResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    let cleaned = cleaners::apply(text, cleaner_names)?;
    for ch in cleaned.chars() {
        let symbol = ch.to_string();
        match table::char_symbol_id(&symbol) {
            Some(id) => sequence.push(id),
            None => trace!(character = %ch, "character without symbol skipped"),
        }
    }
    Ok(())
}

fn push_phonemes(sequence: &mut Vec<i64>, phonemes: &str) -> TtsResult<()> {
    for phoneme in phonemes.split_whitespace() {
        let symbol = format!("@{phoneme}");
        let id = table::symbol_id(&symbol).ok_or_else(|| {
            TtsError::sequencing(format!("unknown phoneme '{phoneme}' in brace segment"))
        })?;
        sequence.push(id);
    }
    Ok(())
}
