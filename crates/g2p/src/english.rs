//! English grapheme-to-phoneme conversion.
//!
//! Each word is resolved through the lexicon first, then a built-in
//! fallback table, then letter-run and digit-run retries; anything still
//! unresolved becomes a silence marker.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;
use tts_core::PhonemeSequence;

use crate::lexicon::Lexicon;

/// Minimal ARPABET pronunciations consulted when a word is missing from
/// the lexicon.
const FALLBACK: &[(&str, &[&str])] = &[
    ("hello", &["HH", "EH", "L", "OW"]),
    ("this", &["DH", "IH", "S"]),
    ("is", &["IH", "Z"]),
    ("a", &["AH"]),
    ("test", &["T", "EH", "S", "T"]),
    ("of", &["AH", "V"]),
    ("the", &["DH", "AH"]),
    ("fast", &["F", "AE", "S", "T"]),
    ("speech", &["S", "P", "IY", "CH"]),
    ("model", &["M", "AA", "D", "AH", "L"]),
    ("2", &["T", "UW"]),
    ("fastspeech", &["F", "AE", "S", "T", "S", "P", "IY", "CH"]),
];

/// Word separators. Each separator char is retained as its own token so
/// sentence punctuation can turn into silence.
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;.\-?!+\s]").unwrap());

/// Pronounceable sub-runs of a word that has no pronunciation of its
/// own.
static SUBRUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+|[0-9]+").unwrap());

pub(crate) fn to_phonemes(lexicon: &Lexicon, text: &str) -> PhonemeSequence {
    let text = text.trim_end_matches(|c: char| c.is_ascii_punctuation());
    // The product name reads per-letter otherwise.
    let text = text.replace("FastSpeech 2", "fastspeech 2");

    let mut seq = PhonemeSequence::new();
    for token in split_keeping_separators(&SEPARATOR_RE, &text) {
        let word = token.trim().to_lowercase();
        if word.is_empty() {
            continue;
        }
        if let Some(phonemes) = lexicon.lookup(&word) {
            seq.push_group(phonemes.iter().cloned());
        } else if let Some(phonemes) = fallback_lookup(&word) {
            seq.push_group(phonemes.iter().copied());
        } else if matches!(word.as_str(), "," | "." | "!" | "?") {
            seq.push_silence();
        } else {
            push_subruns(&mut seq, &word);
        }
    }
    seq
}

/// Retry an unresolved word as its letter and digit runs. A word with no
/// runs at all (pure symbols) contributes one silence marker.
fn push_subruns(seq: &mut PhonemeSequence, word: &str) {
    let mut matched = false;
    for run in SUBRUN_RE.find_iter(word) {
        matched = true;
        match fallback_lookup(run.as_str()) {
            Some(phonemes) => seq.push_group(phonemes.iter().copied()),
            None => {
                trace!(word, run = run.as_str(), "no pronunciation for run");
                seq.push_silence();
            }
        }
    }
    if !matched {
        seq.push_silence();
    }
}

fn fallback_lookup(word: &str) -> Option<&'static [&'static str]> {
    FALLBACK
        .iter()
        .find(|(entry, _)| *entry == word)
        .map(|(_, phonemes)| *phonemes)
}

/// Split `text` on single separator characters, keeping each separator
/// as its own token.
fn split_keeping_separators<'a>(re: &Regex, text: &'a str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            parts.push(&text[last..m.start()]);
        }
        parts.push(m.as_str());
        last = m.end();
    }
    if last < text.len() {
        parts.push(&text[last..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_reader("HELLO HH AH0 L OW1\nWORLD W ER1 L D\n".as_bytes()).unwrap()
    }

    #[test]
    fn test_lexicon_word() {
        let seq = to_phonemes(&lexicon(), "Hello");
        assert_eq!(seq.render(), "{HH AH0 L OW1}");
    }

    #[test]
    fn test_fallback_sentence() {
        let seq = to_phonemes(&Lexicon::default(), "this is a test");
        assert_eq!(seq.render(), "{DH IH S IH Z AH T EH S T}");
    }

    #[test]
    fn test_interior_punctuation_becomes_silence() {
        let seq = to_phonemes(&lexicon(), "hello, world");
        assert_eq!(seq.render(), "{HH AH0 L OW1 sp W ER1 L D}");
    }

    #[test]
    fn test_trailing_punctuation_stripped() {
        let seq = to_phonemes(&lexicon(), "hello world!?...");
        assert_eq!(seq.render(), "{HH AH0 L OW1 W ER1 L D}");
    }

    #[test]
    fn test_product_name_casing() {
        let seq = to_phonemes(&Lexicon::default(), "FastSpeech 2");
        assert_eq!(seq.render(), "{F AE S T S P IY CH T UW}");
    }

    #[test]
    fn test_unknown_word_run_retry() {
        // "fast2go" is nowhere, but its runs "fast" and "2" are.
        let seq = to_phonemes(&Lexicon::default(), "fast2go");
        assert_eq!(seq.render(), "{F AE S T T UW sp}");
    }

    #[test]
    fn test_symbol_only_word_is_silence() {
        let seq = to_phonemes(&Lexicon::default(), "@#$ hello");
        assert_eq!(seq.render(), "{sp HH EH L OW}");
    }

    #[test]
    fn test_split_keeping_separators() {
        let parts = split_keeping_separators(&SEPARATOR_RE, "a,b-c d");
        assert_eq!(parts, ["a", ",", "b", "-", "c", " ", "d"]);
    }
}
