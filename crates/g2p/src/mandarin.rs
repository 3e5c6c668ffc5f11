//! Mandarin grapheme-to-phoneme conversion.
//!
//! Input is whitespace-separated pinyin syllables with tone numbers,
//! e.g. `ni3 hao3`, the convention the pinyin lexicon uses. Neutral
//! tone is written as 5. Syllables missing from the lexicon become
//! silence markers.

use tracing::trace;
use tts_core::PhonemeSequence;

use crate::lexicon::Lexicon;

pub(crate) fn to_phonemes(lexicon: &Lexicon, text: &str) -> PhonemeSequence {
    let mut seq = PhonemeSequence::new();
    for syllable in text.split_whitespace() {
        match lexicon.lookup(syllable) {
            Some(phonemes) => seq.push_group(phonemes.iter().cloned()),
            None => {
                trace!(syllable, "syllable missing from lexicon");
                seq.push_silence();
            }
        }
    }
    seq
}
