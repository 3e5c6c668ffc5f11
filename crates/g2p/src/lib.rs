//! # g2p
//!
//! Grapheme-to-phoneme conversion for the Fonetica TTS engine.
//!
//! A [`Normalizer`] owns a pronunciation [`Lexicon`] and a configured
//! language code, and turns raw text into the brace-delimited phoneme
//! string the sequencer consumes:
//!
//! - English: lexicon lookup per word, with a small built-in fallback
//!   table and letter-run retries for out-of-lexicon words.
//! - Mandarin: whitespace-separated tone-numbered pinyin syllables
//!   (`ni3 hao3`), looked up syllable by syllable.
//!
//! Words with no pronunciation never fail the conversion; they become
//! silence markers.

mod english;
mod lexicon;
mod mandarin;

pub use lexicon::Lexicon;

use std::str::FromStr;

use tracing::{debug, instrument};
use tts_core::{Lang, PhonemeSequence, TtsResult};

/// Converts raw text into phonemes for one configured language.
#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Lexicon,
    language: String,
}

impl Normalizer {
    /// Create a normalizer over the given lexicon.
    ///
    /// The language code is kept verbatim and validated on each
    /// conversion, so an unsupported value rejects the request rather
    /// than the construction.
    pub fn new(lexicon: Lexicon, language: impl Into<String>) -> Self {
        Self {
            lexicon,
            language: language.into(),
        }
    }

    /// The configured language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The lexicon backing this normalizer.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Convert `text` into a grouped phoneme sequence.
    #[instrument(skip(self, text), fields(lang = %self.language, input_len = text.len()))]
    pub fn phonemes(&self, text: &str) -> TtsResult<PhonemeSequence> {
        let seq = match Lang::from_str(&self.language)? {
            Lang::En => english::to_phonemes(&self.lexicon, text),
            Lang::Zh => mandarin::to_phonemes(&self.lexicon, text),
        };
        debug!(groups = seq.groups().len(), "text converted to phonemes");
        Ok(seq)
    }

    /// Normalize `text` to the rendered phoneme string, e.g.
    /// `{HH AH0 L OW1 sp}`.
    pub fn normalize(&self, text: &str) -> TtsResult<String> {
        Ok(self.phonemes(text)?.render())
    }
}
