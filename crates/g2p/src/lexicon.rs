//! Pronunciation lexicon loading and lookup.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;
use tts_core::TtsResult;

/// A word-to-phonemes pronunciation dictionary.
///
/// File format: one entry per line, the word followed by its phonemes,
/// all whitespace-separated (the LibriSpeech lexicon layout). Lookups
/// are case-insensitive. When a word appears more than once, the first
/// entry wins.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> TtsResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let lexicon = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            entries = lexicon.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Parse lexicon entries from a reader.
    pub fn from_reader(reader: impl BufRead) -> TtsResult<Self> {
        let mut entries = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let phonemes: Vec<String> = fields.map(str::to_string).collect();
            if phonemes.is_empty() {
                // A word with no pronunciation cannot be looked up.
                continue;
            }
            entries.entry(word.to_lowercase()).or_insert(phonemes);
        }
        Ok(Self { entries })
    }

    /// Look up the phonemes for a word, case-insensitively.
    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
