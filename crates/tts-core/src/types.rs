//! Core data types for the TTS pipeline.

use serde::{Deserialize, Serialize};

use crate::error::TtsError;

/// The silence marker emitted for unpronounceable input.
///
/// Rendered phoneme strings use the bare form; the symbol table stores it
/// with the phoneme prefix (`@sp`).
pub const SILENCE_MARKER: &str = "sp";

/// Languages with a grapheme-to-phoneme path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English (lexicon plus letter-run fallback).
    #[default]
    En,
    /// Mandarin (tone-numbered pinyin syllables).
    Zh,
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Zh => write!(f, "zh"),
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "zh" => Ok(Lang::Zh),
            other => Err(TtsError::unsupported_language(other)),
        }
    }
}

/// Phonemes grouped by the source word that produced them.
///
/// Normalizers build one group per input word (or one silence group where
/// a word could not be pronounced); [`PhonemeSequence::render`] flattens
/// the groups into the brace-delimited string the sequencer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonemeSequence {
    groups: Vec<Vec<String>>,
}

impl PhonemeSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the phonemes for one source word.
    pub fn push_group<I>(&mut self, phonemes: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.groups
            .push(phonemes.into_iter().map(Into::into).collect());
    }

    /// Append a silence marker standing in for one source word.
    pub fn push_silence(&mut self) {
        self.groups.push(vec![SILENCE_MARKER.to_string()]);
    }

    /// The word groups accumulated so far.
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// True if no groups have been pushed.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render as one brace-delimited group of space-separated phonemes,
    /// e.g. `{HH AH0 L OW1}`.
    ///
    /// This is the single join convention for every language path. Word
    /// group boundaries do not survive rendering; they exist so each
    /// source word can be traced to the phonemes it produced. Empty
    /// groups and stray single-character punctuation phonemes become the
    /// silence marker, runs of consecutive silence collapse to one, and
    /// an empty sequence renders as `{sp}` so consumers never see an
    /// empty string.
    pub fn render(&self) -> String {
        let mut flat: Vec<&str> = Vec::new();
        for group in &self.groups {
            if group.is_empty() {
                push_collapsed(&mut flat, SILENCE_MARKER);
                continue;
            }
            for phoneme in group {
                if is_stray(phoneme) {
                    push_collapsed(&mut flat, SILENCE_MARKER);
                } else {
                    push_collapsed(&mut flat, phoneme);
                }
            }
        }
        if flat.is_empty() {
            flat.push(SILENCE_MARKER);
        }
        format!("{{{}}}", flat.join(" "))
    }
}

/// A phoneme that carries no pronounceable content: empty, or a single
/// character that is neither alphanumeric, underscore, nor whitespace.
fn is_stray(phoneme: &str) -> bool {
    let mut chars = phoneme.chars();
    match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some(c), None) => !c.is_alphanumeric() && c != '_' && !c.is_whitespace(),
        _ => false,
    }
}

fn push_collapsed<'a>(flat: &mut Vec<&'a str>, phoneme: &'a str) {
    if phoneme == SILENCE_MARKER && flat.last().copied() == Some(SILENCE_MARKER) {
        return;
    }
    flat.push(phoneme);
}

/// Control inputs for one synthesis pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParams {
    /// Speaker ID fed to multi-speaker checkpoints.
    pub speaker_id: i64,
    /// Pitch scale (1.0 = unchanged).
    pub pitch_control: f32,
    /// Energy scale (1.0 = unchanged).
    pub energy_control: f32,
    /// Duration scale (1.0 = unchanged, larger is slower).
    pub duration_control: f32,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            speaker_id: 0,
            pitch_control: 1.0,
            energy_control: 1.0,
            duration_control: 1.0,
        }
    }
}

impl SynthesisParams {
    /// Create parameters with default controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speaker ID.
    pub fn with_speaker(mut self, speaker_id: i64) -> Self {
        self.speaker_id = speaker_id;
        self
    }

    /// Set the duration scale.
    pub fn with_duration_control(mut self, duration_control: f32) -> Self {
        self.duration_control = duration_control;
        self
    }
}

/// A synthesized waveform (f32 PCM, mono).
#[derive(Debug, Clone)]
pub struct Waveform {
    /// PCM samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Waveform {
    /// Create a new waveform.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the number of samples.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Get the duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Check if the waveform holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_display_and_parse() {
        assert_eq!(Lang::En.to_string(), "en");
        assert_eq!(Lang::Zh.to_string(), "zh");
        assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
        assert_eq!(" ZH ".parse::<Lang>().unwrap(), Lang::Zh);
        assert!(matches!(
            "fr".parse::<Lang>(),
            Err(TtsError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_render_single_group() {
        let mut seq = PhonemeSequence::new();
        seq.push_group(vec!["HH", "AH0", "L", "OW1"]);
        assert_eq!(seq.render(), "{HH AH0 L OW1}");
    }

    #[test]
    fn test_render_multiple_groups_flatten() {
        let mut seq = PhonemeSequence::new();
        seq.push_group(vec!["DH", "IH", "S"]);
        seq.push_group(vec!["IH", "Z"]);
        assert_eq!(seq.render(), "{DH IH S IH Z}");
    }

    #[test]
    fn test_render_stray_punctuation_becomes_silence() {
        let mut seq = PhonemeSequence::new();
        seq.push_group(vec!["T", "EH", "S", "T"]);
        seq.push_group(vec!["'"]);
        assert_eq!(seq.render(), "{T EH S T sp}");
    }

    #[test]
    fn test_render_collapses_consecutive_silence() {
        let mut seq = PhonemeSequence::new();
        seq.push_silence();
        seq.push_silence();
        seq.push_group(vec!["N", "IY"]);
        seq.push_group(Vec::<String>::new());
        seq.push_silence();
        assert_eq!(seq.render(), "{sp N IY sp}");
    }

    #[test]
    fn test_render_empty_sequence_is_silence() {
        assert_eq!(PhonemeSequence::new().render(), "{sp}");
    }

    #[test]
    fn test_synthesis_params_defaults() {
        let params = SynthesisParams::default();
        assert_eq!(params.speaker_id, 0);
        assert_eq!(params.pitch_control, 1.0);
        assert_eq!(params.energy_control, 1.0);
        assert_eq!(params.duration_control, 1.0);

        let slow = SynthesisParams::new()
            .with_speaker(3)
            .with_duration_control(1.2);
        assert_eq!(slow.speaker_id, 3);
        assert_eq!(slow.duration_control, 1.2);
    }

    #[test]
    fn test_waveform_duration() {
        let wave = Waveform::new(vec![0.0; 22050], 22050);
        assert_eq!(wave.num_samples(), 22050);
        assert!((wave.duration_secs() - 1.0).abs() < f32::EPSILON);
        assert!(!wave.is_empty());
    }
}
