//! # synthesizer
//!
//! Waveform generation for the Fonetica TTS engine.
//!
//! The [`Synthesizer`] turns symbol ID sequences into PCM audio. Two
//! backends are available: an ONNX Runtime backend driving an exported
//! FastSpeech2 model, and a deterministic mock that emits short sine
//! tones, used in tests and on machines without model weights.

pub mod onnx;
pub mod wav;

use std::path::Path;

use tracing::{debug, instrument};
use tts_core::{SynthesisParams, TtsResult, Waveform};

use crate::onnx::OnnxModel;

/// Samples emitted per input symbol by the mock backend at unit speed.
const MOCK_SAMPLES_PER_SYMBOL: usize = 256;

#[derive(Debug)]
enum Backend {
    Mock,
    Onnx(OnnxModel),
}

/// Converts symbol ID sequences into audio.
#[derive(Debug)]
pub struct Synthesizer {
    backend: Backend,
    sample_rate: u32,
}

impl Synthesizer {
    /// Create a synthesizer backed by the deterministic mock.
    pub fn new_mock(sample_rate: u32) -> Self {
        Self {
            backend: Backend::Mock,
            sample_rate,
        }
    }

    /// Load a FastSpeech2 ONNX model from disk.
    pub fn from_onnx(
        path: impl AsRef<Path>,
        sample_rate: u32,
        intra_threads: usize,
    ) -> TtsResult<Self> {
        let model = OnnxModel::load(path, intra_threads)?;
        Ok(Self {
            backend: Backend::Onnx(model),
            sample_rate,
        })
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whether this synthesizer uses the mock backend.
    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock)
    }

    /// Generate a waveform for a symbol ID sequence.
    #[instrument(skip(self, ids, params), fields(num_symbols = ids.len()))]
    pub fn synthesize(&self, ids: &[i64], params: &SynthesisParams) -> TtsResult<Waveform> {
        let samples = match &self.backend {
            Backend::Mock => self.mock_samples(ids, params),
            Backend::Onnx(model) => model.infer(ids, params)?,
        };
        debug!(num_samples = samples.len(), "synthesis complete");
        Ok(Waveform::new(samples, self.sample_rate))
    }

    /// One short tone per symbol so output length tracks input length
    /// and the duration control audibly stretches it.
    fn mock_samples(&self, ids: &[i64], params: &SynthesisParams) -> Vec<f32> {
        let per_symbol = (MOCK_SAMPLES_PER_SYMBOL as f32 * params.duration_control)
            .round()
            .max(1.0) as usize;
        let mut samples = Vec::with_capacity(ids.len() * per_symbol);
        for &id in ids {
            let freq = 80.0 + id.rem_euclid(64) as f32 * 12.5;
            for n in 0..per_symbol {
                let t = n as f32 / self.sample_rate as f32;
                samples.push(0.1 * (2.0 * std::f32::consts::PI * freq * t).sin());
            }
        }
        samples
    }
}
