//! The synthesis engine tying the text front-end to the audio backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use g2p::{Lexicon, Normalizer};
use synthesizer::Synthesizer;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use tts_core::{
    EngineConfig, ServerConfig, SynthesisParams, TtsError, TtsResult, Waveform,
};

use crate::metrics::TtsMetrics;
use crate::store::OutputStore;

/// Result of a synthesis request written to disk.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Where the WAV file landed.
    pub path: PathBuf,
    /// Seconds of audio generated.
    pub duration_secs: f32,
}

/// End-to-end text-to-speech engine.
///
/// Holds the normalizer, the cleaner pipeline, and the synthesis
/// backend, and owns the directory where generated audio lands. The
/// engine is shared behind an `Arc` and all operations take `&self`.
#[derive(Debug)]
pub struct TtsEngine {
    normalizer: Normalizer,
    cleaners: Vec<String>,
    synthesizer: Arc<Synthesizer>,
    // One inference at a time; the model session is not reentrant.
    inference_gate: Mutex<()>,
    store: OutputStore,
    params: SynthesisParams,
    inference_timeout: Duration,
    max_file_age: Duration,
    metrics: TtsMetrics,
}

impl TtsEngine {
    /// Build an engine from loaded configuration.
    ///
    /// Loads the lexicon named by the preprocessing config and the
    /// ONNX model named by `config.checkpoint_path`. Without a
    /// checkpoint the mock backend is used.
    pub fn from_config(config: &EngineConfig, server: &ServerConfig) -> TtsResult<Self> {
        let lexicon = Lexicon::from_file(config.preprocess.lexicon_path())?;
        let sample_rate = config.preprocess.sample_rate();

        let synthesizer = match &config.checkpoint_path {
            Some(path) => {
                let threads = std::thread::available_parallelism().map_or(1, usize::from);
                Synthesizer::from_onnx(path, sample_rate, threads)?
            }
            None => {
                info!("no checkpoint configured, using mock synthesis backend");
                Synthesizer::new_mock(sample_rate)
            }
        };

        if let Some(vocoder) = &config.model.vocoder {
            info!(model = %vocoder.model, speaker = %vocoder.speaker, "vocoder configuration");
        }

        Self::build(
            Normalizer::new(lexicon, config.preprocess.language()),
            config.preprocess.cleaners().to_vec(),
            synthesizer,
            SynthesisParams::default(),
            server,
        )
    }

    /// Replace the default synthesis controls.
    pub fn with_params(mut self, params: SynthesisParams) -> Self {
        self.params = params;
        self
    }

    /// Build an English engine with the mock backend and an empty
    /// lexicon. Every word falls through to letter spelling or silence.
    pub fn new_mock(output_dir: impl Into<PathBuf>) -> TtsResult<Self> {
        Self::mock_with_lexicon(Lexicon::default(), "en", output_dir)
    }

    /// Build a mock-backed engine around a caller-supplied lexicon.
    pub fn mock_with_lexicon(
        lexicon: Lexicon,
        language: &str,
        output_dir: impl Into<PathBuf>,
    ) -> TtsResult<Self> {
        let server = ServerConfig {
            output_dir: output_dir.into(),
            ..ServerConfig::default()
        };
        Self::build(
            Normalizer::new(lexicon, language),
            vec!["english_cleaners".to_string()],
            Synthesizer::new_mock(22050),
            SynthesisParams::default(),
            &server,
        )
    }

    fn build(
        normalizer: Normalizer,
        cleaners: Vec<String>,
        synthesizer: Synthesizer,
        params: SynthesisParams,
        server: &ServerConfig,
    ) -> TtsResult<Self> {
        let store = OutputStore::open(&server.output_dir)?;
        Ok(Self {
            normalizer,
            cleaners,
            synthesizer: Arc::new(synthesizer),
            inference_gate: Mutex::new(()),
            store,
            params,
            inference_timeout: Duration::from_millis(server.inference_timeout_ms),
            max_file_age: Duration::from_secs(server.max_file_age_secs),
            metrics: TtsMetrics::init_noop(),
        })
    }

    /// Directory where generated audio files land.
    pub fn output_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Whether the mock backend is in use.
    pub fn is_mock(&self) -> bool {
        self.synthesizer.is_mock()
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.synthesizer.sample_rate()
    }

    /// Normalize text into the brace-wrapped phoneme convention.
    pub fn normalize(&self, text: &str) -> TtsResult<String> {
        self.normalizer.normalize(text)
    }

    /// Normalize and sequence text into model input IDs.
    pub fn sequence(&self, text: &str) -> TtsResult<Vec<i64>> {
        let phonemes = self.normalizer.normalize(text)?;
        symbols::text_to_sequence(&phonemes, &self.cleaners)
    }

    /// Synthesize text into a waveform.
    ///
    /// Inference runs on the blocking pool under the engine's timeout.
    /// On timeout the request fails but the orphaned inference is left
    /// to finish; the next request waits on the session lock.
    #[instrument(skip(self, text), fields(input_len = text.len()))]
    pub async fn synthesize(&self, text: &str) -> TtsResult<Waveform> {
        if text.trim().is_empty() {
            return Err(TtsError::invalid_input("no text provided"));
        }

        self.metrics.request_received();
        self.metrics.add_active_requests(1.0);
        let started = Instant::now();

        let result = self.synthesize_inner(text).await;

        self.metrics.add_active_requests(-1.0);
        match &result {
            Ok(waveform) => {
                let elapsed = started.elapsed();
                let audio_secs = waveform.duration_secs() as f64;
                self.metrics.request_completed();
                self.metrics
                    .record_synthesis_latency(elapsed.as_secs_f64() * 1000.0);
                self.metrics.record_audio_seconds(audio_secs);
                if audio_secs > 0.0 {
                    self.metrics.record_rtf(elapsed.as_secs_f64() / audio_secs);
                }
                debug!(
                    num_samples = waveform.num_samples(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "synthesis finished"
                );
            }
            Err(TtsError::Timeout { .. }) => self.metrics.request_timeout(),
            Err(_) => self.metrics.request_failed(),
        }

        result
    }

    async fn synthesize_inner(&self, text: &str) -> TtsResult<Waveform> {
        let ids = self.sequence(text)?;

        let _gate = self.inference_gate.lock().await;

        let synthesizer = Arc::clone(&self.synthesizer);
        let params = self.params;
        let task = tokio::task::spawn_blocking(move || synthesizer.synthesize(&ids, &params));

        match tokio::time::timeout(self.inference_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(TtsError::internal(format!("synthesis task failed: {e}"))),
            Err(_) => Err(TtsError::Timeout {
                ms: self.inference_timeout.as_millis() as u64,
            }),
        }
    }

    /// Synthesize text and write the result as a WAV file under the
    /// output directory.
    #[instrument(skip(self, text))]
    pub async fn synthesize_to_file(&self, text: &str) -> TtsResult<SynthesisOutput> {
        let waveform = self.synthesize(text).await?;
        let path = self.store.allocate();
        synthesizer::wav::write_wav(&path, &waveform)?;
        debug!(
            path = %path.display(),
            duration_secs = waveform.duration_secs(),
            "audio written"
        );
        Ok(SynthesisOutput {
            path,
            duration_secs: waveform.duration_secs(),
        })
    }

    /// Remove generated files older than the configured retention.
    pub fn sweep_output_dir(&self) -> TtsResult<usize> {
        let removed = self.store.sweep(self.max_file_age)?;
        if removed > 0 {
            self.metrics.files_swept(removed as u64);
            info!(removed, "swept stale audio files");
        }
        Ok(removed)
    }
}
