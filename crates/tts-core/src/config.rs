//! Configuration structures for the TTS engine.
//!
//! The engine consumes the three YAML files a FastSpeech2 training run
//! produces (`preprocess.yaml`, `model.yaml`, `train.yaml`). Only the
//! fields this codebase interprets are typed; everything else is carried
//! as opaque key/value pairs so checkpoint directories round-trip intact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::TtsResult;

/// Preprocessing configuration (`preprocess.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Dataset name the checkpoint was trained on.
    #[serde(default)]
    pub dataset: String,
    /// Data file locations.
    #[serde(default)]
    pub path: DataPaths,
    /// Text and audio preprocessing settings.
    #[serde(default)]
    pub preprocessing: Preprocessing,
}

impl PreprocessConfig {
    /// Load from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> TtsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// The configured language code, as written in the file.
    pub fn language(&self) -> &str {
        &self.preprocessing.text.language
    }

    /// The configured cleaner pipeline names.
    pub fn cleaners(&self) -> &[String] {
        &self.preprocessing.text.text_cleaners
    }

    /// Path to the pronunciation lexicon.
    pub fn lexicon_path(&self) -> &Path {
        &self.path.lexicon_path
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.preprocessing.audio.sampling_rate
    }
}

/// File locations referenced by preprocessing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPaths {
    /// Pronunciation lexicon (word followed by its phonemes, one entry
    /// per line).
    #[serde(default)]
    pub lexicon_path: PathBuf,
    /// Corpus and feature paths used at training time, carried opaquely.
    #[serde(flatten)]
    pub rest: BTreeMap<String, serde_yaml::Value>,
}

/// Text and audio preprocessing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preprocessing {
    /// Text settings.
    #[serde(default)]
    pub text: TextSettings,
    /// Audio settings.
    #[serde(default)]
    pub audio: AudioSettings,
    /// Feature extraction settings (stft, mel, pitch, energy), carried
    /// opaquely.
    #[serde(flatten)]
    pub rest: BTreeMap<String, serde_yaml::Value>,
}

/// Text preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSettings {
    /// Cleaner pipeline applied to raw text outside phoneme braces.
    #[serde(default = "default_text_cleaners")]
    pub text_cleaners: Vec<String>,
    /// Language code. Kept as a string; validated when normalization
    /// runs so an unsupported value fails the request, not the boot.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_text_cleaners() -> Vec<String> {
    vec!["english_cleaners".to_string()]
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            text_cleaners: default_text_cleaners(),
            language: default_language(),
        }
    }
}

/// Audio preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Sample rate in Hz.
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: u32,
    /// Remaining audio settings, carried opaquely.
    #[serde(flatten)]
    pub rest: BTreeMap<String, serde_yaml::Value>,
}

fn default_sampling_rate() -> u32 {
    22050
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            rest: BTreeMap::new(),
        }
    }
}

/// Model configuration (`model.yaml`).
///
/// The architecture hyperparameters are opaque to this codebase; only
/// the vocoder block is inspected, for startup logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Vocoder selection.
    #[serde(default)]
    pub vocoder: Option<VocoderSettings>,
    /// Architecture hyperparameters, carried opaquely.
    #[serde(flatten)]
    pub rest: BTreeMap<String, serde_yaml::Value>,
}

impl ModelConfig {
    /// Load from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> TtsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

/// Vocoder block of the model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocoderSettings {
    /// Vocoder model name (e.g. "HiFi-GAN").
    pub model: String,
    /// Speaker set the vocoder was trained on.
    #[serde(default)]
    pub speaker: String,
}

/// Training configuration (`train.yaml`), carried fully opaque.
///
/// Loading it still validates the YAML so a corrupt checkpoint directory
/// fails at startup rather than being silently accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainConfig(pub BTreeMap<String, serde_yaml::Value>);

impl TrainConfig {
    /// Load from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> TtsResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the file held no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the engine needs to come up: the three YAML configs plus
/// an optional ONNX checkpoint. No checkpoint selects the mock backend.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Preprocessing configuration.
    pub preprocess: PreprocessConfig,
    /// Model configuration.
    pub model: ModelConfig,
    /// Training configuration.
    pub train: TrainConfig,
    /// ONNX checkpoint path, if running a real model.
    pub checkpoint_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Load the three YAML files and bundle them with the checkpoint
    /// path.
    pub fn load(
        preprocess: impl AsRef<Path>,
        model: impl AsRef<Path>,
        train: impl AsRef<Path>,
        checkpoint_path: Option<PathBuf>,
    ) -> TtsResult<Self> {
        Ok(Self {
            preprocess: PreprocessConfig::load(preprocess)?,
            model: ModelConfig::load(model)?,
            train: TrainConfig::load(train)?,
            checkpoint_path,
        })
    }
}

/// Server configuration (for tts-server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address.
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Server port.
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory synthesized WAV files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Allowed CORS origin. `*` permits any origin.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Maximum accepted request text length in characters.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    /// Age in seconds after which generated files are swept.
    #[serde(default = "default_max_file_age_secs")]
    pub max_file_age_secs: u64,
    /// Per-request inference timeout in milliseconds.
    #[serde(default = "default_inference_timeout_ms")]
    pub inference_timeout_ms: u64,
    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_audio")
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_text_len() -> usize {
    500
}

fn default_max_file_age_secs() -> u64 {
    3600
}

fn default_inference_timeout_ms() -> u64 {
    30000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            output_dir: default_output_dir(),
            cors_origin: default_cors_origin(),
            max_text_len: default_max_text_len(),
            max_file_age_secs: default_max_file_age_secs(),
            inference_timeout_ms: default_inference_timeout_ms(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// The address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable metrics collection.
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    /// Prometheus exporter port (if enabled).
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PREPROCESS_YAML: &str = r#"
dataset: "LJSpeech"
path:
  corpus_path: "/data/LJSpeech-1.1"
  lexicon_path: "lexicon/librispeech-lexicon.txt"
  preprocessed_path: "./preprocessed_data/LJSpeech"
preprocessing:
  text:
    text_cleaners: ["english_cleaners"]
    language: "en"
  audio:
    sampling_rate: 22050
    max_wav_value: 32768.0
  stft:
    filter_length: 1024
    hop_length: 256
"#;

    #[test]
    fn test_preprocess_config_parse() {
        let config: PreprocessConfig = serde_yaml::from_str(PREPROCESS_YAML).unwrap();
        assert_eq!(config.dataset, "LJSpeech");
        assert_eq!(config.language(), "en");
        assert_eq!(config.cleaners(), ["english_cleaners".to_string()]);
        assert_eq!(
            config.lexicon_path(),
            Path::new("lexicon/librispeech-lexicon.txt")
        );
        assert_eq!(config.sample_rate(), 22050);
        // Untyped keys survive the round trip.
        assert!(config.path.rest.contains_key("corpus_path"));
        assert!(config.preprocessing.rest.contains_key("stft"));
        assert!(config.preprocessing.audio.rest.contains_key("max_wav_value"));
    }

    #[test]
    fn test_preprocess_config_defaults() {
        let config: PreprocessConfig = serde_yaml::from_str("dataset: test").unwrap();
        assert_eq!(config.language(), "en");
        assert_eq!(config.cleaners(), ["english_cleaners".to_string()]);
        assert_eq!(config.sample_rate(), 22050);
    }

    #[test]
    fn test_model_config_vocoder() {
        let yaml = r#"
transformer:
  encoder_layer: 4
vocoder:
  model: "HiFi-GAN"
  speaker: "LJSpeech"
"#;
        let config: ModelConfig = serde_yaml::from_str(yaml).unwrap();
        let vocoder = config.vocoder.unwrap();
        assert_eq!(vocoder.model, "HiFi-GAN");
        assert_eq!(vocoder.speaker, "LJSpeech");
        assert!(config.rest.contains_key("transformer"));
    }

    #[test]
    fn test_engine_config_load() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, contents: &str| {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(contents.as_bytes()).unwrap();
            path
        };
        let preprocess = write("preprocess.yaml", PREPROCESS_YAML);
        let model = write("model.yaml", "vocoder:\n  model: MelGAN\n");
        let train = write("train.yaml", "optimizer:\n  batch_size: 16\n");

        let config = EngineConfig::load(&preprocess, &model, &train, None).unwrap();
        assert_eq!(config.preprocess.dataset, "LJSpeech");
        assert_eq!(config.model.vocoder.unwrap().model, "MelGAN");
        assert_eq!(config.train.len(), 1);
        assert!(config.checkpoint_path.is_none());
    }

    #[test]
    fn test_engine_config_load_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preprocess.yaml");
        std::fs::write(&path, "preprocessing: [not: valid: yaml").unwrap();
        let err = PreprocessConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::TtsError::ConfigParse(_)));
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.output_dir, PathBuf::from("generated_audio"));
        assert_eq!(config.max_text_len, 500);
        assert_eq!(config.max_file_age_secs, 3600);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_server_config_partial_yaml() {
        let config: ServerConfig = serde_yaml::from_str("port: 9001\ncors_origin: \"*\"").unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_text_len, 500);
    }
}
