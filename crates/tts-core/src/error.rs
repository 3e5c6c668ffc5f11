//! Unified error types for the TTS engine.

use std::path::PathBuf;

/// Main error type for TTS operations.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Grapheme-to-phoneme normalization failed.
    #[error("normalization failed: {0}")]
    Normalization(String),

    /// The configured language has no normalization path.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Converting a phoneme string to symbol IDs failed.
    #[error("sequencing failed: {0}")]
    Sequencing(String),

    /// Model loading error.
    #[error("model load failed for {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model inference error.
    #[error("inference error: {0}")]
    Inference(String),

    /// Audio encoding error.
    #[error("audio encode error: {0}")]
    AudioEncode(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A YAML configuration file failed to parse.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Timeout during operation.
    #[error("operation timeout after {ms}ms")]
    Timeout { ms: u64 },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (should not happen in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results with TtsError.
pub type TtsResult<T> = Result<T, TtsError>;

impl TtsError {
    /// Create a normalization error with message.
    pub fn normalization(msg: impl Into<String>) -> Self {
        Self::Normalization(msg.into())
    }

    /// Create an unsupported language error for the given language code.
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a sequencing error with message.
    pub fn sequencing(msg: impl Into<String>) -> Self {
        Self::Sequencing(msg.into())
    }

    /// Create a model load error for the given path.
    pub fn model_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ModelLoad {
            path: path.into(),
            source,
        }
    }

    /// Create an inference error with message.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create an audio encode error with message.
    pub fn audio_encode(msg: impl Into<String>) -> Self {
        Self::AudioEncode(msg.into())
    }

    /// Create a config error with message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error with message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error with message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
