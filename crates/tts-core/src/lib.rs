//! # tts-core
//!
//! Core types and error definitions for the Fonetica TTS engine.
//!
//! This crate provides the foundational abstractions used across all other
//! crates in the workspace, including:
//!
//! - Common data types (`PhonemeSequence`, `Waveform`, `SynthesisParams`)
//! - Unified error handling via `TtsError`
//! - The YAML configuration surface (`PreprocessConfig`, `ModelConfig`,
//!   `TrainConfig`, `ServerConfig`)
//!
//! It carries no audio or model dependencies, so every other crate can
//! depend on it without pulling in inference machinery.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    EngineConfig, MetricsConfig, ModelConfig, PreprocessConfig, ServerConfig, TrainConfig,
};
pub use error::{TtsError, TtsResult};
pub use types::{Lang, PhonemeSequence, SynthesisParams, Waveform, SILENCE_MARKER};
