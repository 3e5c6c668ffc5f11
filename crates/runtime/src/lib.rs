//! # runtime
//!
//! Engine orchestration for the Fonetica TTS engine.
//!
//! This crate wires the text front-end to the synthesis backend:
//! - [`TtsEngine`]: normalize, sequence, and synthesize in one place
//! - [`OutputStore`]: generated audio on disk with age-based cleanup
//! - Structured logging and Prometheus metrics

pub mod engine;
pub mod logging;
pub mod metrics;
pub mod store;

pub use engine::{SynthesisOutput, TtsEngine};
pub use metrics::TtsMetrics;
pub use store::OutputStore;
