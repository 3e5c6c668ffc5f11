//! # tts-server
//!
//! HTTP API for the Fonetica TTS engine.
//!
//! Provides:
//! - `POST /api/tts`: text in, WAV bytes out
//! - `GET /api/health`: output directory and disk status
//! - `GET /`: service info

pub mod server;

pub use server::{create_router, AppState, TtsServer};
