//! CLI command implementations.

pub mod info;
pub mod normalize;
pub mod sequence;
pub mod synth;
