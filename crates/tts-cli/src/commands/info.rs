//! Info command implementation.

/// Run the info command.
pub fn run() {
    println!("Fonetica TTS Engine");
    println!("===================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Symbol table:");
    println!("  Symbols: {}", symbols::symbol_count());
    println!("  Padding: {:?} (ID 0)", symbols::PAD);
    println!();
    println!("Crates:");
    println!("  tts-core: Core types, errors, and configuration");
    println!("  g2p: Grapheme-to-phoneme normalization (EN/ZH)");
    println!("  symbols: Text cleaners and symbol sequencing");
    println!("  synthesizer: FastSpeech2 ONNX inference and WAV encoding");
    println!("  runtime: Engine orchestration and output management");
    println!("  tts-server: HTTP API server");
    println!("  tts-cli: This CLI tool");
    println!();
    println!("For more information, see: https://github.com/fonetica/fonetica-tts");
}
