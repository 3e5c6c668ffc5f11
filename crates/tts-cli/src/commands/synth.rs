//! Synthesis command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use runtime::TtsEngine;
use synthesizer::wav::write_wav;
use tts_core::{EngineConfig, ServerConfig, SynthesisParams};

/// Options for the synth command.
#[derive(Debug)]
pub struct SynthOptions {
    pub input: String,
    pub output: PathBuf,
    pub preprocess_config: Option<PathBuf>,
    pub model_config: Option<PathBuf>,
    pub train_config: Option<PathBuf>,
    pub checkpoint: Option<PathBuf>,
    pub mock: bool,
    pub speaker: i64,
    pub pitch: f32,
    pub energy: f32,
    pub speed: f32,
}

/// Run the synthesis command.
pub async fn run(options: SynthOptions) -> Result<()> {
    let start = Instant::now();

    // Get input text
    let text = if let Some(path) = options.input.strip_prefix('@') {
        info!(path = path, "Reading text from file");
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
    } else {
        options.input.clone()
    };

    if text.trim().is_empty() {
        bail!("input text is empty");
    }

    let out_dir = options
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    info!(
        text_len = text.len(),
        output = %options.output.display(),
        mock = options.mock,
        "Starting synthesis"
    );

    let params = SynthesisParams {
        speaker_id: options.speaker,
        pitch_control: options.pitch,
        energy_control: options.energy,
        duration_control: options.speed,
    };
    let engine = build_engine(&options, &out_dir)?.with_params(params);

    // Synthesize
    let synth_start = Instant::now();
    let audio = engine.synthesize(&text).await?;
    let synth_duration = synth_start.elapsed();

    debug!(
        samples = audio.num_samples(),
        sample_rate = audio.sample_rate,
        synth_ms = synth_duration.as_millis() as u64,
        "Synthesis completed"
    );

    // Calculate real-time factor
    let audio_duration_sec = audio.duration_secs();
    let process_sec = synth_duration.as_secs_f32();
    let rtf = if audio_duration_sec > 0.0 {
        process_sec / audio_duration_sec
    } else {
        0.0
    };

    // Write to WAV file
    write_wav(&options.output, &audio)?;

    let total_duration = start.elapsed();

    // Print summary
    println!("Synthesis complete!");
    println!();
    println!("Input:     {} chars", text.len());
    println!("Output:    {}", options.output.display());
    println!("Backend:   {}", if engine.is_mock() { "mock" } else { "onnx" });
    println!();
    println!("Audio:");
    println!("  Duration:    {:.2} sec", audio_duration_sec);
    println!("  Samples:     {}", audio.num_samples());
    println!("  Sample rate: {} Hz", audio.sample_rate);
    println!();
    println!("Performance:");
    println!("  Synthesis:   {:.1} ms", synth_duration.as_millis());
    println!("  Total:       {:.1} ms", total_duration.as_millis());
    println!("  RTF:         {:.3}x", rtf);

    if rtf < 1.0 {
        println!("  Status:      Faster than real-time!");
    } else {
        println!("  Status:      Slower than real-time");
    }

    info!(
        output = %options.output.display(),
        duration_secs = audio_duration_sec,
        rtf = rtf,
        "Synthesis saved to file"
    );

    Ok(())
}

fn build_engine(options: &SynthOptions, out_dir: &Path) -> Result<TtsEngine> {
    if options.mock {
        return Ok(TtsEngine::new_mock(out_dir)?);
    }

    let preprocess = options
        .preprocess_config
        .as_deref()
        .context("--preprocess-config is required unless --mock is set")?;
    let model = options
        .model_config
        .as_deref()
        .context("--model-config is required unless --mock is set")?;
    let train = options
        .train_config
        .as_deref()
        .context("--train-config is required unless --mock is set")?;

    let config = EngineConfig::load(preprocess, model, train, options.checkpoint.clone())?;
    let server = ServerConfig {
        output_dir: out_dir.to_path_buf(),
        ..ServerConfig::default()
    };
    Ok(TtsEngine::from_config(&config, &server)?)
}
