//! Fonetica TTS command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

mod commands;

/// Fonetica TTS CLI
#[derive(Debug, Parser)]
#[command(name = "tts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Log format (json or text)
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize text to a WAV file
    Synth {
        /// Input text or file path (use @file.txt for file input)
        input: String,

        /// Output file path (WAV format)
        #[arg(short, long)]
        output: PathBuf,

        /// Preprocessing configuration (YAML)
        #[arg(long)]
        preprocess_config: Option<PathBuf>,

        /// Model configuration (YAML)
        #[arg(long)]
        model_config: Option<PathBuf>,

        /// Training configuration (YAML)
        #[arg(long)]
        train_config: Option<PathBuf>,

        /// ONNX checkpoint path
        #[arg(long)]
        checkpoint: Option<PathBuf>,

        /// Run with the mock backend instead of loading configs
        #[arg(long)]
        mock: bool,

        /// Speaker ID for multi-speaker checkpoints
        #[arg(long, default_value = "0")]
        speaker: i64,

        /// Pitch scale (1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        pitch: f32,

        /// Energy scale (1.0 = unchanged)
        #[arg(long, default_value = "1.0")]
        energy: f32,

        /// Duration scale (1.0 = unchanged, larger is slower)
        #[arg(long, default_value = "1.0")]
        speed: f32,
    },

    /// Normalize text to a phoneme string without synthesis
    Normalize {
        /// Input text
        input: String,

        /// Language code (en or zh)
        #[arg(long, default_value = "en")]
        lang: String,

        /// Pronunciation lexicon file
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Convert text to model symbol IDs (dry run)
    Sequence {
        /// Input text
        input: String,

        /// Language code (en or zh)
        #[arg(long, default_value = "en")]
        lang: String,

        /// Pronunciation lexicon file
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },

    /// Show version and symbol table info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let format = match cli.log_format {
        LogFormatArg::Json => runtime::logging::LogFormat::Json,
        LogFormatArg::Text => runtime::logging::LogFormat::Text,
    };
    runtime::logging::init_logging(&cli.log_level, format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting TTS CLI");

    match cli.command {
        Commands::Synth {
            input,
            output,
            preprocess_config,
            model_config,
            train_config,
            checkpoint,
            mock,
            speaker,
            pitch,
            energy,
            speed,
        } => {
            let options = commands::synth::SynthOptions {
                input,
                output,
                preprocess_config,
                model_config,
                train_config,
                checkpoint,
                mock,
                speaker,
                pitch,
                energy,
                speed,
            };
            commands::synth::run(options)
                .await
                .context("synthesis failed")?;
        }
        Commands::Normalize {
            input,
            lang,
            lexicon,
        } => {
            commands::normalize::run(&input, &lang, lexicon.as_deref())
                .context("normalization failed")?;
        }
        Commands::Sequence {
            input,
            lang,
            lexicon,
        } => {
            commands::sequence::run(&input, &lang, lexicon.as_deref())
                .context("sequencing failed")?;
        }
        Commands::Info => {
            commands::info::run();
        }
    }

    Ok(())
}
