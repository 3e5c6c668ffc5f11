//! Fonetica TTS HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use runtime::logging::LogFormat;
use runtime::{TtsEngine, TtsMetrics};
use tts_core::{EngineConfig, ServerConfig};
use tts_server::TtsServer;

/// Fonetica TTS HTTP server
#[derive(Debug, Parser)]
#[command(name = "tts-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Preprocessing configuration (preprocess.yaml)
    #[arg(long)]
    preprocess_config: Option<PathBuf>,

    /// Model configuration (model.yaml)
    #[arg(long)]
    model_config: Option<PathBuf>,

    /// Training configuration (train.yaml)
    #[arg(long)]
    train_config: Option<PathBuf>,

    /// Exported ONNX checkpoint; omit to run the mock backend
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Directory for generated audio
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Allowed CORS origin ("*" for any)
    #[arg(long)]
    cors_origin: Option<String>,

    /// Maximum accepted text length in characters
    #[arg(long)]
    max_text_len: Option<usize>,

    /// Run with the mock backend and an empty lexicon
    #[arg(long)]
    mock: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Disable the Prometheus exporter
    #[arg(long)]
    no_metrics: bool,

    /// Prometheus exporter port
    #[arg(long)]
    metrics_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    runtime::logging::init_logging(&args.log_level, args.log_format);

    let mut config = ServerConfig {
        host: args.host,
        port: args.port,
        ..ServerConfig::default()
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(origin) = args.cors_origin {
        config.cors_origin = origin;
    }
    if let Some(max) = args.max_text_len {
        config.max_text_len = max;
    }
    if args.no_metrics {
        config.metrics.enabled = false;
    }
    if let Some(port) = args.metrics_port {
        config.metrics.port = port;
    }

    if config.metrics.enabled {
        TtsMetrics::init(config.metrics.port).context("failed to start metrics exporter")?;
    }

    let engine = if args.mock {
        TtsEngine::new_mock(&config.output_dir).context("failed to build mock engine")?
    } else {
        let preprocess = args
            .preprocess_config
            .context("--preprocess-config is required unless --mock is set")?;
        let model = args
            .model_config
            .context("--model-config is required unless --mock is set")?;
        let train = args
            .train_config
            .context("--train-config is required unless --mock is set")?;

        let engine_config = EngineConfig::load(preprocess, model, train, args.checkpoint)
            .context("failed to load engine configuration")?;
        TtsEngine::from_config(&engine_config, &config).context("failed to build engine")?
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.bind_addr(),
        output_dir = %config.output_dir.display(),
        mock = engine.is_mock(),
        "starting TTS server"
    );

    TtsServer::new(config, Arc::new(engine))
        .run()
        .await
        .context("server failed")?;

    info!("server shutdown complete");
    Ok(())
}
