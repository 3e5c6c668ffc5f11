//! Structured logging setup with tracing.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Logging format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format for log shippers.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}")),
        }
    }
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this a
/// second time is a no-op.
pub fn init_logging(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Text => {
            let _ = registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .try_init();
        }
        LogFormat::Json => {
            let _ = registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .try_init();
        }
    }
}

/// Initialize logging from environment variables.
///
/// Uses:
/// - `RUST_LOG` for log level (default: "info")
/// - `LOG_FORMAT` for format (default: "text")
pub fn init_logging_from_env() {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let format: LogFormat = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    init_logging(&level, format);
}
