//! HTTP server exposing the synthesis engine.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use runtime::TtsEngine;
use tts_core::{ServerConfig, TtsError, TtsResult};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The synthesis engine.
    pub engine: Arc<TtsEngine>,
    /// Server settings (limits, CORS origin).
    pub config: Arc<ServerConfig>,
}

/// The HTTP server.
pub struct TtsServer {
    config: ServerConfig,
    engine: Arc<TtsEngine>,
}

impl TtsServer {
    /// Create a server around an already-built engine.
    pub fn new(config: ServerConfig, engine: Arc<TtsEngine>) -> Self {
        Self { config, engine }
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run(self) -> TtsResult<()> {
        let addr = self.config.bind_addr();
        let state = AppState {
            engine: self.engine,
            config: Arc::new(self.config),
        };
        let app = create_router(state);

        info!(addr = %addr, "starting HTTP server");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/", get(root))
        .route("/api/tts", post(text_to_speech))
        .route("/api/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!(origin, "invalid CORS origin, falling back to any");
            layer.allow_origin(Any)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct TtsRequest {
    #[serde(default)]
    text: Option<String>,
}

async fn text_to_speech(
    State(state): State<AppState>,
    Json(payload): Json<TtsRequest>,
) -> Response {
    let text = match payload.text {
        Some(text) if !text.is_empty() => text,
        _ => return error_response(StatusCode::BAD_REQUEST, "No text provided for conversion"),
    };

    let max = state.config.max_text_len;
    if text.chars().count() > max {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("Text exceeds the {max} character limit"),
        );
    }

    info!(chars = text.chars().count(), "text received for synthesis");

    let output = match state.engine.synthesize_to_file(&text).await {
        Ok(output) => output,
        Err(e @ TtsError::UnsupportedLanguage(_)) => {
            error!(error = %e, "synthesis rejected");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
        Err(e) => {
            error!(error = %e, "synthesis failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error generating audio");
        }
    };

    let bytes = match tokio::fs::read(&output.path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(path = %output.path.display(), error = %e, "generated audio missing");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error generating audio");
        }
    };

    // Reap old outputs once the response is on its way.
    let engine = Arc::clone(&state.engine);
    tokio::spawn(async move {
        if let Err(e) = engine.sweep_output_dir() {
            warn!(error = %e, "output sweep failed");
        }
    });

    let filename = output
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.wav".to_string());

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    if let Ok(value) = format!("attachment; filename=\"{filename}\"").parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    (StatusCode::OK, headers, Body::from(bytes)).into_response()
}

async fn health_check(State(state): State<AppState>) -> Response {
    let output_dir = state.engine.output_dir();

    if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
        error!(error = %e, "output directory unavailable");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Server error: {e}"),
        );
    }

    Json(json!({
        "status": "ok",
        "message": "TTS server is up and running",
        "output_dir": output_dir.display().to_string(),
        "available_space": available_space(output_dir),
    }))
    .into_response()
}

async fn root() -> Response {
    Json(json!({
        "message": "Fonetica TTS API is running",
        "endpoints": {
            "/api/tts": "POST - convert text to speech",
            "/api/health": "GET - server health",
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Free bytes on the disk holding `path`, best effort.
///
/// The longest matching mount point wins so nested mounts report the
/// right filesystem.
fn available_space(path: &Path) -> u64 {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let disks = sysinfo::Disks::new_with_refreshed_list();
    disks
        .iter()
        .filter(|disk| canonical.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| disk.available_space())
        .unwrap_or(0)
}

/// Wait for shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
