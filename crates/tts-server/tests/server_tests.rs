//! HTTP API tests running the router in-process over the mock backend.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use filetime::FileTime;
use g2p::Lexicon;
use runtime::TtsEngine;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tts_core::ServerConfig;
use tts_server::{create_router, AppState};

fn lexicon() -> Lexicon {
    Lexicon::from_reader("HELLO HH AH0 L OW1\nWORLD W ER1 L D\n".as_bytes()).unwrap()
}

/// Build a router around a mock engine writing into a fresh tempdir.
///
/// The tempdir is returned so the caller keeps it alive for the
/// duration of the test.
fn test_app(language: &str) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let engine = TtsEngine::mock_with_lexicon(lexicon(), language, dir.path()).unwrap();
    let config = ServerConfig {
        output_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config),
    };
    (dir, create_router(state))
}

fn tts_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tts_returns_wav_audio() {
    let (_dir, app) = test_app("en");

    let response = app
        .oneshot(tts_request(json!({"text": "hello world"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/wav"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains(".wav"), "got {disposition}");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
}

#[tokio::test]
async fn test_tts_rejects_empty_text() {
    let (_dir, app) = test_app("en");

    let response = app
        .oneshot(tts_request(json!({"text": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "No text provided for conversion");
}

#[tokio::test]
async fn test_tts_rejects_missing_text_field() {
    let (_dir, app) = test_app("en");

    let response = app.oneshot(tts_request(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "No text provided for conversion");
}

#[tokio::test]
async fn test_tts_rejects_text_over_limit() {
    let (_dir, app) = test_app("en");

    let text = "a".repeat(501);
    let response = app.oneshot(tts_request(json!({"text": text}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Text exceeds the 500 character limit");
}

#[tokio::test]
async fn test_tts_reports_unsupported_language() {
    let (_dir, app) = test_app("fr");

    let response = app
        .oneshot(tts_request(json!({"text": "bonjour"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "unsupported language: fr");
}

#[tokio::test]
async fn test_health_reports_output_dir() {
    let (dir, app) = test_app("en");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "TTS server is up and running");
    assert_eq!(body["output_dir"], dir.path().display().to_string());
    assert!(body["available_space"].is_u64());
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (_dir, app) = test_app("en");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Fonetica TTS API is running");
    assert!(body["endpoints"]["/api/tts"].is_string());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// A successful request kicks off a background sweep of expired files.
#[tokio::test]
async fn test_request_sweeps_stale_outputs() {
    let (dir, app) = test_app("en");

    let stale = dir.path().join("stale.wav");
    std::fs::write(&stale, b"RIFF").unwrap();
    let mtime = FileTime::from_unix_time(FileTime::now().unix_seconds() - 7200, 0);
    filetime::set_file_mtime(&stale, mtime).unwrap();

    let response = app
        .oneshot(tts_request(json!({"text": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The sweep runs on a spawned task after the response is built.
    let mut swept = false;
    for _ in 0..50 {
        if !stale.exists() {
            swept = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(swept, "stale output should be removed after a request");
}
