mod common;

use assert_json_diff::{assert_json_eq, assert_json_include};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::RecordingBackend;
use translate_relay::server::api::{router, AppState};
use translate_relay::TranslatorConfig;

fn app(backend: RecordingBackend) -> Router {
    let config = TranslatorConfig {
        request_timeout_ms: 50,
        ..Default::default()
    };
    router(AppState::new(Arc::new(backend), config))
}

async fn post(app: Router, uri: &str, body: &str) -> Value {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(RecordingBackend::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_json_include!(actual: value, expected: json!({"status": "ok"}));
}

#[tokio::test]
async fn test_translate_single() {
    let value = post(
        app(RecordingBackend::new()),
        "/api/translate",
        r#"{"text":"Bonjour","to":"de"}"#,
    )
    .await;

    assert_json_eq!(
        value,
        json!({
            "success": true,
            "original": "Bonjour",
            "translated": "de:Bonjour",
            "from": "auto",
            "to": "de"
        })
    );
}

#[tokio::test]
async fn test_translate_requires_text() {
    let value = post(app(RecordingBackend::new()), "/api/translate", r#"{"texts":["a"]}"#).await;
    assert_json_eq!(value, json!({"success": false, "error": "Text field is required", "from": "", "to": ""}));
}

#[tokio::test]
async fn test_invalid_json_reported_in_body() {
    let value = post(app(RecordingBackend::new()), "/api/translate", "{oops").await;

    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().starts_with("Invalid JSON:"));
}

#[tokio::test]
async fn test_translate_single_times_out() {
    let value = post(
        app(RecordingBackend::new().stalling_on("slow")),
        "/api/translate",
        r#"{"text":"slow"}"#,
    )
    .await;

    assert_json_eq!(
        value,
        json!({
            "success": false,
            "from": "auto",
            "to": "en",
            "error": "translation timeout after 50ms"
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_batch_keeps_order_and_isolates_failures() {
    let value = post(
        app(RecordingBackend::new().failing_on("c").stalling_on("e")),
        "/api/translate/batch",
        r#"{"texts":["a","b","c","d","e",""],"from":"fr","to":"en"}"#,
    )
    .await;

    assert_json_eq!(
        value,
        json!({
            "success": true,
            "results": [
                {"original": "a", "translated": "en:a"},
                {"original": "b", "translated": "en:b"},
                {"original": "c", "translated": "", "error": "cannot translate c"},
                {"original": "d", "translated": "en:d"},
                {"original": "e", "translated": "", "error": "translation timeout after 50ms"},
                {"original": "", "translated": ""}
            ],
            "from": "fr",
            "to": "en"
        })
    );
}

#[tokio::test]
async fn test_batch_text_takes_precedence() {
    let value = post(
        app(RecordingBackend::new()),
        "/api/translate/batch",
        r#"{"text":"solo","texts":["x","y"]}"#,
    )
    .await;

    assert_eq!(value["translated"], "en:solo");
    assert!(value.get("results").is_none());
}

#[tokio::test]
async fn test_batch_single_entry_uses_single_shape() {
    let value = post(
        app(RecordingBackend::new()),
        "/api/translate/batch",
        r#"{"texts":["only"]}"#,
    )
    .await;

    assert_json_include!(
        actual: value,
        expected: json!({"success": true, "original": "only", "translated": "en:only"})
    );
}

#[tokio::test]
async fn test_batch_requires_input() {
    let value = post(app(RecordingBackend::new()), "/api/translate/batch", r#"{"to":"ja"}"#).await;
    assert_eq!(value["error"], "Text or Texts field is required");
}

#[tokio::test]
async fn test_long_text_is_segmented() {
    let value = post(
        app(RecordingBackend::new()),
        "/api/translate/long",
        r#"{"text":"  First. Second!  ","to":"it"}"#,
    )
    .await;

    assert_json_eq!(
        value,
        json!({
            "success": true,
            "original": "First. Second!",
            "translated": "it:First. Second!",
            "from": "auto",
            "to": "it",
            "segmentCount": 1
        })
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = app(RecordingBackend::new())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/translate")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_batch_single_empty_entry_skips_backend() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(AppState::new(backend.clone(), TranslatorConfig::default()));

    let value = post(app, "/api/translate/batch", r#"{"texts":[""]}"#).await;

    assert_json_include!(actual: value, expected: json!({"success": true, "from": "auto", "to": "en"}));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_translate_routes_oversized_text_to_segments() {
    let backend = Arc::new(RecordingBackend::new());
    let config = TranslatorConfig {
        max_segment_chars: 12,
        ..Default::default()
    };
    let app = router(AppState::new(backend.clone(), config));

    let value = post(app, "/api/translate", r#"{"text":"First one. Second one.","to":"it"}"#).await;

    assert_json_eq!(
        value,
        json!({
            "success": true,
            "original": "First one. Second one.",
            "translated": "it:First one.it:Second one.",
            "from": "auto",
            "to": "it",
            "segmentCount": 2
        })
    );
    assert_eq!(backend.calls(), 2);
}
