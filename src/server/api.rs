//! HTTP API server implementation

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::core::client::TranslateBackend;
use crate::core::config::TranslatorConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::errors::TranslationError;
use crate::core::models::TranslationRequest;
use crate::core::segment::split_sentences;
use crate::core::timeout::translate_with_timeout;
use crate::core::wire::{TranslateRequest, TranslateResponse};

/// Application state
#[derive(Clone)]
pub struct AppState {
    dispatcher: Dispatcher,
    config: TranslatorConfig,
}

impl AppState {
    /// Every backend call made through this state is bounded by
    /// `config.request_timeout_ms`
    pub fn new(backend: Arc<dyn TranslateBackend>, config: TranslatorConfig) -> Self {
        let dispatcher =
            Dispatcher::from_config(backend, &config).with_timeout(config.request_timeout());
        Self { dispatcher, config }
    }

    fn parse(&self, body: &[u8]) -> Result<TranslateRequest, TranslateResponse> {
        serde_json::from_slice::<TranslateRequest>(body)
            .map(|req| req.with_defaults(&self.config.default_from, &self.config.default_to))
            .map_err(|e| TranslateResponse::failure(format!("Invalid JSON: {}", e)))
    }

    async fn translate_one(&self, text: &str, request: &TranslateRequest) -> TranslateResponse {
        let languages = request.languages();
        if text.is_empty() {
            return TranslateResponse::single(text, &Ok(String::new()), &languages);
        }

        let result = translate_with_timeout(
            self.dispatcher.backend().as_ref(),
            text,
            &languages.from,
            &languages.to,
            self.config.request_timeout(),
        )
        .await;

        if let Err(e) = &result {
            warn!("Translation error: {}", e);
        }

        TranslateResponse::single(text, &result, &languages)
    }

    /// Split `original` into sentence chunks and translate them as a batch
    async fn translate_segmented(
        &self,
        original: &str,
        request: &TranslateRequest,
    ) -> TranslateResponse {
        let segments = split_sentences(original, self.config.max_segment_chars);
        info!(
            "Long text: {} chars in {} segments",
            original.chars().count(),
            segments.len()
        );

        let languages = request.languages();
        let results = self
            .dispatcher
            .dispatch(TranslationRequest::new(segments, &languages.from, &languages.to))
            .await;

        TranslateResponse::joined(original, &results, &languages)
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Single text translation handler; texts over the segment size take the
/// long-text path
async fn translate(State(state): State<Arc<AppState>>, body: Bytes) -> Json<TranslateResponse> {
    let request = match state.parse(&body) {
        Ok(request) => request,
        Err(response) => return Json(response),
    };

    let text = match request.require_text() {
        Ok(text) => text,
        Err(e) => return Json(TranslateResponse::failure(e.to_string())),
    };

    if text.chars().count() > state.config.max_segment_chars {
        return Json(state.translate_segmented(text.trim(), &request).await);
    }

    Json(state.translate_one(text, &request).await)
}

/// Single-or-many translation handler
async fn translate_batch(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<TranslateResponse> {
    let request = match state.parse(&body) {
        Ok(request) => request,
        Err(response) => return Json(response),
    };

    let texts = match request.inputs() {
        Ok(texts) => texts,
        Err(e) => return Json(TranslateResponse::failure(e.to_string())),
    };

    if let [text] = texts.as_slice() {
        return Json(state.translate_one(text, &request).await);
    }

    info!("Batch request with {} texts", texts.len());
    let languages = request.languages();
    let results = state
        .dispatcher
        .dispatch(TranslationRequest::new(texts, &languages.from, &languages.to))
        .await;

    Json(TranslateResponse::batch(&results, &languages))
}

/// Long text handler: split into sentence chunks and translate as a batch
async fn translate_long(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<TranslateResponse> {
    let request = match state.parse(&body) {
        Ok(request) => request,
        Err(response) => return Json(response),
    };

    let original = request.text.trim();
    if original.is_empty() {
        let e = TranslationError::InvalidInput {
            message: "Text field is required".to_string(),
        };
        return Json(TranslateResponse::failure(e.to_string()));
    }

    Json(state.translate_segmented(original, &request).await)
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/translate", post(translate))
        .route("/api/translate/batch", post(translate_batch))
        .route("/api/translate/long", post(translate_long))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(
    host: String,
    port: u16,
    backend: Arc<dyn TranslateBackend>,
    config: TranslatorConfig,
) -> anyhow::Result<()> {
    let app = router(AppState::new(backend, config));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Translation server listening on http://{}", addr);
    info!("   POST /api/translate");
    info!("   POST /api/translate/batch");
    info!("   POST /api/translate/long");
    info!("   GET  /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
