//! HTTP retrieval server.
//!
//! Exposes the retriever to a prompt-construction or chat service over a
//! small JSON API. Generating answers is left to that service; this server
//! only returns the ranked chunks and the rendered context string.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (version, cached chunk count) |
//! | `POST` | `/retrieve` | Ranked chunks plus rendered context for a query |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "internal", "message": "..." } }
//! ```
//!
//! Error codes: `bad_request` (malformed or incomplete request body, with
//! the rejection's 400/415/422 status), `internal` (500).
//!
//! A query without alphanumeric content is not an error: it returns `200`
//! with an empty `results` list.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser chat
//! front-ends can call the API directly.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use kb_retriever_core::models::RetrievedChunk;

use crate::config::Config;
use crate::context::build_context;
use crate::retriever::Retriever;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    retriever: Arc<Retriever>,
    context_chars: usize,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            retriever: Arc::new(Retriever::new(config)?),
            context_chars: config.context.max_chars,
        })
    }
}

/// Build the router. Separate from [`run_server`] so tests can serve it on
/// an ephemeral port.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/retrieve", post(handle_retrieve))
        .layer(cors)
        .with_state(state)
}

/// Start the server on `[server].bind` and run until the process exits.
///
/// The corpus is loaded before the listener binds, so a broken corpus
/// directory fails startup instead of the first request.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config)?;

    let retriever = Arc::clone(&state.retriever);
    let corpus = tokio::task::spawn_blocking(move || retriever.load()).await??;
    info!(
        documents = corpus.document_count(),
        chunks = corpus.len(),
        "corpus ready"
    );

    let bind_addr = config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("Retrieval server listening on http://{}", bind_addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(status: StatusCode, message: impl Into<String>) -> AppError {
    AppError {
        status,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    /// Chunks in the cached corpus; absent until the corpus is loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    chunks: Option<usize>,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let chunks = if state.retriever.is_loaded() {
        state.retriever.load().ok().map(|c| c.len())
    } else {
        None
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        chunks,
    })
}

// ============ POST /retrieve ============

#[derive(Deserialize)]
pub struct RetrieveRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
    #[serde(default)]
    pub min_chars: Option<usize>,
}

#[derive(Serialize)]
pub struct RetrieveResponse {
    pub results: Vec<RetrievedChunk>,
    pub degraded: bool,
    pub context: String,
}

/// Handler for `POST /retrieve`.
///
/// Retrieval runs on the blocking pool because the first call may read
/// the whole corpus directory.
async fn handle_retrieve(
    State(state): State<AppState>,
    payload: Result<Json<RetrieveRequest>, JsonRejection>,
) -> Result<Json<RetrieveResponse>, AppError> {
    let Json(req) = payload.map_err(|e| bad_request(e.status(), e.body_text()))?;
    let defaults = state.retriever.defaults();
    let k = req.k.unwrap_or(defaults.k);
    let min_chars = req.min_chars.unwrap_or(defaults.min_chars);

    let retriever = Arc::clone(&state.retriever);
    let query = req.query;
    let result = tokio::task::spawn_blocking(move || retriever.retrieve_detailed(&query, k, min_chars))
        .await
        .map_err(|e| internal(e.to_string()))?
        .map_err(|e| {
            error!(error = %e, "retrieval failed");
            internal(format!("{:#}", e))
        })?;

    let context = build_context(&result.chunks, state.context_chars);
    Ok(Json(RetrieveResponse {
        results: result.chunks,
        degraded: result.degraded,
        context,
    }))
}
