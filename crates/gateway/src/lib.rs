//! HTTP API gateway for agentwiki.
//!
//! Exposes the chatbot over REST:
//! - `POST /chat` — answer one question
//! - `GET /health` — liveness check
//!
//! Built on Axum. The agent is constructed once at startup and shared
//! read-only between requests; each request runs its own loop instance with
//! isolated step history, so concurrent requests need no locking.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use agentwiki_agent::RetrieverAgent;
use agentwiki_config::AppConfig;
use agentwiki_core::Error;
use agentwiki_retriever::WikipediaRetriever;

/// Shared application state for the gateway.
pub struct ChatState {
    pub agent: RetrieverAgent,
}

type SharedState = Arc<ChatState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // questions are small
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the model client, retriever, and agent ONCE and shares them via
/// the router state.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let model = agentwiki_providers::build_model(&config)?;
    let retriever = Arc::new(WikipediaRetriever::new(&config.retriever));

    let agent = RetrieverAgent::new(model, retriever, &config.model, config.temperature)
        .with_max_tokens(config.max_tokens)
        .with_max_iterations(config.max_iterations);

    let state = Arc::new(ChatState { agent });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The chatbot request: one user question.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// The chatbot response: the original question paired with the extracted
/// answer text.
#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub question: String,
    pub llm_response: String,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("chat request");

    let question = payload.question;
    let llm_response = state
        .agent
        .answer(&question)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ChatResponse {
        question,
        llm_response,
    }))
}

/// Map agent errors to HTTP statuses. Protocol violations by the model
/// (malformed output, missing answer tag) are upstream failures (502);
/// everything else is a plain internal error.
fn error_response(err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    warn!(error = %err, "chat request failed");
    let status = match err {
        Error::Parse(_) | Error::TagExtraction { .. } | Error::Model(_) | Error::Retriever(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
