//! Relay endpoint: `POST /api/chat` forwards a prepared message list to the
//! completion provider and returns `{content}`.
//!
//! The browser never sees the provider key; it lives in [`RelayState`].

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use folio_core::{CompletionMessage, CompletionParams, FolioError, RelayConfig};
use folio_interaction::ProviderClient;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

pub const CHAT_PATH: &str = "/api/chat";

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<CompletionMessage>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub remote_enabled: bool,
}

/// Shared state: the provider client, absent when credentials are missing.
#[derive(Clone, Default)]
pub struct RelayState {
    client: Option<ProviderClient>,
}

impl RelayState {
    pub fn new(client: Option<ProviderClient>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, FolioError> {
        let client = ProviderClient::from_config(config)?;
        if client.is_none() {
            tracing::warn!("Provider endpoint or key missing; chat requests will fail");
        }
        Ok(Self::new(client))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

fn error_body(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

async fn handle_chat(
    State(state): State<RelayState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let Some(client) = state.client.as_ref() else {
        tracing::error!(%request_id, "Chat request rejected: provider not configured");
        return error_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Server configuration error" }),
        );
    };

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(%request_id, error = %rejection, "Malformed chat request");
            return error_body(
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request", "message": rejection.body_text() }),
            );
        }
    };
    if request.messages.is_empty() {
        return error_body(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid request", "message": "messages must be non-empty" }),
        );
    }

    let params = CompletionParams::from_optional(request.max_tokens, request.temperature);
    tracing::debug!(
        %request_id,
        message_count = request.messages.len(),
        max_tokens = params.max_tokens,
        "Forwarding chat request"
    );

    match client.forward(request.messages, params).await {
        Ok(content) => (StatusCode::OK, Json(ChatResponse { content })).into_response(),
        Err(failure) => {
            tracing::warn!(
                %request_id,
                kind = failure.kind(),
                error = %failure,
                "Provider call failed"
            );
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to process your request",
                    "message": failure.to_string(),
                }),
            )
        }
    }
}

async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> Response {
    error_body(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": "Method Not Allowed" }),
    )
}

async fn handle_health(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        remote_enabled: state.is_configured(),
    })
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Builds the relay router (`POST /api/chat`, `GET /health`).
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(
            CHAT_PATH,
            post(handle_chat)
                .options(handle_preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(middleware::map_response(add_cors_headers))
}

/// Serves the relay on `bind_addr` until Ctrl+C or SIGTERM.
pub async fn run_relay(state: RelayState, bind_addr: &str) -> Result<()> {
    let configured = state.is_configured();
    let app = router(state);
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind relay to {bind_addr}"))?;
    tracing::info!(
        bind_addr,
        remote_enabled = configured,
        "Relay listening (Ctrl+C/SIGTERM to stop)"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")?;
    tracing::info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!("Failed to listen for SIGTERM: {err}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
