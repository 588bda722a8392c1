use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::config::GatewayConfig;
use crate::credentials::MissingCredential;
use crate::handlers;
use crate::protocol::{parse_payload, JsonRpcError, JsonRpcResponse, PayloadError, RpcPayload};
use crate::state::GatewayState;
use crate::upstream::UpstreamError;

/// Build the gateway router over shared state.
///
/// Kept free of I/O so integration tests drive the exact app the binary
/// serves.
pub fn build_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler).post(rpc_handler))
        .route("/health", get(health_handler))
        .route("/start-conversation", post(start_conversation_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(GatewayState::new(&config)?);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "convai gateway listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Protocol endpoint
// ---------------------------------------------------------------------------

/// `POST /` — the JSON-RPC endpoint, accepting one request object or a batch
/// array.
///
/// Error envelopes go out over HTTP 200; MCP clients match on the JSON-RPC
/// error, not the transport status. Traffic owing no response at all (a
/// single notification, or a batch of only notifications) returns 204 with
/// an empty body.
async fn rpc_handler(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    match parse_payload(&body) {
        Err(PayloadError::Malformed(detail)) => {
            tracing::debug!(%detail, "rejecting unparseable body");
            envelope(JsonRpcResponse::error(None, JsonRpcError::parse_error()))
        }
        Err(PayloadError::InvalidShape) => {
            envelope(JsonRpcResponse::error(None, JsonRpcError::invalid_request()))
        }
        Ok(RpcPayload::Single(item)) => match handlers::dispatch_value(item, &state).await {
            Some(resp) => envelope(resp),
            None => StatusCode::NO_CONTENT.into_response(),
        },
        // An empty batch is itself an invalid request, answered with a
        // single envelope rather than an array.
        Ok(RpcPayload::Batch(items)) if items.is_empty() => {
            envelope(JsonRpcResponse::error(None, JsonRpcError::invalid_request()))
        }
        Ok(RpcPayload::Batch(items)) => {
            let responses = handlers::dispatch_batch(items, &state).await;
            if responses.is_empty() {
                StatusCode::NO_CONTENT.into_response()
            } else {
                (StatusCode::OK, Json(responses)).into_response()
            }
        }
    }
}

fn envelope(resp: JsonRpcResponse) -> Response {
    (StatusCode::OK, Json(resp)).into_response()
}

// ---------------------------------------------------------------------------
// Liveness probes
// ---------------------------------------------------------------------------

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "convai-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Legacy endpoint
// ---------------------------------------------------------------------------

/// Body of the pre-MCP `POST /start-conversation` route.
#[derive(Debug, Deserialize)]
struct StartConversationBody {
    agent_id: Option<String>,
    api_key: Option<String>,
}

/// `POST /start-conversation` — kept for the original web client. Unlike
/// the tool path it honors a caller-supplied key, and it echoes upstream
/// failure statuses instead of wrapping them.
async fn start_conversation_handler(
    State(state): State<Arc<GatewayState>>,
    raw: Bytes,
) -> Response {
    // Parsed by hand; the {"detail": ...} error shape must hold even for
    // malformed bodies.
    let body: StartConversationBody = match serde_json::from_slice(&raw) {
        Ok(b) => b,
        Err(e) => {
            return detail(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {e}"),
            );
        }
    };

    let agent_id = match body.agent_id.as_deref().filter(|s| !s.is_empty()) {
        Some(id) => id,
        None => return detail(StatusCode::BAD_REQUEST, "agent_id is required"),
    };

    let api_key = match state.credentials.get(body.api_key.as_deref()) {
        Ok(k) => k,
        Err(MissingCredential) => return detail(StatusCode::BAD_REQUEST, "api_key is required"),
    };

    match state.upstream.start_conversation(agent_id, &api_key).await {
        Ok(handle) => (
            StatusCode::OK,
            Json(json!({
                "conversation_id": handle.conversation_id,
                "websocket_url": handle.websocket_url,
                "status": "success",
                "agent_id": handle.agent_id,
            })),
        )
            .into_response(),
        Err(err) => {
            let status = match &err {
                UpstreamError::Status { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                UpstreamError::Timeout(_) | UpstreamError::Transport(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            detail(status, err.to_string())
        }
    }
}

/// Error body shape the legacy client expects.
fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}
