pub mod list_agents;
pub mod start_conversation;

pub use list_agents::ListAgentsTool;
pub use start_conversation::StartConversationTool;

use serde_json::Value;

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use crate::state::GatewayState;

/// Protocol methods the dispatcher routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    Notification,
    Unknown,
}

impl Method {
    fn parse(name: &str) -> Self {
        if name.starts_with("notifications/") {
            return Self::Notification;
        }
        match name {
            "initialize" => Self::Initialize,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            _ => Self::Unknown,
        }
    }
}

/// Dispatch one validated request envelope.
///
/// Returns `None` when no response is owed: notification-prefixed methods
/// (never executed) and requests carrying no `id` (executed, result
/// discarded).
pub async fn dispatch(req: &JsonRpcRequest, state: &GatewayState) -> Option<JsonRpcResponse> {
    tracing::debug!(method = %req.method, "dispatching request");

    let outcome = match Method::parse(&req.method) {
        Method::Notification => return None,
        Method::Initialize => Ok(initialize_result()),
        Method::ToolsList => Ok(tools_list_result(state)),
        Method::ToolsCall => call_tool(req.params.as_ref(), state).await,
        Method::Unknown => {
            tracing::warn!(method = %req.method, "unknown method");
            Err(JsonRpcError::method_not_found(&req.method))
        }
    };

    if req.id.is_none() {
        return None;
    }

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
        Err(error) => JsonRpcResponse::error(req.id.clone(), error),
    })
}

/// Validate one parsed JSON value as an envelope, then dispatch it.
pub async fn dispatch_value(item: Value, state: &GatewayState) -> Option<JsonRpcResponse> {
    match JsonRpcRequest::from_value(item) {
        Ok(req) => dispatch(&req, state).await,
        Err(reply) => Some(reply),
    }
}

/// Process a batch sequentially, collecting responses in input order.
///
/// Items are independent: one item's failure never aborts its siblings.
/// Notifications contribute no element to the output.
pub async fn dispatch_batch(items: Vec<Value>, state: &GatewayState) -> Vec<JsonRpcResponse> {
    let mut responses = Vec::with_capacity(items.len());
    for item in items {
        if let Some(resp) = dispatch_value(item, state).await {
            responses.push(resp);
        }
    }
    responses
}

fn initialize_result() -> Value {
    serde_json::json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": "convai-gateway",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn tools_list_result(state: &GatewayState) -> Value {
    let tools: Vec<_> = state.registry.descriptors().collect();
    serde_json::json!({ "tools": tools })
}

/// The `tools/call` path.
///
/// `Err` is the protocol fault channel (bad params, unknown tool, internal
/// fault); an `Ok` carries the serialized `ToolResult`, which reports
/// tool-level failures through `isError` on its own.
async fn call_tool(params: Option<&Value>, state: &GatewayState) -> Result<Value, JsonRpcError> {
    let params: ToolCallParams = match params {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            JsonRpcError::invalid_request_with(format!("Invalid tools/call params: {e}"))
        })?,
        None => {
            return Err(JsonRpcError::invalid_request_with(
                "Missing params for tools/call",
            ));
        }
    };

    let handler = match state.registry.get(&params.name) {
        Some(h) => h,
        None => {
            tracing::warn!(tool = %params.name, "unknown tool");
            return Err(JsonRpcError::unknown_tool(&params.name));
        }
    };

    let result = handler.call(params.arguments).await;
    serde_json::to_value(&result)
        .map_err(|e| JsonRpcError::internal_error(format!("Failed to serialize tool result: {e}")))
}
