use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::response::{JsonRpcError, JsonRpcResponse};

/// JSON-RPC 2.0 request id; a number or a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Validate one already-parsed JSON value as a request envelope.
    ///
    /// On failure returns the Invalid Request response to send back,
    /// echoing the caller's `id` when one can still be recovered from
    /// the malformed item (string or integer), `null` otherwise.
    pub fn from_value(value: Value) -> Result<Self, JsonRpcResponse> {
        if !value.is_object() {
            return Err(JsonRpcResponse::error(None, JsonRpcError::invalid_request()));
        }

        let recovered = recover_id(&value);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(req) if req.jsonrpc == "2.0" => Ok(req),
            Ok(req) => Err(JsonRpcResponse::error(
                req.id,
                JsonRpcError::invalid_request_with(format!(
                    "Unsupported jsonrpc version: {}",
                    req.jsonrpc
                )),
            )),
            Err(e) => Err(JsonRpcResponse::error(
                recovered,
                JsonRpcError::invalid_request_with(format!("Invalid request envelope: {e}")),
            )),
        }
    }
}

/// Best-effort id extraction from a value that failed envelope validation.
fn recover_id(value: &Value) -> Option<RpcId> {
    match value.get("id") {
        Some(Value::String(s)) => Some(RpcId::Str(s.clone())),
        Some(Value::Number(n)) => n.as_i64().map(RpcId::Number),
        _ => None,
    }
}

/// Top-level shape of one inbound protocol body.
#[derive(Debug)]
pub enum RpcPayload {
    Single(Value),
    Batch(Vec<Value>),
}

/// Why a raw body could not be classified as protocol traffic.
#[derive(Debug)]
pub enum PayloadError {
    /// Not valid JSON at all (-32700).
    Malformed(String),
    /// Valid JSON whose top level is neither an object nor an array (-32600).
    InvalidShape,
}

/// Classify a raw body as a single request or a batch.
///
/// Envelope validation happens per item afterwards; this only decides
/// the top-level shape.
pub fn parse_payload(raw: &[u8]) -> Result<RpcPayload, PayloadError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| PayloadError::Malformed(e.to_string()))?;
    match value {
        Value::Object(_) => Ok(RpcPayload::Single(value)),
        Value::Array(items) => Ok(RpcPayload::Batch(items)),
        _ => Err(PayloadError::InvalidShape),
    }
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<Value>,
}

/// Arguments for the `start_conversation` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConversationParams {
    pub agent_id: String,
}
