//! Envelope codec tests: top-level payload classification, per-item envelope
//! validation with id recovery, and response serialization round-trips.

use convai_gateway::protocol::{
    parse_payload, JsonRpcError, JsonRpcRequest, JsonRpcResponse, PayloadError, RpcId, RpcPayload,
    ToolResult,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// parse_payload
// ---------------------------------------------------------------------------

#[test]
fn object_body_is_a_single_request() {
    let raw = br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#;
    match parse_payload(raw).unwrap() {
        RpcPayload::Single(value) => assert_eq!(value["method"].as_str().unwrap(), "initialize"),
        other => panic!("expected single request, got {other:?}"),
    }
}

#[test]
fn array_body_is_a_batch() {
    let raw = br#"[{"jsonrpc":"2.0","id":1,"method":"a"},{"jsonrpc":"2.0","method":"b"}]"#;
    match parse_payload(raw).unwrap() {
        RpcPayload::Batch(items) => assert_eq!(items.len(), 2),
        other => panic!("expected batch, got {other:?}"),
    }
}

#[test]
fn scalar_bodies_have_invalid_shape() {
    for raw in [&b"42"[..], b"\"hello\"", b"null", b"true"] {
        match parse_payload(raw) {
            Err(PayloadError::InvalidShape) => {}
            other => panic!("expected invalid shape for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn garbage_body_is_malformed() {
    match parse_payload(b"{not json") {
        Err(PayloadError::Malformed(_)) => {}
        other => panic!("expected malformed, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// per-item envelope validation
// ---------------------------------------------------------------------------

#[test]
fn well_formed_envelope_is_accepted() {
    let req = JsonRpcRequest::from_value(json!({
        "jsonrpc": "2.0",
        "id": "r-1",
        "method": "tools/call",
        "params": { "name": "list_agents" }
    }))
    .unwrap();

    assert_eq!(req.id, Some(RpcId::Str("r-1".into())));
    assert_eq!(req.method, "tools/call");
    assert!(req.params.is_some());
}

#[test]
fn envelope_without_id_is_a_notification() {
    let req = JsonRpcRequest::from_value(json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    }))
    .unwrap();

    assert!(req.id.is_none());
}

#[test]
fn missing_method_recovers_numeric_id() {
    let reply = JsonRpcRequest::from_value(json!({ "jsonrpc": "2.0", "id": 4 })).unwrap_err();

    assert_eq!(reply.id, Some(RpcId::Number(4)));
    assert_eq!(reply.error.unwrap().code, -32600);
}

#[test]
fn missing_method_recovers_string_id() {
    let reply =
        JsonRpcRequest::from_value(json!({ "jsonrpc": "2.0", "id": "req-9" })).unwrap_err();

    assert_eq!(reply.id, Some(RpcId::Str("req-9".into())));
    assert_eq!(reply.error.unwrap().code, -32600);
}

#[test]
fn unrecoverable_id_falls_back_to_null() {
    let reply =
        JsonRpcRequest::from_value(json!({ "jsonrpc": "2.0", "id": { "nested": true } }))
            .unwrap_err();

    assert!(reply.id.is_none());
    assert_eq!(reply.error.unwrap().code, -32600);
}

#[test]
fn non_object_item_is_invalid_request() {
    let reply = JsonRpcRequest::from_value(json!("just a string")).unwrap_err();

    assert!(reply.id.is_none());
    assert_eq!(reply.error.unwrap().code, -32600);
}

#[test]
fn wrong_version_is_rejected_with_id_echoed() {
    let reply = JsonRpcRequest::from_value(json!({
        "jsonrpc": "2.1",
        "id": 3,
        "method": "initialize"
    }))
    .unwrap_err();

    assert_eq!(reply.id, Some(RpcId::Number(3)));
    let error = reply.error.unwrap();
    assert_eq!(error.code, -32600);
    assert!(error.message.contains("2.1"));
}

// ---------------------------------------------------------------------------
// response serialization
// ---------------------------------------------------------------------------

#[test]
fn null_id_is_serialized_explicitly() {
    let resp = JsonRpcResponse::error(None, JsonRpcError::parse_error());
    let wire = serde_json::to_string(&resp).unwrap();

    assert!(wire.contains(r#""id":null"#), "null id must appear on the wire: {wire}");
    assert!(wire.contains("-32700"));
}

#[test]
fn exactly_one_of_result_and_error_is_present() {
    let success = serde_json::to_value(JsonRpcResponse::success(
        Some(RpcId::Number(1)),
        json!({ "ok": true }),
    ))
    .unwrap();
    assert!(success.get("result").is_some());
    assert!(success.get("error").is_none());

    let failure = serde_json::to_value(JsonRpcResponse::error(
        Some(RpcId::Number(2)),
        JsonRpcError::invalid_request(),
    ))
    .unwrap();
    assert!(failure.get("result").is_none());
    assert!(failure.get("error").is_some());
}

#[test]
fn success_response_round_trips() {
    let resp = JsonRpcResponse::success(
        Some(RpcId::Str("a-1".into())),
        json!({ "tools": [{ "name": "list_agents" }] }),
    );

    let wire = serde_json::to_string(&resp).unwrap();
    let reparsed: JsonRpcResponse = serde_json::from_str(&wire).unwrap();

    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        serde_json::to_value(&reparsed).unwrap()
    );
}

#[test]
fn error_response_round_trips() {
    let resp = JsonRpcResponse::error(
        Some(RpcId::Number(2)),
        JsonRpcError::method_not_found("nope"),
    );

    let wire = serde_json::to_string(&resp).unwrap();
    let reparsed: JsonRpcResponse = serde_json::from_str(&wire).unwrap();

    assert_eq!(reparsed.id, Some(RpcId::Number(2)));
    let error = reparsed.error.unwrap();
    assert_eq!(error.code, -32601);
    assert!(error.message.contains("nope"));
}

#[test]
fn tool_result_wire_shape() {
    let ok = serde_json::to_value(ToolResult::text("hi")).unwrap();
    assert_eq!(ok, json!({ "content": [{ "type": "text", "text": "hi" }], "isError": false }));

    let failed = serde_json::to_value(ToolResult::error("boom")).unwrap();
    assert_eq!(failed["isError"].as_bool().unwrap(), true);
    assert_eq!(failed["content"][0]["type"].as_str().unwrap(), "text");
}

#[test]
fn rpc_id_accepts_numbers_and_strings() {
    let n: RpcId = serde_json::from_value(json!(5)).unwrap();
    assert_eq!(n, RpcId::Number(5));

    let s: RpcId = serde_json::from_value(json!("req-1")).unwrap();
    assert_eq!(s, RpcId::Str("req-1".into()));
}
