use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use convai_gateway::credentials::CredentialProvider;
use convai_gateway::handlers::{ListAgentsTool, StartConversationTool};
use convai_gateway::registry::ToolHandler;
use convai_gateway::schema::validate_value;
use convai_gateway::upstream::ConvaiClient;

fn tools() -> (StartConversationTool, ListAgentsTool) {
    let upstream = Arc::new(
        ConvaiClient::new("http://127.0.0.1:9".to_string(), Duration::from_secs(1)).unwrap(),
    );
    let credentials = Arc::new(CredentialProvider::new(None));
    (
        StartConversationTool::new(upstream.clone(), credentials.clone()),
        ListAgentsTool::new(upstream, credentials),
    )
}

#[test]
fn json_schema_harness_validates_instance() {
    let schema: Value = serde_json::from_str(
        r#"{
      "$schema": "https://json-schema.org/draft/2020-12/schema",
      "type": "object",
      "required": ["content", "isError"],
      "additionalProperties": false,
      "properties": {
        "content": {
          "type": "array",
          "items": {
            "type": "object",
            "required": ["type", "text"],
            "properties": {
              "type": { "const": "text" },
              "text": { "type": "string" }
            }
          }
        },
        "isError": { "type": "boolean" }
      }
    }"#,
    )
    .unwrap();

    let instance: Value = serde_json::from_str(
        r#"{
      "content": [{ "type": "text", "text": "No ElevenLabs API key configured" }],
      "isError": true
    }"#,
    )
    .unwrap();

    validate_value(&schema, &instance).expect("schema validation failed");
}

#[test]
fn json_schema_harness_rejects_bad_instance() {
    let schema = json!({
        "type": "object",
        "required": ["agent_id"],
        "properties": { "agent_id": { "type": "string" } }
    });

    assert!(validate_value(&schema, &json!({})).is_err());
    assert!(validate_value(&schema, &json!({ "agent_id": 7 })).is_err());
}

#[test]
fn advertised_input_schemas_gate_arguments() {
    let (start, list) = tools();

    let start_schema = start.descriptor().input_schema;
    validate_value(&start_schema, &json!({ "agent_id": "agent-1" }))
        .expect("well-formed arguments must pass the advertised schema");
    assert!(
        validate_value(&start_schema, &json!({})).is_err(),
        "schema must require agent_id"
    );
    assert!(
        validate_value(&start_schema, &json!({ "agent_id": 7 })).is_err(),
        "schema must require a string agent_id"
    );

    let list_schema = list.descriptor().input_schema;
    validate_value(&list_schema, &json!({}))
        .expect("list_agents accepts an empty argument object");
}
