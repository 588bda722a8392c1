use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::credentials::CredentialProvider;
use crate::protocol::{StartConversationParams, ToolResult};
use crate::registry::{ToolDescriptor, ToolHandler};
use crate::upstream::ConvaiClient;

/// `start_conversation` tool: create an upstream conversation for an agent
/// and hand back the connection details, including the derived realtime URL.
pub struct StartConversationTool {
    upstream: Arc<ConvaiClient>,
    credentials: Arc<CredentialProvider>,
}

impl StartConversationTool {
    pub fn new(upstream: Arc<ConvaiClient>, credentials: Arc<CredentialProvider>) -> Self {
        Self { upstream, credentials }
    }
}

#[async_trait]
impl ToolHandler for StartConversationTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "start_conversation".into(),
            description: "Start a conversation with an ElevenLabs conversational-AI agent \
                          and return the websocket URL to join it"
                .into(),
            input_schema: json!({
                "type": "object",
                "required": ["agent_id"],
                "properties": {
                    "agent_id": {
                        "type": "string",
                        "description": "ElevenLabs agent id to start the conversation with"
                    }
                }
            }),
        }
    }

    async fn call(&self, arguments: Option<Value>) -> ToolResult {
        let params: StartConversationParams = match arguments {
            Some(v) => match serde_json::from_value(v) {
                Ok(p) => p,
                Err(e) => {
                    return ToolResult::error(format!(
                        "Invalid arguments for start_conversation: {e}"
                    ));
                }
            },
            None => {
                return ToolResult::error(
                    "Missing arguments for start_conversation: agent_id is required",
                );
            }
        };
        if params.agent_id.is_empty() {
            return ToolResult::error("agent_id is required");
        }

        // Tool calls resolve the process-wide key only; per-call keys exist
        // solely on the legacy endpoint.
        let api_key = match self.credentials.get(None) {
            Ok(k) => k,
            Err(e) => return e.into(),
        };

        match self
            .upstream
            .start_conversation(&params.agent_id, &api_key)
            .await
        {
            Ok(handle) => match serde_json::to_string(&handle) {
                Ok(json) => ToolResult::text(json),
                Err(e) => ToolResult::error(format!("Serialization failed: {e}")),
            },
            Err(e) => e.into(),
        }
    }
}
