use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::credentials::CredentialProvider;
use crate::protocol::ToolResult;
use crate::registry::{ToolDescriptor, ToolHandler};
use crate::upstream::ConvaiClient;

/// `list_agents` tool: fetch the conversational-AI agents available to the
/// configured account. Takes no arguments; the upstream payload is returned
/// pretty-printed, without reshaping.
pub struct ListAgentsTool {
    upstream: Arc<ConvaiClient>,
    credentials: Arc<CredentialProvider>,
}

impl ListAgentsTool {
    pub fn new(upstream: Arc<ConvaiClient>, credentials: Arc<CredentialProvider>) -> Self {
        Self { upstream, credentials }
    }
}

#[async_trait]
impl ToolHandler for ListAgentsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "list_agents".into(),
            description: "List the conversational-AI agents available to the configured \
                          ElevenLabs account"
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, _arguments: Option<Value>) -> ToolResult {
        let api_key = match self.credentials.get(None) {
            Ok(k) => k,
            Err(e) => return e.into(),
        };

        match self.upstream.list_agents(&api_key).await {
            Ok(agents) => match serde_json::to_string_pretty(&agents) {
                Ok(json) => ToolResult::text(json),
                Err(e) => ToolResult::error(format!("Serialization failed: {e}")),
            },
            Err(e) => e.into(),
        }
    }
}
