use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::protocol::ToolResult;

/// Fixed host for the realtime endpoint. Clients connect to the templated
/// URL directly; it is derived here, not returned by the upstream, and does
/// not follow the configurable REST base URL.
const WEBSOCKET_BASE: &str = "wss://api.elevenlabs.io/v1/conversational-ai/conversations";

/// Derive the realtime URL for an upstream-assigned conversation id.
pub fn websocket_url(conversation_id: &str) -> String {
    format!("{WEBSOCKET_BASE}/{conversation_id}")
}

/// Handle returned to the caller after a conversation is created.
///
/// The caller owns it from here on; nothing is persisted gateway-side.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationHandle {
    pub conversation_id: String,
    pub websocket_url: String,
    pub agent_id: String,
}

/// Failure of one call to the ElevenLabs API. Never retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("ElevenLabs API error: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Request to ElevenLabs timed out after {0:?}")]
    Timeout(Duration),
    #[error("Request error: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Body of a successful conversation-create call. Only the id is consumed.
#[derive(Debug, Deserialize)]
struct CreateConversationBody {
    conversation_id: String,
}

/// HTTP client for the conversational-AI REST API.
///
/// One reqwest client built at start-up with the configured base URL and a
/// bounded per-request timeout, the only suspension point in the system.
#[derive(Debug, Clone)]
pub struct ConvaiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ConvaiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, timeout })
    }

    /// Create a conversation for `agent_id` and derive its realtime URL.
    pub async fn start_conversation(
        &self,
        agent_id: &str,
        api_key: &str,
    ) -> Result<ConversationHandle, UpstreamError> {
        let url = format!(
            "{}/conversational-ai/agents/{}/conversations",
            self.base_url, agent_id
        );
        tracing::debug!(agent_id, "creating upstream conversation");

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| self.classify(e))?;
            tracing::warn!(status = status.as_u16(), "conversation create rejected upstream");
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let body: CreateConversationBody =
            response.json().await.map_err(|e| self.classify(e))?;
        Ok(ConversationHandle {
            websocket_url: websocket_url(&body.conversation_id),
            conversation_id: body.conversation_id,
            agent_id: agent_id.to_string(),
        })
    }

    /// Fetch the agent list; the payload is passed through unreshaped.
    pub async fn list_agents(&self, api_key: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/conversational-ai/agents", self.base_url);
        tracing::debug!("fetching upstream agent list");

        let response = self
            .http
            .get(&url)
            .header("xi-api-key", api_key)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| self.classify(e))?;
            tracing::warn!(status = status.as_u16(), "agent list rejected upstream");
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        response.json().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            tracing::warn!(timeout = ?self.timeout, "upstream request timed out");
            UpstreamError::Timeout(self.timeout)
        } else {
            tracing::warn!(error = %err, "upstream transport fault");
            UpstreamError::Transport(err)
        }
    }
}

/// Upstream failures surface as tool-level errors on the MCP path, with the
/// provider's status and body embedded in the text.
impl From<UpstreamError> for ToolResult {
    fn from(err: UpstreamError) -> Self {
        ToolResult::error(err.to_string())
    }
}
