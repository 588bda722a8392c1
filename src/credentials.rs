use thiserror::Error;

use crate::protocol::ToolResult;

/// No API key could be resolved for an upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No ElevenLabs API key configured (set ELEVENLABS_API_KEY)")]
pub struct MissingCredential;

/// Resolves the upstream API key for one call.
///
/// Two sourcing policies coexist: the legacy endpoint may carry a per-call
/// key in its request body, while the MCP tool path uses the process-wide
/// key read once at start-up. Callers on the tool path pass `None`.
#[derive(Debug, Clone)]
pub struct CredentialProvider {
    configured: Option<String>,
}

impl CredentialProvider {
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }

    /// A non-empty caller-supplied key wins over the configured one.
    pub fn get(&self, call_supplied: Option<&str>) -> Result<String, MissingCredential> {
        if let Some(key) = call_supplied {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
        self.configured.clone().ok_or(MissingCredential)
    }
}

/// A missing credential is a tool-level failure, never a protocol error.
impl From<MissingCredential> for ToolResult {
    fn from(err: MissingCredential) -> Self {
        ToolResult::error(err.to_string())
    }
}
