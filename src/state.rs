use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::credentials::CredentialProvider;
use crate::handlers::{ListAgentsTool, StartConversationTool};
use crate::registry::ToolRegistry;
use crate::upstream::ConvaiClient;

/// Shared server state: the tool table plus the two leaf collaborators the
/// tools are bound to. Immutable after construction.
pub struct GatewayState {
    pub registry: ToolRegistry,
    pub upstream: Arc<ConvaiClient>,
    pub credentials: Arc<CredentialProvider>,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let upstream = Arc::new(ConvaiClient::new(
            config.upstream_base_url.clone(),
            config.upstream_timeout,
        )?);
        let credentials = Arc::new(CredentialProvider::new(config.api_key.clone()));

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(StartConversationTool::new(
            upstream.clone(),
            credentials.clone(),
        )));
        registry.register(Box::new(ListAgentsTool::new(
            upstream.clone(),
            credentials.clone(),
        )));

        Ok(Self {
            registry,
            upstream,
            credentials,
        })
    }
}
