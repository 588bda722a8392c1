//! HTTP gateway exposing ElevenLabs conversational-AI agents as MCP tools.
//!
//! Accepts JSON-RPC 2.0 traffic on `POST /` (`initialize`, `tools/list`,
//! `tools/call` with the `start_conversation` and `list_agents` tools),
//! compatible with any MCP-aware AI agent, plus the legacy
//! `POST /start-conversation` route the first revisions shipped.

pub mod config;
pub mod credentials;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod state;
pub mod upstream;

pub mod schema;
