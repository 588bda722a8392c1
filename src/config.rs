use std::time::Duration;

/// Default REST base for the ElevenLabs API.
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default bind address for the HTTP listener.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default timeout for upstream calls (30 seconds).
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub listen_addr: String,
}

impl GatewayConfig {
    /// Load configuration from environment.
    ///
    /// - `ELEVENLABS_API_KEY` (optional) — process-wide upstream credential;
    ///   affected calls fail per-request when unset
    /// - `ELEVENLABS_BASE_URL` (optional, default `https://api.elevenlabs.io/v1`)
    ///   — upstream REST base, trailing slashes trimmed
    /// - `CONVAI_GATEWAY_LISTEN` (optional, default `0.0.0.0:8080`) — bind address
    /// - `CONVAI_GATEWAY_UPSTREAM_TIMEOUT_SECS` (optional, default 30) — max
    ///   seconds per upstream call
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("ELEVENLABS_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let upstream_base_url = match std::env::var("ELEVENLABS_BASE_URL") {
            Ok(val) if !val.is_empty() => val.trim_end_matches('/').to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };

        let listen_addr = std::env::var("CONVAI_GATEWAY_LISTEN")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

        let timeout_secs = match std::env::var("CONVAI_GATEWAY_UPSTREAM_TIMEOUT_SECS") {
            Ok(val) => val.parse::<u64>().map_err(|_| {
                "CONVAI_GATEWAY_UPSTREAM_TIMEOUT_SECS must be a positive integer".to_string()
            })?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            upstream_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            listen_addr,
        })
    }
}
