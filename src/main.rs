use tracing_subscriber::EnvFilter;

use convai_gateway::config::GatewayConfig;
use convai_gateway::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("convai-gateway: configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::serve(config).await {
        eprintln!("convai-gateway: fatal error: {e}");
        std::process::exit(1);
    }
}
