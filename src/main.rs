use std::sync::Arc;
use std::time::Duration;

use forsa_gateway::forward::Forwarder;
use forsa_gateway::session::HeaderSessionProvider;
use forsa_gateway::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up UPSTREAM_BASE_URL, GATEWAY_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Forsa Gateway in {:?} mode", config.environment);

    let forwarder = Forwarder::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_secs),
    )
    .unwrap_or_else(|e| panic!("invalid upstream base url {}: {}", config.upstream.base_url, e));

    let state = AppState::new(forwarder, Arc::new(HeaderSessionProvider));
    let app = app(state);

    // Port overrides (GATEWAY_PORT / PORT) are applied by the config loader
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!(
        "🚀 Forsa Gateway listening on http://{} (upstream {})",
        bind_addr, config.upstream.base_url
    );

    axum::serve(listener, app).await.expect("server");
}
