use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use biascheck_client::{HttpTransport, SelectorExtractor};
use biascheck_core::{PageAnalyzer, ProviderConfig};
use biascheck_server::routes;
use biascheck_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("biascheck=info".parse()?))
        .with_target(false)
        .init();

    let port = std::env::var("BIASCHECK_SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");

    let config = match std::env::var("BIASCHECK_SETTINGS") {
        Ok(path) => ProviderConfig::from_json_file(Path::new(&path))?,
        Err(_) => ProviderConfig::from_env(),
    };
    tracing::info!(
        provider = %config.provider,
        has_api_key = config.has_api_key(),
        "Settings loaded"
    );

    let extractor = SelectorExtractor::new()?;
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    let mut state = AppState::new(PageAnalyzer::new(extractor, transport), config);
    if let Ok(token) = std::env::var("BIASCHECK_SERVER_TOKEN") {
        state = state.with_api_token(token);
    }

    let app = routes::router(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
