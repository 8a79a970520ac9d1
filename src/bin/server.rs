//! Allotment Report HTTP Server Binary
//!
//! Entry point for the local report backend. Initializes the Cloudbeds
//! client and config store, sets up the HTTP router, and starts serving the
//! web UI's REST calls.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1, the app is local-only)
//! - `PORT`: Server port (default: 5000)
//! - `ALLOTMENT_REPORT_CONFIG`: Override for the credentials file path
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use allotment_report::cloudbeds::CloudbedsClient;
use allotment_report::config::ConfigStore;
use allotment_report::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Allotment Report server");

    let config_store = ConfigStore::from_env();
    if !config_store.load().has_api_key() {
        warn!(
            path = %config_store.path().display(),
            "no API key configured yet, set one via POST /api/settings"
        );
    }

    let client = Arc::new(CloudbedsClient::new()?);
    let state = AppState::new(client, config_store);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
