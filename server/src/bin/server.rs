//! Headless quote card server.
//!
//! Starts the axum web server and stops on Ctrl+C.

use tracing_subscriber::EnvFilter;

use quote_server_lib::app::SharedState;
use quote_server_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting quote card server");

    let config = quote_server_lib::init_config();
    let state = SharedState::new(config);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    server_handle.await?;
    Ok(())
}
