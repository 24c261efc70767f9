//! Binary entrypoint for the orders HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`orders_server::config`]. Log filtering follows `RUST_LOG`.

use orders_server::config::ServerConfig;
use orders_server::router::build_router;
use orders_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orders_server=debug,orders_storage=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(&config)?;
    let app = build_router(state);

    let addr = config.socket_addr();
    tracing::info!("orders server listening at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
