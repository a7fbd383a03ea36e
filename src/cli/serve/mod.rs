//! Serve command - runs the chat HTTP service

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Run the HTTP service
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    // PaaS platforms inject the listen port via PORT
    let port = match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>()?,
        Err(_) => config.server.port,
    };

    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        port,
    )))
}
