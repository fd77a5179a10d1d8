use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, Level};

use finance_tracker_backend::config::AppConfig;
use finance_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config_path = std::env::var("FINANCE_TRACKER_CONFIG")
        .unwrap_or_else(|_| "config.toml".to_string());
    let config = AppConfig::load_or_default(&PathBuf::from(config_path));

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
