// File: services/calpeek_backend/src/main.rs
use calpeek_backend::build_app;
use calpeek_common::{logging, CalpeekError, Context};
use calpeek_config::load_config;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CalpeekError> {
    let config = load_config().context("Failed to load config")?;
    // Dropping the guard flushes the log file.
    let _log_guard = logging::init_from_config(&config.logging)?;

    let app = build_app(&config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;
    Ok(())
}
