mod config;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env file: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env()?;
    let port = config.port;
    tracing::info!(agent = %config.replay.whiteboard_agent, cache_rooms = config.cache_rooms, "whiteboard replay configured");

    let app = routes::app(state::AppState::new(config));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| StartupError::Bind { port, source })?;

    tracing::info!(%port, "chatboard listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
