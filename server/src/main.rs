mod config;
mod routes;

use config::ServerConfig;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("{0}")]
    Config(String),
    #[error("server i/o: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let app = routes::app().map_err(ServerError::Config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!(port = config.port, "funb listening");
    axum::serve(listener, app).await?;
    Ok(())
}
