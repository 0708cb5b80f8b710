use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = steamcrate_server::config::extract_config()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let (host, port) = (config.host, config.port);
    let router = steamcrate_server::create_app(config)?;

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .context("Failed to bind listener")?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}
