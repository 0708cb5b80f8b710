use anyhow::Context;
use steamcrate_client::MetadataClient;

use crate::{config::AppConfig, state::AppState};

mod api;
pub mod config;
mod errors;
mod responses;
mod service;
mod source;
mod state;
pub mod synth;

/// Build the router serving steamapps from the configured metadata API
pub fn create_app(config: AppConfig) -> anyhow::Result<axum::Router> {
    let client = MetadataClient::new(config.api_url.clone())
        .context("Failed to create metadata API client")?;
    tracing::debug!("Fetching steamapps from {}", config.api_url);

    let router = api::router()?.with_state(AppState::new(config, client));

    Ok(router)
}
