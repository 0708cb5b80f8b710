//! Where steamapp specifications come from

use async_trait::async_trait;
use steamcrate_client::MetadataClient;
use steamcrate_models::Steamapp;

use crate::errors::AppError;

/// Source of steamapp specifications
#[async_trait]
pub trait SteamappSource: Send + Sync {
    /// Fetch the specification for an app, optionally for a specific branch.
    async fn get_steamapp(&self, app_id: u32, branch: Option<&str>) -> Result<Steamapp, AppError>;
}

#[async_trait]
impl SteamappSource for MetadataClient {
    async fn get_steamapp(&self, app_id: u32, branch: Option<&str>) -> Result<Steamapp, AppError> {
        Ok(MetadataClient::get_steamapp(self, app_id, branch).await?)
    }
}
