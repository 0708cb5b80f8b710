use anyhow::Context;
use schemars::JsonSchema;
use serde::Deserialize;
use strum::{Display, EnumIter, EnumMessage, IntoEnumIterator, IntoStaticStr};

use crate::state::AppState;

pub mod dockerfile;
pub mod run_script;
pub mod steamapps;

/// Tags in the OpenAPI specification
#[derive(Debug, IntoStaticStr, Display, EnumMessage, EnumIter)]
enum ApiTag {
    #[strum(message = "Download Dockerfiles and build scripts")]
    Files,
    #[strum(message = "Preview the build artifacts of steamapps")]
    Steamapps,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AppPath {
    /// The Steam app ID
    app_id: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BranchPath {
    /// The Steam app ID
    app_id: u32,
    /// The branch to install
    branch: String,
}

/// Builds the router with all file and API routes, plus the OpenAPI docs
pub fn router() -> anyhow::Result<axum::Router<AppState>> {
    let mut openapi = aide::openapi::OpenApi {
        info: aide::openapi::Info {
            title: "steamcrate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some("Dockerfiles and run scripts for Steam apps".to_string()),
            ..Default::default()
        },
        tags: ApiTag::iter()
            .map(|tag| aide::openapi::Tag {
                name: tag.to_string(),
                description: tag.get_message().map(str::to_owned),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };

    let router = aide::axum::ApiRouter::new()
        .api_route("/{app_id}/dockerfile", dockerfile::route())
        .api_route("/{app_id}/{branch}/dockerfile", dockerfile::branch_route())
        .api_route("/{app_id}/run.sh", run_script::route())
        .api_route("/{app_id}/{branch}/run.sh", run_script::branch_route())
        .api_route("/api/steamapps/{app_id}", steamapps::route())
        .api_route("/api/steamapps/{app_id}/{branch}", steamapps::branch_route())
        .finish_api(&mut openapi);

    // OpenAPI documentation routes
    let openapi_json =
        serde_json::to_string_pretty(&openapi).context("could not serialize OpenAPI document")?;
    let openapi_route = axum::routing::get(|| async move { openapi_json });
    let swagger_route = aide::swagger::Swagger::new("/api/openapi.json").axum_route();
    let router = router
        .route("/api/openapi.json", openapi_route)
        .route("/api/docs", swagger_route.into());

    Ok(router)
}
