use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{ApiTag, AppPath, BranchPath},
    errors::AppError,
    service::SteamappArtifacts,
    state::AppState,
};

pub fn route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(handler, |op| {
        op.id("get_steamapp_artifacts")
            .tag(ApiTag::Steamapps.into())
            .summary("Preview steamapp")
            .description("Image reference, Dockerfile and commands for the default branch")
    })
}

pub fn branch_route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(branch_handler, |op| {
        op.id("get_branch_steamapp_artifacts")
            .tag(ApiTag::Steamapps.into())
            .summary("Preview steamapp branch")
            .description("Image reference, Dockerfile and commands for the given branch")
    })
}

async fn handler(
    State(state): State<AppState>,
    Path(AppPath { app_id }): Path<AppPath>,
) -> Result<Json<SteamappArtifacts>, AppError> {
    Ok(Json(state.service.artifacts(app_id, None).await?))
}

async fn branch_handler(
    State(state): State<AppState>,
    Path(BranchPath { app_id, branch }): Path<BranchPath>,
) -> Result<Json<SteamappArtifacts>, AppError> {
    Ok(Json(state.service.artifacts(app_id, Some(&branch)).await?))
}
