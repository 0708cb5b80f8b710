use axum::extract::{Path, State};

use crate::{
    api::{ApiTag, AppPath, BranchPath},
    errors::AppError,
    responses::Attachment,
    state::AppState,
};

pub fn route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(handler, |op| {
        op.id("get_dockerfile")
            .tag(ApiTag::Files.into())
            .summary("Download Dockerfile")
            .description("Render the Dockerfile that builds the steamapp's default branch")
    })
}

pub fn branch_route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(branch_handler, |op| {
        op.id("get_branch_dockerfile")
            .tag(ApiTag::Files.into())
            .summary("Download Dockerfile for a branch")
            .description("Render the Dockerfile that builds the given branch of the steamapp")
    })
}

async fn handler(
    State(state): State<AppState>,
    Path(AppPath { app_id }): Path<AppPath>,
) -> Result<Attachment, AppError> {
    let dockerfile = state.service.dockerfile(app_id, None).await?;

    Ok(Attachment::new("Dockerfile", dockerfile))
}

async fn branch_handler(
    State(state): State<AppState>,
    Path(BranchPath { app_id, branch }): Path<BranchPath>,
) -> Result<Attachment, AppError> {
    let dockerfile = state.service.dockerfile(app_id, Some(&branch)).await?;

    Ok(Attachment::new("Dockerfile", dockerfile))
}
