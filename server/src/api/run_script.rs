use axum::extract::{Path, Query, State};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    api::{ApiTag, AppPath, BranchPath},
    errors::AppError,
    responses::Attachment,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, JsonSchema)]
struct RunScriptQuery {
    /// Inline the Dockerfile into the script instead of fetching it from this
    /// server. Use this when the script runs on the same machine as the server.
    #[serde(default)]
    inline: bool,
}

pub fn route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(handler, |op| {
        op.id("get_run_script")
            .tag(ApiTag::Files.into())
            .summary("Download run.sh")
            .description("Render a script that builds and runs the steamapp's default branch")
    })
}

pub fn branch_route() -> aide::axum::routing::ApiMethodRouter<AppState> {
    aide::axum::routing::get_with(branch_handler, |op| {
        op.id("get_branch_run_script")
            .tag(ApiTag::Files.into())
            .summary("Download run.sh for a branch")
            .description("Render a script that builds and runs the given branch of the steamapp")
    })
}

async fn handler(
    State(state): State<AppState>,
    Path(AppPath { app_id }): Path<AppPath>,
    Query(query): Query<RunScriptQuery>,
) -> Result<Attachment, AppError> {
    let script = state.service.run_script(app_id, None, query.inline).await?;

    Ok(Attachment::new("run.sh", script))
}

async fn branch_handler(
    State(state): State<AppState>,
    Path(BranchPath { app_id, branch }): Path<BranchPath>,
    Query(query): Query<RunScriptQuery>,
) -> Result<Attachment, AppError> {
    let script = state
        .service
        .run_script(app_id, Some(&branch), query.inline)
        .await?;

    Ok(Attachment::new("run.sh", script))
}
