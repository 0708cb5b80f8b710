//! Renders Dockerfiles and scripts for steamapps fetched from a [`SteamappSource`]

use schemars::JsonSchema;
use serde::Serialize;
use steamcrate_models::{Steamapp, validate_branch_name};
use url::Url;
use validator::Validate;

use crate::{
    config::AppConfig,
    errors::AppError,
    source::SteamappSource,
    synth::{self, BuildSource, SynthOptions},
};

/// Everything needed to build and run a steamapp's image
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SteamappArtifacts {
    /// Reference the image is tagged with
    pub image_ref: String,
    /// The rendered Dockerfile
    pub dockerfile: String,
    /// Command that runs the published image
    pub run_command: String,
    /// One-liner that downloads and runs the build script
    pub install_command: String,
}

pub struct SteamappService {
    source: Box<dyn SteamappSource>,
    opts: SynthOptions,
    registry: String,
    public_url: Url,
}

impl SteamappService {
    pub fn new(config: &AppConfig, source: Box<dyn SteamappSource>) -> Self {
        Self {
            source,
            opts: config.synth_options(),
            registry: config.registry.clone(),
            public_url: config.public_url.clone(),
        }
    }

    /// Render the Dockerfile, with a trailing newline so it can be served as a file.
    pub async fn dockerfile(&self, app_id: u32, branch: Option<&str>) -> Result<String, AppError> {
        let steamapp = self.get_steamapp(app_id, branch).await?;
        let mut dockerfile = synth::synthesize(&steamapp, &self.opts)?.to_string();
        dockerfile.push('\n');

        tracing::info!("Rendered Dockerfile for steamapp {app_id}");
        Ok(dockerfile)
    }

    /// Render the `run.sh` script that builds the image locally and runs it. The
    /// Dockerfile is either inlined or fetched back from this server.
    pub async fn run_script(
        &self,
        app_id: u32,
        branch: Option<&str>,
        inline: bool,
    ) -> Result<String, AppError> {
        let steamapp = self.get_steamapp(app_id, branch).await?;
        let image_ref = self.image_ref(&steamapp);

        let script = if inline {
            let dockerfile = synth::synthesize(&steamapp, &self.opts)?;
            synth::run_script(&steamapp, &image_ref, BuildSource::Inline(&dockerfile))
        } else {
            // Fail before handing out a script that points at a Dockerfile we can't render
            synth::synthesize(&steamapp, &self.opts)?;
            let url = self.artifact_url(&steamapp, "dockerfile")?;
            synth::run_script(&steamapp, &image_ref, BuildSource::Remote(&url))
        };

        tracing::info!("Rendered run.sh for steamapp {app_id} (inline: {inline})");
        Ok(script)
    }

    pub async fn artifacts(
        &self,
        app_id: u32,
        branch: Option<&str>,
    ) -> Result<SteamappArtifacts, AppError> {
        let steamapp = self.get_steamapp(app_id, branch).await?;
        let image_ref = self.image_ref(&steamapp);

        Ok(SteamappArtifacts {
            dockerfile: synth::synthesize(&steamapp, &self.opts)?.to_string(),
            run_command: synth::run_command(&steamapp, &image_ref),
            install_command: synth::install_command(&self.artifact_url(&steamapp, "run.sh")?),
            image_ref,
        })
    }

    /// Fetch and validate the steamapp. The branch is checked before it is used
    /// in any request, tag or script.
    async fn get_steamapp(&self, app_id: u32, branch: Option<&str>) -> Result<Steamapp, AppError> {
        if let Some(branch) = branch {
            validate_branch_name(branch).map_err(|err| AppError::BadRequest(err.to_string()))?;
        }

        let steamapp = self.source.get_steamapp(app_id, branch).await?;
        steamapp.validate()?;

        Ok(steamapp)
    }

    fn image_ref(&self, steamapp: &Steamapp) -> String {
        synth::image_ref(
            &self.registry,
            steamapp.app_id,
            steamapp.branch.as_deref(),
            &self.opts,
        )
    }

    fn artifact_url(&self, steamapp: &Steamapp, file: &str) -> Result<Url, AppError> {
        Ok(synth::artifact_url(
            &self.public_url,
            steamapp.app_id,
            steamapp.branch.as_deref(),
            file,
            &self.opts,
        )?)
    }
}
