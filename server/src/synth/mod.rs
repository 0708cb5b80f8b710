//! Dockerfile and run script synthesis
//!
//! Everything in this module is a pure function of its inputs: the same
//! [`Steamapp`](steamcrate_models::Steamapp) and options always render to the
//! same text.

use steamcrate_models::DEFAULT_BRANCH;

mod constants;
mod directive;
mod dockerfile;
mod image_ref;
mod run_script;

pub use directive::{Directive, Dockerfile, Instruction};
pub use dockerfile::{normalize_base_image, synthesize};
pub use image_ref::image_ref;
pub use run_script::{BuildSource, artifact_url, install_command, run_command, run_script};

/// Options threaded through synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthOptions {
    /// Branch that needs no `-beta` flags and gets no image tag
    pub default_branch: String,
    /// Distribution ID of the WineHQ apt repository (`debian` or `ubuntu`)
    pub wine_distro: String,
    /// Release codename of the WineHQ apt repository
    pub wine_codename: String,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_owned(),
            wine_distro: "debian".to_owned(),
            wine_codename: "trixie".to_owned(),
        }
    }
}

impl SynthOptions {
    /// The non-default branch the steamapp requests, if any. An empty branch
    /// counts as unset.
    pub(crate) fn beta_branch<'a>(&self, branch: Option<&'a str>) -> Option<&'a str> {
        branch.filter(|branch| !branch.is_empty() && *branch != self.default_branch)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("beta branch '{branch}' requires a beta_password, but none was provided")]
    MissingBetaPassword { branch: String },
}
