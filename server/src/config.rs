use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;
use serde::Deserialize;
use steamcrate_models::DEFAULT_BRANCH;
use url::Url;

use crate::synth::SynthOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the steamapp metadata API.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// URL this server is reachable at. Used in generated scripts that fetch
    /// files back from the server.
    #[serde(default = "default_public_url")]
    pub public_url: Url,
    /// Registry host that images are tagged for.
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Branch that is installed without beta flags and not used as an image tag.
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default = "default_wine_distro")]
    pub wine_distro: String,
    #[serde(default = "default_wine_codename")]
    pub wine_codename: String,

    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}
fn default_api_url() -> Url {
    Url::parse("http://localhost:5050").expect("valid default URL")
}
fn default_public_url() -> Url {
    Url::parse("http://localhost:8080").expect("valid default URL")
}
fn default_registry() -> String {
    "localhost:5000".to_string()
}
fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}
fn default_wine_distro() -> String {
    "debian".to_string()
}
fn default_wine_codename() -> String {
    "trixie".to_string()
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions {
            default_branch: self.default_branch.clone(),
            wine_distro: self.wine_distro.clone(),
            wine_codename: self.wine_codename.clone(),
        }
    }
}

/// Extract the configuration from env variables prefixed with `STEAMCRATE_`.
pub fn extract_config() -> anyhow::Result<AppConfig> {
    extract_config_from(
        figment::Figment::new().merge(figment::providers::Env::prefixed("STEAMCRATE_")),
    )
}

pub(crate) fn extract_config_from(figment: figment::Figment) -> anyhow::Result<AppConfig> {
    let config = figment
        .extract::<AppConfig>()
        .context("Failed to extract valid configuration")?;

    Ok(config)
}
