use std::time::Duration;

use serde::Deserialize;
use steamcrate_models::Steamapp;
use url::Url;

/// # Metadata client
/// A Rust client for the steamapp metadata API, which stores the specification
/// of every Steam app that can be built.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API error: {status} {message:?}")]
    Api {
        status: u16,
        message: Option<String>,
    },
}

impl ClientError {
    /// HTTP status returned by the API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Reqwest(err) => err.status().map(|status| status.as_u16()),
            ClientError::Url(_) => None,
        }
    }
}

/// Errors from the API look like `{"error":"error description"}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl MetadataClient {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::limited(2))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("steamcrate-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MetadataClient { client, base_url })
    }

    /// Fetch the specification of a Steam app. When a branch is requested and
    /// the API does not echo it back, the returned steamapp carries the requested
    /// branch.
    pub async fn get_steamapp(
        &self,
        app_id: u32,
        branch: Option<&str>,
    ) -> Result<Steamapp, ClientError> {
        let url = steamapp_url(&self.base_url, app_id, branch)?;
        tracing::debug!("Fetching steamapp from {url}");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = match response.text().await {
                Ok(text) => error_message(&text),
                Err(_) => None,
            };
            return Err(ClientError::Api { status, message });
        }

        let mut steamapp = response.json::<Steamapp>().await?;
        if let Some(branch) = branch {
            steamapp.branch.get_or_insert_with(|| branch.to_owned());
        }

        Ok(steamapp)
    }
}

fn steamapp_url(base_url: &Url, app_id: u32, branch: Option<&str>) -> Result<Url, url::ParseError> {
    match branch {
        Some(branch) => base_url.join(&format!("/api/v1/steamapps/{app_id}/{branch}")),
        None => base_url.join(&format!("/api/v1/steamapps/{app_id}")),
    }
}

fn error_message(response_text: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(response_text) {
        Ok(body) => body.error,
        Err(_) if !response_text.trim().is_empty() => Some(response_text.trim().to_owned()),
        Err(_) => None,
    }
}
