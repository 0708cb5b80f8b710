use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use steamcrate_client::ClientError;

use crate::synth::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Invalid steamapp: {0}")]
    InvalidSteamapp(#[from] validator::ValidationErrors),
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("Metadata API error: {0}")]
    Metadata(ClientError),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err.status() {
            Some(404) => AppError::NotFound,
            _ => AppError::Metadata(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::InvalidSteamapp(err) => {
                tracing::warn!("Invalid steamapp: {err}");
                let msg = format!("Invalid steamapp: {err}");
                (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response()
            }
            AppError::Synthesis(err) => {
                tracing::warn!("Synthesis error: {err}");
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
            }
            AppError::Metadata(err) => {
                tracing::error!("Metadata API error: {err}");
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
            AppError::Url(err) => {
                tracing::error!("URL error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                SynthesisError::MissingBetaPassword {
                    branch: "beta".into(),
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ClientError::Api {
                    status: 404,
                    message: None,
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ClientError::Api {
                    status: 500,
                    message: Some("boom".into()),
                }
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
