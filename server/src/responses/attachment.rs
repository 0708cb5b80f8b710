use aide::OperationOutput;
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

/// Plain text file served as a download
pub struct Attachment {
    filename: &'static str,
    body: String,
}

impl Attachment {
    pub fn new(filename: &'static str, body: String) -> Self {
        Self { filename, body }
    }
}

impl IntoResponse for Attachment {
    fn into_response(self) -> Response {
        (
            [
                (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename={}", self.filename),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

impl OperationOutput for Attachment {
    type Inner = String;
}
