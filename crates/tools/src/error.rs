use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use voxgate_core::{ErrorBody, HttpError};

use crate::archive::ArchiveError;

pub type Result<T> = std::result::Result<T, ToolError>;

/// Message returned when the headless browser cannot render a page
pub const CAPTURE_FAILED_MESSAGE: &str = "could not capture the page";

/// Errors raised by the standalone tool endpoints
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required query parameter is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The headless browser failed, crashed or timed out
    #[error("could not capture the page")]
    Capture(String),

    /// Downloading the source page failed
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Writing or reading a local artifact failed
    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl HttpError for ToolError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Capture(_) | Self::Fetch { .. } | Self::Archive(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn capture_failure_hides_browser_output() {
        let error = ToolError::Capture("chromium exited with signal 9".into());

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.client_payload(), json!(CAPTURE_FAILED_MESSAGE));
    }

    #[test]
    fn missing_archive_source_is_a_server_error() {
        let error = ToolError::from(ArchiveError::MissingSource("index.html".into()));

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "archive source not found: index.html");
    }
}
