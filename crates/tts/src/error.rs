use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use voxgate_config::ProviderKey;
use voxgate_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, TtsError>;

/// Message returned when a speech request lacks its required fields
pub const MISSING_FIELDS_MESSAGE: &str = "provider and text are required";

/// Message returned when a clone request arrives without explicit consent
pub const CONSENT_REQUIRED_MESSAGE: &str = "Se requiere consentimiento (consent=yes) para clonar una voz";

/// Speech dispatcher and clone flow errors
#[derive(Debug, Error)]
pub enum TtsError {
    /// A required field is missing or invalid
    #[error("{0}")]
    Validation(String),

    /// The provider key is not part of the routing table
    #[error("provider not supported")]
    UnsupportedProvider(String),

    /// The provider exists but has no voice-creation endpoint
    #[error("cloning not supported or endpoint not configured for that provider")]
    CloningNotSupported(String),

    /// The provider answered with a non-2xx status or could not be reached
    #[error("{message}")]
    Provider {
        provider: ProviderKey,
        status: Option<u16>,
        /// Error body returned by the provider, if it sent one
        payload: Option<Value>,
        message: String,
    },

    /// Request-scoped file handling failed
    #[error("{0}")]
    Internal(String),
}

impl TtsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn transport(provider: ProviderKey, error: &reqwest::Error) -> Self {
        Self::Provider {
            provider,
            status: error.status().map(|status| status.as_u16()),
            payload: None,
            message: error.to_string(),
        }
    }
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UnsupportedProvider(_) | Self::CloningNotSupported(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Provider { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_payload(&self) -> Value {
        match self {
            Self::Provider {
                payload: Some(payload), ..
            } => payload.clone(),
            _ => Value::String(self.to_string()),
        }
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
