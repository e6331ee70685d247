use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. Handlers render every
/// failure through [`ErrorBody`], so clients always see `{"error": ...}`.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Payload placed under the `error` key
    ///
    /// Usually a message string, but provider failures pass the provider's
    /// own error body through untouched.
    fn client_payload(&self) -> Value {
        Value::String(self.to_string())
    }
}

/// Uniform error envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: Value,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: Value::String(message.into()),
        }
    }

    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: error.client_payload(),
        }
    }
}
