use std::{path::Path, sync::Arc};

use axum::{
    Json,
    body::Body,
    extract::{FromRequest, Multipart, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use voxgate_core::ErrorBody;

use crate::{
    dispatcher::Dispatcher,
    error::TtsError,
    types::{CloneRequest, DEFAULT_CLONE_NAME},
    uploads::{MAX_SAMPLES, StagedSamples, VoiceSample},
};

/// Body limit for JSON speech requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Body limit for clone uploads (128 MiB across all samples)
pub(crate) const UPLOAD_LIMIT_BYTES: usize = 128 << 20;

/// Multipart field carrying voice samples
const SAMPLES_FIELD: &str = "samples";

fn reject(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::message(message))).into_response()
}

/// Extractor for JSON request bodies
///
/// A request without a body is read as `{}` so that missing fields surface
/// as validation errors rather than parse errors.
pub struct ExtractPayload<T>(pub T);

impl<S, T: DeserializeOwned> FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        if content_type.is_some_and(|value| !value.starts_with("application/json")) {
            return Err(reject(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                reject(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                reject(StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
            }
        })?;

        let bytes: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };

        serde_json::from_slice::<T>(bytes)
            .map(Self)
            .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")))
    }
}

/// Extractor that stages `samples` uploads on disk
///
/// Each sample is streamed into the dispatcher's uploads directory under a
/// random name. If extraction fails part-way, the files written so far are
/// removed when the partially-built [`StagedSamples`] is dropped.
pub struct ExtractCloneUpload(pub CloneRequest);

impl FromRequest<Arc<Dispatcher>> for ExtractCloneUpload {
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &Arc<Dispatcher>) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Failed to parse multipart form: {e}")))?;

        let mut samples = StagedSamples::new();
        let mut provider = None;
        let mut name = None;
        let mut consent = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err(reject(StatusCode::BAD_REQUEST, format!("Failed to read multipart form: {e}"))),
            };

            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                SAMPLES_FIELD => {
                    if samples.len() == MAX_SAMPLES {
                        return Err(TtsError::validation(format!("at most {MAX_SAMPLES} samples are accepted"))
                            .into_response());
                    }

                    stage_sample(field, state.uploads_dir(), &mut samples).await?;
                }
                "provider" => provider = Some(read_text(field).await?),
                "name" => name = Some(read_text(field).await?),
                "consent" => consent = Some(read_text(field).await?),
                _ => {
                    // Skip unknown fields
                }
            }
        }

        tracing::debug!(samples = samples.len(), "clone upload staged");

        Ok(Self(CloneRequest {
            provider,
            name: name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_CLONE_NAME.to_string()),
            consent,
            samples,
        }))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, Response> {
    let field_name = field.name().unwrap_or_default().to_string();

    field
        .text()
        .await
        .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Failed to read {field_name} field: {e}")))
}

async fn stage_sample(mut field: Field<'_>, dir: &Path, samples: &mut StagedSamples) -> Result<(), Response> {
    let internal = |e: std::io::Error| {
        tracing::error!(dir = %dir.display(), "failed to stage voice sample: {e}");
        TtsError::Internal("failed to store uploaded sample".to_string()).into_response()
    };

    tokio::fs::create_dir_all(dir).await.map_err(internal)?;

    let path = dir.join(uuid::Uuid::new_v4().simple().to_string());
    let mut file = tokio::fs::File::create(&path).await.map_err(internal)?;

    // Owned from here on so a failed write still gets cleaned up
    samples.push(VoiceSample {
        path,
        file_name: field.file_name().unwrap_or("sample").to_string(),
        content_type: field.content_type().map(str::to_string),
    });

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => file.write_all(&chunk).await.map_err(internal)?,
            Ok(None) => break,
            Err(e) => return Err(reject(StatusCode::BAD_REQUEST, format!("Failed to read sample data: {e}"))),
        }
    }

    file.flush().await.map_err(internal)?;

    Ok(())
}
