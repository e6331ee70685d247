#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod clone;
mod dispatcher;
mod error;
mod http_client;
mod provider;
mod request;
mod types;
mod uploads;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Query, State},
    routing::{get, post},
};

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{CONSENT_REQUIRED_MESSAGE, MISSING_FIELDS_MESSAGE, Result, TtsError};
pub use provider::TtsProvider;
pub use types::{
    AudioResponse, CloneEnvelope, CloneRequest, SpeakParams, SpeechEnvelope, SpeechQuery, SpeechRequest,
    SpeechRequestBody,
};
pub use uploads::{MAX_SAMPLES, StagedSamples, VoiceSample};
use request::{ExtractCloneUpload, ExtractPayload, UPLOAD_LIMIT_BYTES};

/// Build the speech dispatcher from configuration
///
/// Creates the uploads directory so that clone requests can stage samples.
pub fn build_dispatcher(config: &voxgate_config::Config) -> anyhow::Result<Arc<Dispatcher>> {
    std::fs::create_dir_all(&config.storage.uploads_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create uploads directory {}: {e}",
            config.storage.uploads_dir.display()
        )
    })?;

    Ok(Arc::new(DispatcherBuilder::new(config).build()))
}

/// Create the endpoint router for speech and cloning
pub fn endpoint_router() -> Router<Arc<Dispatcher>> {
    Router::new()
        .route("/tools/text-to-speech", post(text_to_speech))
        .route(
            "/clone-voice",
            post(clone_voice).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/tts", get(query_speech))
}

fn task_failed(task: &str, e: &tokio::task::JoinError) -> TtsError {
    tracing::error!("{task} task failed: {e}");
    TtsError::Internal(format!("{task} task failed"))
}

/// Handle speech synthesis requests
///
/// Provider calls in this module run on their own task, so a client
/// hanging up never aborts an outbound request halfway.
async fn text_to_speech(
    State(dispatcher): State<Arc<Dispatcher>>,
    ExtractPayload(body): ExtractPayload<SpeechRequestBody>,
) -> Result<Json<SpeechEnvelope>> {
    let request = body.into_request()?;

    tracing::debug!("speech handler called for provider: {}", request.provider);

    let envelope = tokio::spawn(async move { dispatcher.dispatch(request).await })
        .await
        .map_err(|e| task_failed("speech", &e))??;

    Ok(Json(envelope))
}

/// Handle voice clone uploads
///
/// Staged samples are removed once the detached provider call settles.
async fn clone_voice(
    State(dispatcher): State<Arc<Dispatcher>>,
    ExtractCloneUpload(request): ExtractCloneUpload,
) -> Result<Json<CloneEnvelope>> {
    let envelope = tokio::spawn(async move { dispatcher.clone_voice(request).await })
        .await
        .map_err(|e| task_failed("voice clone", &e))??;

    Ok(Json(envelope))
}

/// Handle query-string speech requests against the default provider
async fn query_speech(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<SpeechQuery>,
) -> Result<Json<AudioResponse>> {
    let Some(text) = types::non_empty(query.text) else {
        return Err(TtsError::validation("text is required"));
    };

    let request = SpeechRequest {
        provider: dispatcher.default_provider(),
        text,
        voice: types::non_empty(query.voice),
    };

    let envelope = tokio::spawn(async move { dispatcher.dispatch(request).await })
        .await
        .map_err(|e| task_failed("speech", &e))??;

    Ok(Json(AudioResponse { audio: envelope.raw }))
}
