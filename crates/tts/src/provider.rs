pub mod anyvoice;
pub mod fishaudio;
pub mod playht;
pub mod resemble;
pub mod uberduck;

use async_trait::async_trait;
use reqwest::{
    Body, RequestBuilder,
    multipart::{Form, Part},
};
use serde_json::Value;
use tokio_util::io::ReaderStream;
use voxgate_config::ProviderKey;

use crate::{
    error::{Result, TtsError},
    types::SpeakParams,
    uploads::VoiceSample,
};

/// Trait for speech provider adapters
///
/// Adapters map a uniform request onto one provider's HTTP API and return
/// the provider's response body without interpreting it.
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize speech
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value>;

    /// Routing key for this adapter
    fn key(&self) -> ProviderKey;

    /// Whether [`TtsProvider::clone_voice`] is backed by an endpoint
    fn supports_cloning(&self) -> bool {
        false
    }

    /// Create a voice from uploaded samples
    async fn clone_voice(&self, _name: &str, _samples: &[VoiceSample]) -> Result<Value> {
        Err(TtsError::CloningNotSupported(self.key().to_string()))
    }
}

/// Send a prepared provider request and decode its body
///
/// A 2xx body is returned as JSON when it parses, otherwise as a string.
/// Non-2xx responses keep their body as the error payload.
pub(crate) async fn send(provider: ProviderKey, request: RequestBuilder) -> Result<Value> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(%provider, "provider request failed: {e}");
        TtsError::transport(provider, &e)
    })?;

    let status = response.status();
    let body = response.bytes().await.map_err(|e| {
        tracing::error!(%provider, "failed to read provider response body: {e}");
        TtsError::transport(provider, &e)
    })?;

    if !status.is_success() {
        let payload = (!body.is_empty()).then(|| decode_body(&body));

        tracing::error!(%provider, %status, payload = ?payload, "provider API error");

        return Err(TtsError::Provider {
            provider,
            status: Some(status.as_u16()),
            payload,
            message: format!("Request failed with status code {}", status.as_u16()),
        });
    }

    tracing::debug!(%provider, bytes = body.len(), "provider call complete");

    Ok(decode_body(&body))
}

fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Build the multipart payload for a voice-creation call
///
/// Carries the clone `name` plus one `files` part per sample, in upload
/// order, each under the client's original filename. Sample bodies are
/// streamed from disk while the request is sent.
pub(crate) async fn sample_form(name: &str, samples: &[VoiceSample]) -> Result<Form> {
    let mut form = Form::new().text("name", name.to_string());

    for sample in samples {
        let read_failed = |e: std::io::Error| {
            TtsError::Internal(format!("failed to read staged sample {}: {e}", sample.file_name))
        };

        let file = tokio::fs::File::open(&sample.path).await.map_err(read_failed)?;
        let length = file.metadata().await.map_err(read_failed)?.len();

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(sample.file_name.clone());

        let part = match sample.content_type.as_deref() {
            Some(content_type) if content_type.parse::<mime::Mime>().is_ok() => part
                .mime_str(content_type)
                .map_err(|e| TtsError::Internal(format!("invalid sample content type: {e}")))?,
            Some(content_type) => {
                tracing::debug!(%content_type, file = %sample.file_name, "dropping unparsable sample content type");
                part
            }
            None => part,
        };

        form = form.part("files", part);
    }

    Ok(form)
}
