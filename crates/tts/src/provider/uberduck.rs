use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use voxgate_config::{ProviderConfig, ProviderKey};

use crate::{
    auth::{ProviderAuth, credential},
    error::Result,
    http_client::http_client,
    types::SpeakParams,
    uploads::VoiceSample,
};

use super::{TtsProvider, sample_form, send};

const DEFAULT_SPEAK_URL: &str = "https://api.uberduck.ai/speak";
const DEFAULT_VOICE_CREATE_URL: &str = "https://api.uberduck.ai/voices/create";

/// Uberduck adapter, Basic auth over key and secret
pub(crate) struct UberduckProvider {
    client: Client,
    speak_url: String,
    voice_create_url: String,
    auth: ProviderAuth,
}

impl UberduckProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: http_client(),
            speak_url: config.url.clone().unwrap_or_else(|| DEFAULT_SPEAK_URL.to_string()),
            voice_create_url: config
                .clone_url
                .clone()
                .unwrap_or_else(|| DEFAULT_VOICE_CREATE_URL.to_string()),
            auth: ProviderAuth::Basic {
                key: credential(config.api_key.as_ref()),
                secret: credential(config.api_secret.as_ref()),
            },
        }
    }
}

#[derive(Serialize)]
struct UberduckSpeakRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
    speech: &'a str,
}

#[async_trait]
impl TtsProvider for UberduckProvider {
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value> {
        tracing::debug!(voice = ?params.voice, text_len = params.text.len(), "Uberduck speak request");

        let body = UberduckSpeakRequest {
            voice: params.voice,
            speech: params.text,
        };

        let request = self
            .client
            .post(&self.speak_url)
            .header(AUTHORIZATION, self.auth.header_value())
            .json(&body);

        send(ProviderKey::Uberduck, request).await
    }

    fn key(&self) -> ProviderKey {
        ProviderKey::Uberduck
    }

    fn supports_cloning(&self) -> bool {
        true
    }

    async fn clone_voice(&self, name: &str, samples: &[VoiceSample]) -> Result<Value> {
        tracing::debug!(%name, samples = samples.len(), "Uberduck voice create request");

        let form = sample_form(name, samples).await?;

        let request = self
            .client
            .post(&self.voice_create_url)
            .header(AUTHORIZATION, self.auth.header_value())
            .multipart(form);

        send(ProviderKey::Uberduck, request).await
    }
}
