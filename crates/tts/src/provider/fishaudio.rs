use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use voxgate_config::{ProviderConfig, ProviderKey};

use crate::{
    auth::{ProviderAuth, credential},
    error::Result,
    http_client::http_client,
    types::SpeakParams,
};

use super::{TtsProvider, anyvoice::VoiceIdRequest, send};

const DEFAULT_TTS_URL: &str = "https://api.fish.audio/v1/tts";

/// Fish Audio adapter
pub(crate) struct FishaudioProvider {
    client: Client,
    url: String,
    auth: ProviderAuth,
}

impl FishaudioProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: http_client(),
            url: config.url.clone().unwrap_or_else(|| DEFAULT_TTS_URL.to_string()),
            auth: ProviderAuth::Bearer(credential(config.api_key.as_ref())),
        }
    }
}

#[async_trait]
impl TtsProvider for FishaudioProvider {
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value> {
        tracing::debug!(voice = ?params.voice, text_len = params.text.len(), "Fish Audio TTS request");

        let request = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.auth.header_value())
            .json(&VoiceIdRequest {
                voice_id: params.voice,
                text: params.text,
            });

        send(ProviderKey::Fishaudio, request).await
    }

    fn key(&self) -> ProviderKey {
        ProviderKey::Fishaudio
    }
}
