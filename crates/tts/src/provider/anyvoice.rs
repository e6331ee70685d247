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
};

use super::{TtsProvider, send};

const DEFAULT_SPEAK_URL: &str = "https://api.anyvoice.example/v1/speak";

/// AnyVoice adapter
pub(crate) struct AnyvoiceProvider {
    client: Client,
    url: String,
    auth: ProviderAuth,
}

impl AnyvoiceProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: http_client(),
            url: config.url.clone().unwrap_or_else(|| DEFAULT_SPEAK_URL.to_string()),
            auth: ProviderAuth::Bearer(credential(config.api_key.as_ref())),
        }
    }
}

#[derive(Serialize)]
pub(super) struct VoiceIdRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<&'a str>,
    pub text: &'a str,
}

#[async_trait]
impl TtsProvider for AnyvoiceProvider {
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value> {
        tracing::debug!(voice = ?params.voice, text_len = params.text.len(), "AnyVoice speak request");

        let body = VoiceIdRequest {
            voice_id: params.voice,
            text: params.text,
        };

        let request = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.auth.header_value())
            .json(&body);

        send(ProviderKey::Anyvoice, request).await
    }

    fn key(&self) -> ProviderKey {
        ProviderKey::Anyvoice
    }
}
