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

const DEFAULT_CONVERT_URL: &str = "https://play.ht/api/v1/convert";

/// Play.ht adapter
pub(crate) struct PlayhtProvider {
    client: Client,
    url: String,
    auth: ProviderAuth,
}

impl PlayhtProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: http_client(),
            url: config.url.clone().unwrap_or_else(|| DEFAULT_CONVERT_URL.to_string()),
            auth: ProviderAuth::Bearer(credential(config.api_key.as_ref())),
        }
    }
}

#[derive(Serialize)]
struct PlayhtConvertRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
    content: &'a str,
}

#[async_trait]
impl TtsProvider for PlayhtProvider {
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value> {
        tracing::debug!(voice = ?params.voice, text_len = params.text.len(), "Play.ht convert request");

        let body = PlayhtConvertRequest {
            voice: params.voice,
            content: params.text,
        };

        let request = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.auth.header_value())
            .json(&body);

        send(ProviderKey::Playht, request).await
    }

    fn key(&self) -> ProviderKey {
        ProviderKey::Playht
    }
}
