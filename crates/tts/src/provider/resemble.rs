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

const DEFAULT_API_URL: &str = "https://app.resemble.ai/api/v1";

/// Resemble AI adapter; endpoints are scoped to a project
pub(crate) struct ResembleProvider {
    client: Client,
    clips_url: String,
    assets_url: String,
    auth: ProviderAuth,
}

impl ResembleProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let project = config.project.as_deref().unwrap_or_default();
        let project_url = format!("{DEFAULT_API_URL}/projects/{project}");

        Self {
            client: http_client(),
            clips_url: config.url.clone().unwrap_or_else(|| format!("{project_url}/clips")),
            assets_url: config.clone_url.clone().unwrap_or_else(|| format!("{project_url}/assets")),
            auth: ProviderAuth::Token(credential(config.api_key.as_ref())),
        }
    }
}

#[derive(Serialize)]
struct ResembleClipRequest<'a> {
    audio: ResembleAudio<'a>,
}

#[derive(Serialize)]
struct ResembleAudio<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice: Option<&'a str>,
    text: &'a str,
}

#[async_trait]
impl TtsProvider for ResembleProvider {
    async fn speak(&self, params: SpeakParams<'_>) -> Result<Value> {
        tracing::debug!(voice = ?params.voice, text_len = params.text.len(), "Resemble clip request");

        let body = ResembleClipRequest {
            audio: ResembleAudio {
                voice: params.voice,
                text: params.text,
            },
        };

        let request = self
            .client
            .post(&self.clips_url)
            .header(AUTHORIZATION, self.auth.header_value())
            .json(&body);

        send(ProviderKey::Resemble, request).await
    }

    fn key(&self) -> ProviderKey {
        ProviderKey::Resemble
    }

    fn supports_cloning(&self) -> bool {
        true
    }

    async fn clone_voice(&self, name: &str, samples: &[VoiceSample]) -> Result<Value> {
        tracing::debug!(%name, samples = samples.len(), "Resemble asset upload");

        let form = sample_form(name, samples).await?;

        let request = self
            .client
            .post(&self.assets_url)
            .header(AUTHORIZATION, self.auth.header_value())
            .multipart(form);

        send(ProviderKey::Resemble, request).await
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    use super::*;

    #[test]
    fn default_urls_embed_the_project() {
        let provider = ResembleProvider::new(&ProviderConfig {
            project: Some("p-9".to_string()),
            ..ProviderConfig::default()
        });

        assert_eq!(provider.clips_url, "https://app.resemble.ai/api/v1/projects/p-9/clips");
        assert_eq!(provider.assets_url, "https://app.resemble.ai/api/v1/projects/p-9/assets");
    }

    #[tokio::test]
    async fn speak_nests_voice_and_text_under_audio() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clips"))
            .and(header("authorization", "Token token=rk"))
            .and(body_json(json!({ "audio": { "voice": "v-1", "text": "hola" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "item": { "uuid": "c1" } })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = ResembleProvider::new(&ProviderConfig {
            url: Some(format!("{}/clips", server.uri())),
            api_key: Some(SecretString::from("rk")),
            ..ProviderConfig::default()
        });

        let raw = provider
            .speak(SpeakParams {
                voice: Some("v-1"),
                text: "hola",
            })
            .await
            .unwrap();

        assert_eq!(raw["item"]["uuid"], "c1");
    }
}
