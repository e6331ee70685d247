use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use voxgate_config::ProviderKey;

use crate::{
    error::{MISSING_FIELDS_MESSAGE, Result, TtsError},
    uploads::StagedSamples,
};

/// Speech request body as posted by clients
///
/// `voice` and `voice_id` are synonyms; `voice` wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequestBody {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

impl SpeechRequestBody {
    /// Validate the body into a dispatchable request
    pub fn into_request(self) -> Result<SpeechRequest> {
        let (Some(provider), Some(text)) = (non_empty(self.provider), non_empty(self.text)) else {
            return Err(TtsError::validation(MISSING_FIELDS_MESSAGE));
        };

        let provider = ProviderKey::from_str(&provider).map_err(|_| TtsError::UnsupportedProvider(provider))?;

        Ok(SpeechRequest {
            provider,
            text,
            voice: non_empty(self.voice).or_else(|| non_empty(self.voice_id)),
        })
    }
}

/// Validated speech request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub provider: ProviderKey,
    pub text: String,
    pub voice: Option<String>,
}

/// Borrowed view handed to a provider adapter
#[derive(Debug, Clone, Copy)]
pub struct SpeakParams<'a> {
    pub voice: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> From<&'a SpeechRequest> for SpeakParams<'a> {
    fn from(request: &'a SpeechRequest) -> Self {
        Self {
            voice: request.voice.as_deref(),
            text: &request.text,
        }
    }
}

/// Query string accepted by `GET /api/tts`
#[derive(Debug, Default, Deserialize)]
pub struct SpeechQuery {
    pub text: Option<String>,
    pub voice: Option<String>,
}

/// Successful dispatch: the provider payload is passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechEnvelope {
    pub ok: bool,
    pub provider: ProviderKey,
    pub raw: Value,
}

impl SpeechEnvelope {
    pub const fn new(provider: ProviderKey, raw: Value) -> Self {
        Self { ok: true, provider, raw }
    }
}

/// Response of the query-string speech endpoint
#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub audio: Value,
}

/// Voice clone request after its samples have been staged on disk
#[derive(Debug)]
pub struct CloneRequest {
    pub provider: Option<String>,
    pub name: String,
    pub consent: Option<String>,
    pub samples: StagedSamples,
}

/// Name given to a clone when the client does not supply one
pub const DEFAULT_CLONE_NAME: &str = "my-clone";

/// Successful clone: the provider's creation payload is passed through
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloneEnvelope {
    pub ok: bool,
    pub provider: ProviderKey,
    pub created: Value,
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
