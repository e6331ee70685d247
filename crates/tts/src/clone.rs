use std::str::FromStr;

use voxgate_config::ProviderKey;

use crate::{
    dispatcher::Dispatcher,
    error::{CONSENT_REQUIRED_MESSAGE, Result, TtsError},
    types::{CloneEnvelope, CloneRequest, non_empty},
    uploads::StagedSamples,
};

impl Dispatcher {
    /// Forward consented voice samples to a cloning-capable provider
    ///
    /// Staged samples are deleted once this returns, on success and on
    /// every failure path alike.
    pub async fn clone_voice(&self, request: CloneRequest) -> Result<CloneEnvelope> {
        let CloneRequest {
            provider,
            name,
            consent,
            mut samples,
        } = request;

        let outcome = self
            .upload_samples(provider, &name, consent.as_deref(), &samples)
            .await;

        samples.cleanup().await;

        match outcome {
            Ok(ref envelope) => tracing::info!(provider = %envelope.provider, %name, "voice clone created"),
            Err(ref e) => tracing::warn!(%name, "voice clone rejected: {e}"),
        }

        outcome
    }

    async fn upload_samples(
        &self,
        provider: Option<String>,
        name: &str,
        consent: Option<&str>,
        samples: &StagedSamples,
    ) -> Result<CloneEnvelope> {
        let Some(provider) = non_empty(provider) else {
            return Err(TtsError::validation("provider is required"));
        };

        if consent != Some("yes") {
            return Err(TtsError::validation(CONSENT_REQUIRED_MESSAGE));
        }

        let key = ProviderKey::from_str(&provider).map_err(|_| TtsError::CloningNotSupported(provider.clone()))?;

        let adapter = self
            .provider(key)
            .ok()
            .filter(|adapter| adapter.supports_cloning())
            .ok_or(TtsError::CloningNotSupported(provider))?;

        tracing::debug!(%key, samples = samples.len(), "uploading voice samples");

        let created = adapter.clone_voice(name, samples.as_slice()).await?;

        Ok(CloneEnvelope {
            ok: true,
            provider: key,
            created,
        })
    }
}
