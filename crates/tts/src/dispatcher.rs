use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use secrecy::ExposeSecret;
use voxgate_config::{Config, ProviderKey};

use crate::{
    error::{Result, TtsError},
    provider::{
        TtsProvider, anyvoice::AnyvoiceProvider, fishaudio::FishaudioProvider, playht::PlayhtProvider,
        resemble::ResembleProvider, uberduck::UberduckProvider,
    },
    types::{SpeechEnvelope, SpeechRequest},
};

/// Routes speech and clone requests to provider adapters
pub struct Dispatcher {
    providers: IndexMap<ProviderKey, Box<dyn TtsProvider>>,
    default_provider: ProviderKey,
    uploads_dir: PathBuf,
}

impl Dispatcher {
    /// Assemble a dispatcher from explicit adapters
    pub fn new(
        providers: impl IntoIterator<Item = Box<dyn TtsProvider>>,
        default_provider: ProviderKey,
        uploads_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            providers: providers.into_iter().map(|provider| (provider.key(), provider)).collect(),
            default_provider,
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Synthesize speech through the requested provider
    ///
    /// Makes exactly one outbound call. The provider's payload is wrapped,
    /// never reshaped.
    pub async fn dispatch(&self, request: SpeechRequest) -> Result<SpeechEnvelope> {
        let provider = self.provider(request.provider)?;

        tracing::debug!(provider = %request.provider, "dispatching speech request");

        let raw = provider.speak((&request).into()).await?;

        Ok(SpeechEnvelope::new(request.provider, raw))
    }

    pub(crate) fn provider(&self, key: ProviderKey) -> Result<&dyn TtsProvider> {
        self.providers
            .get(&key)
            .map(|provider| &**provider)
            .ok_or_else(|| TtsError::UnsupportedProvider(key.to_string()))
    }

    /// Provider used when a request does not name one
    pub const fn default_provider(&self) -> ProviderKey {
        self.default_provider
    }

    /// Directory where clone samples are staged
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}

/// Builder for constructing the dispatcher from configuration
pub struct DispatcherBuilder<'a> {
    config: &'a Config,
}

impl<'a> DispatcherBuilder<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Dispatcher {
        let providers = ProviderKey::ALL.map(|key| {
            let config = self.config.providers.get(key);

            tracing::debug!("Initializing speech provider: {key}");

            if config.api_key.as_ref().is_none_or(|api_key| api_key.expose_secret().is_empty()) {
                tracing::warn!(provider = %key, "no API key configured, requests will be sent without credentials");
            }

            if key == ProviderKey::Resemble && config.project.is_none() && config.url.is_none() {
                tracing::warn!("no Resemble project configured, default endpoints will not resolve");
            }

            let provider: Box<dyn TtsProvider> = match key {
                ProviderKey::Uberduck => Box::new(UberduckProvider::new(config)),
                ProviderKey::Playht => Box::new(PlayhtProvider::new(config)),
                ProviderKey::Resemble => Box::new(ResembleProvider::new(config)),
                ProviderKey::Anyvoice => Box::new(AnyvoiceProvider::new(config)),
                ProviderKey::Fishaudio => Box::new(FishaudioProvider::new(config)),
            };

            provider
        });

        tracing::debug!("Speech dispatcher initialized with {} provider(s)", providers.len());

        Dispatcher::new(
            providers,
            self.config.tts.default_provider,
            self.config.storage.uploads_dir.clone(),
        )
    }
}
