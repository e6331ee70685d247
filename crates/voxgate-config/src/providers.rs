use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Fixed set of speech providers the gateway can dispatch to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKey {
    Uberduck,
    Playht,
    Resemble,
    Anyvoice,
    Fishaudio,
}

impl ProviderKey {
    /// Every provider, in routing-table order
    pub const ALL: [Self; 5] = [
        Self::Uberduck,
        Self::Playht,
        Self::Resemble,
        Self::Anyvoice,
        Self::Fishaudio,
    ];

    /// Environment variables that override this provider's settings
    pub const fn env_names(self) -> ProviderEnvNames {
        match self {
            Self::Uberduck => ProviderEnvNames {
                url: "UBERDUCK_SPEAK_URL",
                clone_url: Some("UBERDUCK_VOICE_CREATE_URL"),
                api_key: "UBERDUCK_KEY",
                api_secret: Some("UBERDUCK_SECRET"),
                project: None,
            },
            Self::Playht => ProviderEnvNames {
                url: "PLAYHT_TTS_URL",
                clone_url: None,
                api_key: "PLAYHT_KEY",
                api_secret: None,
                project: None,
            },
            Self::Resemble => ProviderEnvNames {
                url: "RESEMBLE_TTS_URL",
                clone_url: Some("RESEMBLE_ADD_VOICE_URL"),
                api_key: "RESEMBLE_KEY",
                api_secret: None,
                project: Some("RESEMBLE_PROJECT"),
            },
            Self::Anyvoice => ProviderEnvNames {
                url: "ANYVOICE_TTS_URL",
                clone_url: None,
                api_key: "ANYVOICE_KEY",
                api_secret: None,
                project: None,
            },
            Self::Fishaudio => ProviderEnvNames {
                url: "FISHAUDIO_TTS_URL",
                clone_url: None,
                api_key: "FISHAUDIO_KEY",
                api_secret: None,
                project: None,
            },
        }
    }
}

/// Environment variable names for one provider
#[derive(Debug, Clone, Copy)]
pub struct ProviderEnvNames {
    pub url: &'static str,
    pub clone_url: Option<&'static str>,
    pub api_key: &'static str,
    pub api_secret: Option<&'static str>,
    pub project: Option<&'static str>,
}

/// Settings for a single provider
///
/// Unset URLs fall back to the adapter's built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Speech endpoint override
    #[serde(default)]
    pub url: Option<String>,
    /// Voice-creation endpoint override (cloning providers only)
    #[serde(default)]
    pub clone_url: Option<String>,
    /// API key or token
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// API secret, used by providers with Basic auth
    #[serde(default)]
    pub api_secret: Option<SecretString>,
    /// Project identifier, used by providers with project-scoped URLs
    #[serde(default)]
    pub project: Option<String>,
}

/// Provider settings keyed by provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub uberduck: ProviderConfig,
    #[serde(default)]
    pub playht: ProviderConfig,
    #[serde(default)]
    pub resemble: ProviderConfig,
    #[serde(default)]
    pub anyvoice: ProviderConfig,
    #[serde(default)]
    pub fishaudio: ProviderConfig,
}

impl ProvidersConfig {
    pub const fn get(&self, key: ProviderKey) -> &ProviderConfig {
        match key {
            ProviderKey::Uberduck => &self.uberduck,
            ProviderKey::Playht => &self.playht,
            ProviderKey::Resemble => &self.resemble,
            ProviderKey::Anyvoice => &self.anyvoice,
            ProviderKey::Fishaudio => &self.fishaudio,
        }
    }

    pub const fn get_mut(&mut self, key: ProviderKey) -> &mut ProviderConfig {
        match key {
            ProviderKey::Uberduck => &mut self.uberduck,
            ProviderKey::Playht => &mut self.playht,
            ProviderKey::Resemble => &mut self.resemble,
            ProviderKey::Anyvoice => &mut self.anyvoice,
            ProviderKey::Fishaudio => &mut self.fishaudio,
        }
    }

    /// Layer environment overrides on top of the file configuration
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for key in ProviderKey::ALL {
            let names = key.env_names();
            let provider = self.get_mut(key);

            if let Some(url) = lookup(names.url) {
                provider.url = Some(url);
            }
            if let Some(url) = names.clone_url.and_then(&lookup) {
                provider.clone_url = Some(url);
            }
            if let Some(api_key) = lookup(names.api_key) {
                provider.api_key = Some(SecretString::from(api_key));
            }
            if let Some(secret) = names.api_secret.and_then(&lookup) {
                provider.api_secret = Some(SecretString::from(secret));
            }
            if let Some(project) = names.project.and_then(&lookup) {
                provider.project = Some(project);
            }
        }
    }
}
