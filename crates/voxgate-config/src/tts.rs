use serde::Deserialize;

use crate::ProviderKey;

/// Speech dispatcher configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Provider used by the query-string endpoint, which carries no provider field
    #[serde(default = "default_provider")]
    pub default_provider: ProviderKey,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
        }
    }
}

const fn default_provider() -> ProviderKey {
    ProviderKey::Playht
}
