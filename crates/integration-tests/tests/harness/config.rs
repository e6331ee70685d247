//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use secrecy::SecretString;
use voxgate_config::{Config, CorsConfig, ProviderConfig, ProviderKey};

pub const TEST_KEY: &str = "test-key";
pub const TEST_SECRET: &str = "test-secret";
pub const TEST_PROJECT: &str = "proj-1";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder whose storage lives under `root`
    pub fn new(root: &Path) -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.storage.uploads_dir = root.join("uploads");
        config.storage.outputs_dir = root.join("outputs");

        Self { config }
    }

    /// Point every provider at the mock backend under `/<provider>/...`
    pub fn with_mock_providers(mut self, base_url: &str) -> Self {
        for key in ProviderKey::ALL {
            *self.config.providers.get_mut(key) = ProviderConfig {
                url: Some(format!("{base_url}/{key}/speak")),
                clone_url: Some(format!("{base_url}/{key}/clone")),
                api_key: Some(SecretString::from(TEST_KEY)),
                api_secret: Some(SecretString::from(TEST_SECRET)),
                project: Some(TEST_PROJECT.to_owned()),
            };
        }
        self
    }

    /// Provider used by `GET /api/tts`
    pub fn with_default_provider(mut self, key: ProviderKey) -> Self {
        self.config.tts.default_provider = key;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
