use std::{net::SocketAddr, path::Path};

use crate::{Config, server::DEFAULT_PORT};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, deserializes,
    /// layers provider environment overrides on top and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let mut config = Self::parse(&raw)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load the file when it exists, otherwise start from defaults
    ///
    /// Environment overrides apply in both cases, so a deployment can be
    /// configured purely through variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is invalid or validation fails
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config file not found, using defaults");

        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse a raw TOML document after placeholder expansion
    ///
    /// # Errors
    ///
    /// Returns an error if expansion or deserialization fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Apply environment overrides; values from `lookup` win over the file
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => {
                    let ip = self
                        .server
                        .listen_address
                        .map_or_else(|| [0, 0, 0, 0].into(), |address| address.ip());
                    self.server.listen_address = Some(SocketAddr::new(ip, port));
                }
                Err(e) => tracing::warn!(%port, "ignoring invalid PORT value: {e}"),
            }
        }

        self.providers.apply_env(lookup);
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout or sampling rate is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tools.screenshot.timeout_secs == 0 {
            anyhow::bail!("tools.screenshot.timeout_secs must be greater than 0");
        }

        if let Some(ref telemetry) = self.telemetry
            && !(0.0..=1.0).contains(&telemetry.sampling_rate)
        {
            anyhow::bail!("telemetry.sampling_rate must be between 0.0 and 1.0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    /// Port the server binds when nothing overrides it
    pub const fn default_port() -> u16 {
        DEFAULT_PORT
    }
}
