#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod providers;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod tools;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use providers::*;
pub use server::*;
pub use storage::*;
pub use telemetry::{ExportProtocol, ExporterConfig, TelemetryConfig};
pub use tools::*;
pub use tts::*;

/// Top-level voxgate configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload and output directories
    #[serde(default)]
    pub storage: StorageConfig,
    /// Speech dispatcher configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Per-provider endpoints and credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// OCR, screenshot and status settings
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
