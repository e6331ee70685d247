use std::path::PathBuf;

use serde::Deserialize;

/// Local directories used for request-scoped uploads and generated artifacts
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Where voice samples are staged while a clone request is in flight
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// Where generated archives are written; served under `/downloads`
    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            outputs_dir: default_outputs_dir(),
        }
    }
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("outputs")
}
