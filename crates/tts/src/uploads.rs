use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Maximum number of voice samples accepted per clone request
pub const MAX_SAMPLES: usize = 12;

/// One uploaded voice sample staged on local disk
#[derive(Debug, Clone)]
pub struct VoiceSample {
    /// Request-unique path inside the uploads directory
    pub path: PathBuf,
    /// Filename as sent by the client, forwarded to the provider
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Owner of the sample files staged for a single request
///
/// Files are removed by [`StagedSamples::cleanup`] once the provider call
/// finishes. Dropping the value removes whatever is still on disk, so an
/// early return or a failed extraction never leaves samples behind.
/// Removal is best-effort: failures are logged, never returned.
#[derive(Debug, Default)]
pub struct StagedSamples {
    samples: Vec<VoiceSample>,
}

impl StagedSamples {
    pub const fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Take ownership of a file that is already on disk
    pub fn push(&mut self, sample: VoiceSample) {
        self.samples.push(sample);
    }

    pub fn as_slice(&self) -> &[VoiceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Delete every staged file
    pub async fn cleanup(&mut self) {
        for sample in self.samples.drain(..) {
            if let Err(e) = tokio::fs::remove_file(&sample.path).await {
                log_removal_failure(&sample.path, &e);
            }
        }
    }
}

impl Drop for StagedSamples {
    fn drop(&mut self) {
        for sample in self.samples.drain(..) {
            if let Err(e) = std::fs::remove_file(&sample.path) {
                log_removal_failure(&sample.path, &e);
            }
        }
    }
}

fn log_removal_failure(path: &Path, error: &std::io::Error) {
    if error.kind() != ErrorKind::NotFound {
        tracing::warn!(path = %path.display(), "failed to remove staged sample: {error}");
    }
}
