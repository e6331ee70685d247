use std::process::Stdio;

use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::process::Command;
use voxgate_config::OcrConfig;

/// Text returned whenever recognition cannot produce a result
pub const OCR_FALLBACK_TEXT: &str = "No se pudo reconocer texto.";

/// Tesseract-compatible OCR engine driven through its CLI
#[derive(Debug, Clone)]
pub struct OcrEngine {
    command: String,
    language: String,
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
        }
    }

    /// Download an image and extract its text
    ///
    /// Never fails: any error along the way is logged and replaced by
    /// [`OCR_FALLBACK_TEXT`].
    pub async fn read_from_url(&self, client: &Client, url: Option<&str>) -> String {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            tracing::debug!("OCR requested without an image url");
            return OCR_FALLBACK_TEXT.to_string();
        };

        match self.fetch_and_recognize(client, url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%url, "OCR failed: {e}");
                OCR_FALLBACK_TEXT.to_string()
            }
        }
    }

    async fn fetch_and_recognize(&self, client: &Client, url: &str) -> anyhow::Result<String> {
        let image = client.get(url).send().await?.error_for_status()?.bytes().await?;

        self.recognize(&image).await
    }

    /// Run the engine over an in-memory image
    pub async fn recognize(&self, image: &[u8]) -> anyhow::Result<String> {
        let input = NamedTempFile::new()?;
        tokio::fs::write(input.path(), image).await?;

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("failed to run {}: {e}", self.command))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
