use std::time::Duration;

use chromiumoxide::{
    Browser, BrowserConfig,
    cdp::browser_protocol::page::CaptureScreenshotFormat,
    page::ScreenshotParams,
};
use futures_util::StreamExt;
use url::Url;
use voxgate_config::ScreenshotConfig;

use crate::error::{Result, ToolError};

/// Full-page renderer driving a headless Chromium over the DevTools protocol
#[derive(Debug, Clone)]
pub struct Screenshotter {
    command: String,
    timeout: Duration,
    viewport: (u32, u32),
}

impl Screenshotter {
    pub fn new(config: &ScreenshotConfig) -> Self {
        Self {
            command: config.command.clone(),
            timeout: config.timeout(),
            viewport: (config.window_width, config.window_height),
        }
    }

    /// Render `url` to a PNG image covering the whole document
    ///
    /// Launch, navigation and capture share the configured timeout. The
    /// browser process is killed when it is dropped.
    pub async fn capture(&self, url: &str) -> Result<Vec<u8>> {
        let url = parse_target(url)?;

        tracing::debug!(%url, "capturing screenshot");

        tokio::time::timeout(self.timeout, self.render(&url))
            .await
            .map_err(|_| capture_error(&url, format!("timed out after {}s", self.timeout.as_secs())))?
    }

    async fn render(&self, url: &Url) -> Result<Vec<u8>> {
        let profile = tempfile::tempdir().map_err(|e| ToolError::Internal(format!("failed to create profile dir: {e}")))?;

        let config = BrowserConfig::builder()
            .chrome_executable(&self.command)
            .user_data_dir(profile.path())
            .no_sandbox()
            .window_size(self.viewport.0, self.viewport.1)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--hide-scrollbars")
            .build()
            .map_err(|e| capture_error(url, format!("invalid browser configuration: {e}")))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| capture_error(url, format!("failed to launch {}: {e}", self.command)))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let image = capture_page(&browser, url).await;

        if let Err(e) = browser.close().await {
            tracing::debug!("browser close failed: {e}");
        }
        if let Err(e) = browser.wait().await {
            tracing::debug!("browser exit wait failed: {e}");
        }
        events.abort();

        image
    }
}

async fn capture_page(browser: &Browser, url: &Url) -> Result<Vec<u8>> {
    let page = browser
        .new_page(url.as_str())
        .await
        .map_err(|e| capture_error(url, format!("navigation failed: {e}")))?;

    page.wait_for_navigation()
        .await
        .map_err(|e| capture_error(url, format!("navigation failed: {e}")))?;

    page.screenshot(capture_params())
        .await
        .map_err(|e| capture_error(url, format!("capture failed: {e}")))
}

/// PNG of the full scrollable document, not just the viewport
fn capture_params() -> ScreenshotParams {
    ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build()
}

fn parse_target(url: &str) -> Result<Url> {
    let url = Url::parse(url).map_err(|e| ToolError::validation(format!("invalid url: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ToolError::validation(format!("unsupported url scheme: {scheme}"))),
    }
}

fn capture_error(url: &Url, reason: String) -> ToolError {
    tracing::error!(%url, "screenshot failed: {reason}");
    ToolError::Capture(reason)
}
