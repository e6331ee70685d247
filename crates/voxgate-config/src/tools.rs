use std::time::Duration;

use serde::Deserialize;

/// Settings for the single-purpose tool endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub screenshot: ScreenshotConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

/// OCR engine invocation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OcrConfig {
    /// Tesseract executable
    #[serde(default = "default_ocr_command")]
    pub command: String,
    /// Recognition language
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_ocr_command(),
            language: default_ocr_language(),
        }
    }
}

/// Headless browser invocation for page captures
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenshotConfig {
    /// Chromium-compatible executable
    #[serde(default = "default_browser_command")]
    pub command: String,
    /// Navigation and capture timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Viewport size; captures extend past it to the full document
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

impl ScreenshotConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            command: default_browser_command(),
            timeout_secs: default_timeout_secs(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Values reported by the status endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    #[serde(default = "default_creator")]
    pub creator: String,
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            creator: default_creator(),
            domain: default_domain(),
        }
    }
}

fn default_ocr_command() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_browser_command() -> String {
    "chromium".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_window_width() -> u32 {
    1280
}

const fn default_window_height() -> u32 {
    800
}

fn default_creator() -> String {
    "voxgate".to_string()
}

fn default_domain() -> String {
    "render/vercel compatible".to_string()
}
