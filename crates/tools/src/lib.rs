#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod archive;
mod error;
mod ocr;
mod qr;
mod screenshot;
mod status;

use std::{path::PathBuf, sync::Arc, time::Instant};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use voxgate_config::{Config, StatusConfig};

pub use archive::{ArchiveEntry, ArchiveError, ArchiveSource, create_zip};
pub use error::{CAPTURE_FAILED_MESSAGE, Result, ToolError};
pub use ocr::{OCR_FALLBACK_TEXT, OcrEngine};
pub use qr::text_to_qr;
pub use screenshot::Screenshotter;
pub use status::{FEATURE_COUNT, StatusResponse};

/// Shared state for the standalone tool endpoints
pub struct ToolsState {
    client: Client,
    ocr: OcrEngine,
    screenshot: Screenshotter,
    status: StatusConfig,
    outputs_dir: PathBuf,
    started: Instant,
}

impl ToolsState {
    /// Directory holding generated archives
    pub fn outputs_dir(&self) -> &std::path::Path {
        &self.outputs_dir
    }
}

/// Build the tool state from configuration
///
/// Creates the outputs directory that archives are written to.
pub fn build_tools(config: &Config) -> anyhow::Result<Arc<ToolsState>> {
    let outputs_dir = config.storage.outputs_dir.clone();

    std::fs::create_dir_all(&outputs_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create outputs directory {}: {e}", outputs_dir.display()))?;

    let client = Client::builder()
        .user_agent(concat!("voxgate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client for tools: {e}"))?;

    Ok(Arc::new(ToolsState {
        client,
        ocr: OcrEngine::new(&config.tools.ocr),
        screenshot: Screenshotter::new(&config.tools.screenshot),
        status: config.tools.status.clone(),
        outputs_dir,
        started: Instant::now(),
    }))
}

/// Create the endpoint router for the tool endpoints
pub fn endpoint_router() -> Router<Arc<ToolsState>> {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/ocr", get(ocr_handler))
        .route("/api/screenshot", get(screenshot_handler))
        .route("/api/savezip", get(save_zip_handler))
        .route("/api/text2qr", get(text2qr_handler))
}

#[derive(Debug, Deserialize)]
struct UrlQuery {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextQuery {
    text: Option<String>,
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ToolError::validation(format!("{name} is required")))
}

async fn status_handler(State(state): State<Arc<ToolsState>>) -> Json<StatusResponse> {
    Json(StatusResponse::new(&state.status, state.started))
}

async fn ocr_handler(State(state): State<Arc<ToolsState>>, Query(query): Query<UrlQuery>) -> Json<Value> {
    let result = state.ocr.read_from_url(&state.client, query.url.as_deref()).await;

    Json(json!({ "result": result }))
}

async fn screenshot_handler(
    State(state): State<Arc<ToolsState>>,
    Query(query): Query<UrlQuery>,
) -> Result<impl IntoResponse> {
    let url = required(query.url, "url")?;
    let image = state.screenshot.capture(&url).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], image))
}

/// Download a page and return it packaged as a zip attachment
///
/// The archive is also kept under the outputs directory.
async fn save_zip_handler(State(state): State<Arc<ToolsState>>, Query(query): Query<UrlQuery>) -> Result<impl IntoResponse> {
    let url = required(query.url, "url")?;
    let target = url::Url::parse(&url).map_err(|e| ToolError::validation(format!("invalid url: {e}")))?;

    let fetch_error = |e: reqwest::Error| ToolError::Fetch {
        url: target.to_string(),
        message: e.to_string(),
    };

    let page = state
        .client
        .get(target.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_error)?
        .bytes()
        .await
        .map_err(fetch_error)?;

    let entries = vec![
        ArchiveEntry::bytes("index.html", page.to_vec()),
        ArchiveEntry::bytes("source.url", format!("[InternetShortcut]\nURL={target}\n")),
    ];

    let archive = tokio::task::spawn_blocking(move || create_zip(&entries))
        .await
        .map_err(|e| ToolError::Internal(format!("archive task failed: {e}")))??;

    let file_name = format!("site-{}.zip", uuid::Uuid::new_v4());
    let path = state.outputs_dir.join(&file_name);

    tokio::fs::write(&path, &archive)
        .await
        .map_err(|e| ToolError::Internal(format!("failed to write {}: {e}", path.display())))?;

    tracing::info!(%target, archive = %path.display(), bytes = archive.len(), "site archived");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        archive,
    ))
}

async fn text2qr_handler(Query(query): Query<TextQuery>) -> Result<Json<Value>> {
    let text = required(query.text, "text")?;
    let qr = text_to_qr(&text)?;

    Ok(Json(json!({ "qr": qr })))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    fn state(outputs: &std::path::Path) -> Arc<ToolsState> {
        let mut config = Config::default();
        config.storage.outputs_dir = outputs.to_path_buf();

        build_tools(&config).unwrap()
    }

    async fn get_request(state: Arc<ToolsState>, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = endpoint_router()
            .with_state(state)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

        (status, headers, body)
    }

    #[tokio::test]
    async fn build_creates_outputs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = dir.path().join("nested/outputs");

        let state = state(&outputs);

        assert!(outputs.is_dir());
        assert_eq!(state.outputs_dir(), outputs);
    }

    #[tokio::test]
    async fn text2qr_requires_text() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get_request(state(dir.path()), "/api/text2qr").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({ "error": "text is required" })
        );
    }

    #[tokio::test]
    async fn ocr_without_url_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get_request(state(dir.path()), "/api/ocr").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({ "result": OCR_FALLBACK_TEXT })
        );
    }

    #[tokio::test]
    async fn screenshot_requires_url() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, _) = get_request(state(dir.path()), "/api/screenshot").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn save_zip_writes_archive_to_outputs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>hi</h1>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let uri = format!("/api/savezip?url={}/page", server.uri());
        let (status, headers, body) = get_request(state(dir.path()), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/zip");
        assert!(
            headers[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .starts_with("attachment; filename=\"site-")
        );

        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(written.len(), 1);
        assert_eq!(std::fs::read(&written[0]).unwrap(), body);
    }

    #[tokio::test]
    async fn save_zip_fetch_failure_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let uri = format!("/api/savezip?url={}/missing", server.uri());
        let (status, _, _) = get_request(state(dir.path()), &uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
