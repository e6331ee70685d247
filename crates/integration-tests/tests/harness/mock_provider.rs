//! Mock speech provider backend for integration tests
//!
//! Serves every provider under `/<provider>/speak` and `/<provider>/clone`
//! and records what it received

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Audio payload every successful speak call returns
pub fn canned_audio() -> Value {
    json!({ "url": "http://x/a.mp3" })
}

/// Error body returned in failing mode
pub fn canned_error() -> Value {
    json!({ "error": "insufficient credits" })
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub provider: String,
    pub authorization: Option<String>,
    pub body: Value,
    /// Filenames of the `files` parts, for clone calls
    pub files: Vec<String>,
}

struct MockState {
    failing: bool,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock provider backend returning predictable responses
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockProvider {
    /// Start a mock whose calls all succeed
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock that answers every provider call with 402
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(failing: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            failing,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/{provider}/speak", routing::post(handle_speak))
            .route("/{provider}/clone", routing::post(handle_clone))
            .route("/page", routing::get(handle_page))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL of the mock
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Everything received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn handle_speak(
    State(state): State<Arc<MockState>>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(RecordedRequest {
        provider,
        authorization: authorization(&headers),
        body,
        files: Vec::new(),
    });

    if state.failing {
        (StatusCode::PAYMENT_REQUIRED, Json(canned_error()))
    } else {
        (StatusCode::OK, Json(canned_audio()))
    }
}

async fn handle_clone(
    State(state): State<Arc<MockState>>,
    Path(provider): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut name = None;
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("name") => name = Some(field.text().await.unwrap()),
            Some("files") => files.push(field.file_name().unwrap_or_default().to_owned()),
            _ => {}
        }
    }

    state.requests.lock().unwrap().push(RecordedRequest {
        provider,
        authorization: authorization(&headers),
        body: json!({ "name": name }),
        files: files.clone(),
    });

    if state.failing {
        (StatusCode::PAYMENT_REQUIRED, Json(canned_error()))
    } else {
        (
            StatusCode::OK,
            Json(json!({ "id": "voice-1", "name": name, "files": files.len() })),
        )
    }
}

async fn handle_page() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], "<html><body>archived</body></html>")
}
