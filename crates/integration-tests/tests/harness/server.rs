//! voxgate instance bound to an ephemeral port with its own storage root

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use reqwest::{Response, multipart::Form};
use serde_json::Value;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use voxgate_server::Server;

use super::config::ConfigBuilder;

/// A running voxgate instance
///
/// Uploads and outputs live under a temporary directory that is removed
/// together with the server.
pub struct TestServer {
    addr: SocketAddr,
    root: TempDir,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start with the default test configuration
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(|config| config).await
    }

    /// Start after `configure` has adjusted the test configuration
    pub async fn start_with(configure: impl FnOnce(ConfigBuilder) -> ConfigBuilder) -> anyhow::Result<Self> {
        let root = tempfile::tempdir()?;
        let config = configure(ConfigBuilder::new(root.path())).build();
        let router = Server::new(&config)?.into_router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let shutdown = CancellationToken::new();
        let stopped = shutdown.clone();

        tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move { stopped.cancelled().await })
                .await;

            if let Err(e) = result {
                eprintln!("test server exited with error: {e}");
            }
        });

        Ok(Self {
            addr,
            root,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.path().join("uploads")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.path().join("outputs")
    }

    /// Files still staged in the uploads directory
    pub fn residual_uploads(&self) -> usize {
        count_entries(&self.uploads_dir())
    }

    /// `GET` with query parameters
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Response {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {path} failed: {e}"))
    }

    /// `GET` and decode the JSON body
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> (u16, Value) {
        into_json(self.get(path, query).await).await
    }

    /// `POST` a JSON body and decode the JSON response
    pub async fn post_json(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {path} failed: {e}"));

        into_json(response).await
    }

    /// `POST` a multipart form and decode the JSON response
    pub async fn post_form(&self, path: &str, form: Form) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {path} failed: {e}"));

        into_json(response).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn into_json(response: Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);

    (status, body)
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map_or(0, Iterator::count)
}
