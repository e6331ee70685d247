use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Milliseconds since the Unix epoch
    pub ts: i64,
}

/// Health check handler
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: jiff::Timestamp::now().as_millisecond(),
    })
}
