use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "relevance-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when analyses cannot run (no API key).
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: String,
    pub analysis_ready: bool,
    pub max_upload_bytes: usize,
}

/// GET /health
///
/// The process is up whenever this answers; `analysis_ready` tells the UI
/// whether an analysis request can succeed with the current configuration.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let analysis_ready = state.analyzer.has_api_key();
    Json(HealthResponse {
        status: if analysis_ready { "ok" } else { "degraded" },
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        model: state.analyzer.model().to_string(),
        analysis_ready,
        max_upload_bytes: state.config.max_upload_bytes,
    })
}
