//! Status polling handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::http::responses::{AppStatusResponse, LogsResponse, STATUS_LOG_TAIL};
use crate::state::AppState;

/// Current run guard snapshot.
///
/// GET /status
pub async fn run_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.guard.snapshot().tail(STATUS_LOG_TAIL))
}

/// Application overview including the run snapshot.
///
/// GET /api/status
pub async fn app_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let has_api_key = std::env::var("ETSY_API_KEY").is_ok_and(|key| !key.is_empty());
    let has_env_file = tokio::fs::try_exists(state.config.env_file_path())
        .await
        .unwrap_or(false);

    Json(AppStatusResponse {
        app_name: "listrun".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        configured: has_api_key && has_env_file,
        process: state.guard.snapshot().tail(STATUS_LOG_TAIL),
        output_dir: state.config.output_dir.display().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Recent log lines.
///
/// GET /api/logs
pub async fn logs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.guard.snapshot().tail(STATUS_LOG_TAIL);
    Json(LogsResponse {
        logs: status.logs,
        running: status.running,
    })
}
