//! Task control handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use listrun_core::TaskRequest;
use tracing::{error, info};

use crate::http::responses::{
    core_error_response, error_response, ListingRequest, NicheRequest, StartedResponse,
};
use crate::state::{AppState, StartError};

fn accepted(message: Option<String>) -> axum::response::Response {
    (StatusCode::ACCEPTED, Json(StartedResponse::new(message))).into_response()
}

/// Start an arbitrary task.
///
/// POST /start-task
pub async fn start_task(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TaskRequest>,
) -> impl IntoResponse {
    match state.start_task(request) {
        Ok(()) => accepted(None),
        Err(e) => core_error_response(&e),
    }
}

/// Save the listing config and start a `create_listings` run.
///
/// POST /api/create-listings
pub async fn create_listings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListingRequest>,
) -> impl IntoResponse {
    let config = req.to_product_config();
    let request = match &config {
        serde_json::Value::Object(params) => TaskRequest {
            task_type: "create_listings".to_string(),
            params: params.clone(),
        },
        _ => TaskRequest::new("create_listings"),
    };

    match state.start_task_with_config(request, &config).await {
        Ok(()) => {
            info!(niche = %req.niche, keyword = %req.keyword, "Listing run started");
            accepted(Some("Started creating 1 listing...".to_string()))
        }
        Err(StartError::Core(e)) => core_error_response(&e),
        Err(e @ StartError::Store(_)) => {
            error!(error = %e, "Failed to save listing config");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Start an `analyze_niche` run.
///
/// POST /api/analyze-niche
pub async fn analyze_niche(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NicheRequest>,
) -> impl IntoResponse {
    let request = TaskRequest::new("analyze_niche").with_param("niche", req.niche.as_str());

    match state.start_task(request) {
        Ok(()) => accepted(Some(format!("Niche analysis for '{}' started...", req.niche))),
        Err(e) => core_error_response(&e),
    }
}
