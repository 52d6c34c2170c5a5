//! Product config handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use tracing::{error, info};

use crate::http::responses::{error_response, SavedResponse};
use crate::state::AppState;

/// Current product config, or the defaults if none has been saved.
///
/// GET /api/config
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.load().await {
        Ok(config) => Json(config).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load product config");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Replace the product config.
///
/// POST /api/config
pub async fn save_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<Value>,
) -> impl IntoResponse {
    if !config.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "Config must be a JSON object");
    }

    match state.store.save(&config).await {
        Ok(()) => {
            info!("Product config saved");
            Json(SavedResponse {
                status: "success",
                message: "Configuration saved",
            })
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to save product config");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
