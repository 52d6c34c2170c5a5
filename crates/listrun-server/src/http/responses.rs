//! HTTP request and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listrun_core::{CoreError, RunStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::insights::{CompetitorAnalysis, NicheSuggestion};

/// Number of log lines returned to pollers.
pub const STATUS_LOG_TAIL: usize = 50;

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build a JSON error response.
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Map a core error to its HTTP status: conflicts are 409, bad input 400.
pub fn core_error_response(err: &CoreError) -> Response {
    let status = match err {
        CoreError::AlreadyRunning { .. } => StatusCode::CONFLICT,
        CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    error_response(status, err.to_string())
}

// ============================================================================
// Task types
// ============================================================================

/// Response for an accepted task.
#[derive(Debug, Serialize)]
pub struct StartedResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StartedResponse {
    pub fn new(message: Option<String>) -> Self {
        Self {
            status: "started",
            message,
        }
    }
}

/// Request body for `POST /api/create-listings`.
#[derive(Debug, Deserialize)]
pub struct ListingRequest {
    #[serde(default = "default_niche")]
    pub niche: String,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ListingRequest {
    /// Product config persisted for the automation script. Always one
    /// listing per run.
    pub fn to_product_config(&self) -> Value {
        serde_json::json!({
            "niche": self.niche,
            "keyword": self.keyword,
            "description": self.description,
            "title": self.title,
            "tags": self.tags,
            "listings_count": 1
        })
    }
}

/// Request body for `POST /api/analyze-niche`.
#[derive(Debug, Deserialize)]
pub struct NicheRequest {
    #[serde(default = "default_niche")]
    pub niche: String,
}

fn default_niche() -> String {
    "funny cat".to_string()
}

// ============================================================================
// Status types
// ============================================================================

/// Response for `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct AppStatusResponse {
    pub app_name: String,
    pub version: &'static str,
    pub configured: bool,
    pub process: RunStatus,
    pub output_dir: String,
    pub timestamp: String,
}

/// Response for `GET /api/logs`.
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
    pub running: bool,
}

// ============================================================================
// Config types
// ============================================================================

/// Response for a saved config.
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub status: &'static str,
    pub message: &'static str,
}

// ============================================================================
// Insight types
// ============================================================================

/// Response for `GET /api/niche-suggestions`.
#[derive(Debug, Serialize)]
pub struct NicheSuggestionsResponse {
    pub niches: &'static [NicheSuggestion],
    pub tips: &'static [&'static str],
}

/// Request body for `POST /api/analyze-competitors`.
#[derive(Debug, Deserialize)]
pub struct CompetitorRequest {
    #[serde(default)]
    pub keyword: String,
}

/// Response for `POST /api/analyze-competitors`.
#[derive(Debug, Serialize)]
pub struct CompetitorResponse {
    pub keyword: String,
    pub analysis: CompetitorAnalysis,
    pub timestamp: String,
}

// ============================================================================
// OAuth types
// ============================================================================

/// Query parameters delivered to the OAuth redirect URL.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Authorization code echoed back to the operator.
#[derive(Debug, Serialize)]
pub struct OAuthCodeResponse {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
