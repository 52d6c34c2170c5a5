//! HTTP server.
//!
//! Provides endpoints for:
//! - Task control (`/start-task`, `/api/create-listings`, `/api/analyze-niche`)
//! - Status polling (`/status`, `/api/status`, `/api/logs`)
//! - Product config (`/api/config`)
//! - Market insights (`/api/niche-suggestions`, `/api/analyze-competitors`)
//! - Generated artifacts (`/api/output`)
//! - OAuth redirect (`/oauth/callback`)
//! - Index page (`/`) and health check (`/api/health`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The UI may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page
        .route("/", get(handlers::index))
        // Task control
        .route("/start-task", post(handlers::start_task))
        .route("/api/create-listings", post(handlers::create_listings))
        .route("/api/analyze-niche", post(handlers::analyze_niche))
        // Status
        .route("/status", get(handlers::run_status))
        .route("/api/status", get(handlers::app_status))
        .route("/api/logs", get(handlers::logs))
        // Config
        .route(
            "/api/config",
            get(handlers::get_config).post(handlers::save_config),
        )
        // Insights
        .route("/api/niche-suggestions", get(handlers::niche_suggestions))
        .route("/api/analyze-competitors", post(handlers::analyze_competitors))
        // Artifacts
        .route("/api/output", get(handlers::list_output))
        .route(
            "/api/output/:category/:filename",
            get(handlers::download_output),
        )
        // OAuth
        .route("/oauth/callback", get(handlers::oauth_callback))
        // Observability
        .route("/api/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
