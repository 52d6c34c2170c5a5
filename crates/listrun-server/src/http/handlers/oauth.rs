//! OAuth redirect handler.

use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};

use crate::http::responses::{error_response, OAuthCallbackQuery, OAuthCodeResponse};

/// Echo the authorization code delivered by the provider so the operator can
/// exchange it for a token.
///
/// GET /oauth/callback
pub async fn oauth_callback(Query(query): Query<OAuthCallbackQuery>) -> impl IntoResponse {
    match query.code {
        Some(code) if !code.is_empty() => {
            info!(state = ?query.state, "OAuth authorization code received");
            Json(OAuthCodeResponse {
                code,
                state: query.state,
            })
            .into_response()
        }
        _ => {
            let error = match (query.error, query.error_description) {
                (Some(error), Some(description)) => format!("{error}: {description}"),
                (Some(error), None) => error,
                (None, _) => "Missing authorization code".to_string(),
            };
            warn!(error = %error, "OAuth callback without code");
            error_response(StatusCode::BAD_REQUEST, error)
        }
    }
}
