//! Market insight handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::http::responses::{
    error_response, CompetitorRequest, CompetitorResponse, NicheSuggestionsResponse,
};
use crate::insights::{self, NICHE_SUGGESTIONS, NICHE_TIPS};

/// GET /api/niche-suggestions
pub async fn niche_suggestions() -> impl IntoResponse {
    Json(NicheSuggestionsResponse {
        niches: &NICHE_SUGGESTIONS,
        tips: &NICHE_TIPS,
    })
}

/// POST /api/analyze-competitors
pub async fn analyze_competitors(Json(req): Json<CompetitorRequest>) -> impl IntoResponse {
    let keyword = req.keyword.trim();
    if keyword.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Keyword is required");
    }

    Json(CompetitorResponse {
        keyword: keyword.to_string(),
        analysis: insights::analyze_competitors(keyword),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::body_json;

    #[tokio::test]
    async fn test_niche_suggestions() {
        let json = body_json(niche_suggestions().await.into_response()).await;

        assert_eq!(json["niches"].as_array().unwrap().len(), 8);
        assert_eq!(json["niches"][0]["keyword"], "funny cat");
        assert_eq!(json["tips"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_analyze_competitors_requires_keyword() {
        let req = CompetitorRequest {
            keyword: "  ".to_string(),
        };
        let response = analyze_competitors(Json(req)).await.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Keyword is required");
    }

    #[tokio::test]
    async fn test_analyze_competitors() {
        let req = CompetitorRequest {
            keyword: "dog lover".to_string(),
        };
        let response = analyze_competitors(Json(req)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["keyword"], "dog lover");
        assert_eq!(json["analysis"]["top_tags"][1], "dog");
        assert!(json["timestamp"].is_string());
    }
}
