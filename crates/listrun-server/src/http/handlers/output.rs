//! Generated artifact handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{info, warn};

use crate::http::responses::error_response;
use crate::output::{list_outputs, resolve_download};
use crate::state::AppState;

/// GET /api/output
pub async fn list_output(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(list_outputs(&state.config.output_dir).await)
}

/// Download one artifact as an attachment.
///
/// GET /api/output/:category/:filename
pub async fn download_output(
    State(state): State<Arc<AppState>>,
    Path((category, filename)): Path<(String, String)>,
) -> impl IntoResponse {
    let Some(path) = resolve_download(&state.config.output_dir, &category, &filename) else {
        warn!(category = %category, filename = %filename, "Rejected download path");
        return error_response(StatusCode::NOT_FOUND, "File not found");
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            info!(path = %path.display(), bytes = bytes.len(), "Serving artifact");
            let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
            (
                [
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Artifact not readable");
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, TestApp};

    fn path(category: &str, filename: &str) -> Path<(String, String)> {
        Path((category.to_string(), filename.to_string()))
    }

    #[tokio::test]
    async fn test_list_output() {
        let app = TestApp::new();
        let designs = app.state.config.output_dir.join("designs");
        std::fs::create_dir_all(&designs).unwrap();
        std::fs::write(designs.join("cat.png"), b"png").unwrap();

        let json = body_json(list_output(State(app.state.clone())).await.into_response()).await;
        assert_eq!(json["designs"], serde_json::json!(["cat.png"]));
        assert_eq!(json["videos"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_download_output() {
        let app = TestApp::new();
        let mockups = app.state.config.output_dir.join("mockups");
        std::fs::create_dir_all(&mockups).unwrap();
        std::fs::write(mockups.join("shirt.jpg"), b"jpeg-bytes").unwrap();

        let response = download_output(State(app.state.clone()), path("mockups", "shirt.jpg"))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"shirt.jpg\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_download_missing_and_traversal() {
        let app = TestApp::new();
        std::fs::write(app.state.config.env_file_path(), "ETSY_API_KEY=secret").unwrap();

        for (category, filename) in [
            ("designs", "absent.png"),
            ("config", ".env"),
            ("designs", "../../config/.env"),
        ] {
            let response = download_output(State(app.state.clone()), path(category, filename))
                .await
                .into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{category}/{filename}");
        }
    }
}
