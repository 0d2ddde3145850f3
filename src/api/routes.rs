//! API route definitions
//!
//! - /api/v1/health - Liveness and advisory backend status
//! - /api/v1/estimate/* - Stateless face, blast, and operation estimates
//! - /api/v1/session - Shared presentation state and its actions
//! - /api/v1/advisory/* - Narrative analysis and chat
//! - /api/v1/report - Text report download / export
//! - /api/v1/config - Effective configuration

use axum::routing::{get, post};
use axum::Router;

use super::envelope::ApiError;
use super::handlers::{self, DashboardState};

/// Create all API routes
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        // Estimation engine
        .route("/estimate/face", post(handlers::estimate_face))
        .route("/estimate/blast", post(handlers::estimate_blast))
        .route("/estimate/operation", post(handlers::estimate_operation))
        // Session
        .route("/session", get(handlers::get_session))
        .route("/session/actions", post(handlers::apply_action))
        // Advisory
        .route("/advisory/analysis", post(handlers::request_analysis))
        .route("/advisory/chat", post(handlers::send_chat))
        // Report
        .route(
            "/report",
            get(handlers::download_report).post(handlers::export_report),
        )
        .route("/config", get(handlers::get_config))
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, SubmineConfig};
    use crate::llm::AdvisoryService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_state() -> DashboardState {
        DashboardState::new(SubmineConfig::default(), AdvisoryService::disabled(Language::Es))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = api_routes(create_test_state());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["data"]["status"], "ok");
        assert!(v["data"]["advisory_backend"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_path_is_enveloped_404() {
        let app = api_routes(create_test_state());
        let resp = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_face_estimate_accepts_form_strings() {
        let app = api_routes(create_test_state());
        let resp = app
            .oneshot(
                Request::post("/estimate/face")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"width":"3.5m","height":3.5,"advance":"3","rock_class":"Media"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let v = body_json(resp).await;
        assert_eq!(v["data"]["result"]["hole_count"], 15);
        assert_eq!(v["data"]["inputs"]["width"], 3.5);
    }
}
