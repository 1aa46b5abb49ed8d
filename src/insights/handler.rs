//! HTTP handlers for the overview APIs
//!
//! - GET /api/metrics
//! - GET /api/priorities
//! - GET /api/recommendations

use crate::insights::service::{InsightsService, OverviewKind};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Shared state for overview handlers
#[derive(Clone)]
pub struct InsightsState {
    pub service: Arc<InsightsService>,
}

/// Create the overview router
pub fn insights_router(state: InsightsState) -> Router {
    Router::new()
        .route("/api/metrics", get(get_metrics))
        .route("/api/priorities", get(get_priorities))
        .route("/api/recommendations", get(get_recommendations))
        .with_state(state)
}

async fn overview_response(state: &InsightsState, kind: OverviewKind) -> impl IntoResponse {
    let overview = state.service.overview(kind).await;
    Json(json!({
        "source": overview.source,
        kind.key(): overview.items,
    }))
}

/// GET /api/metrics
async fn get_metrics(State(state): State<InsightsState>) -> impl IntoResponse {
    overview_response(&state, OverviewKind::Metrics).await
}

/// GET /api/priorities
async fn get_priorities(State(state): State<InsightsState>) -> impl IntoResponse {
    overview_response(&state, OverviewKind::Priorities).await
}

/// GET /api/recommendations
async fn get_recommendations(State(state): State<InsightsState>) -> impl IntoResponse {
    overview_response(&state, OverviewKind::Recommendations).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::upstream::UpstreamClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn make_app() -> Router {
        let service = Arc::new(InsightsService::new(UpstreamClient::new(
            &UpstreamConfig::default(),
        )));
        insights_router(InsightsState { service })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_fallback() {
        let app = make_app();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["metrics"].as_array().unwrap().len(), 3);
        assert_eq!(json["metrics"][0]["name"], "NPS Score");
    }

    #[tokio::test]
    async fn test_priorities_fallback() {
        let app = make_app();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/priorities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["priorities"].as_array().unwrap().len(), 3);
        assert_eq!(json["priorities"][0]["status"], "in-progress");
    }

    #[tokio::test]
    async fn test_recommendations_fallback() {
        let app = make_app();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/recommendations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["recommendations"][0]["urgency"], "high");
    }
}
