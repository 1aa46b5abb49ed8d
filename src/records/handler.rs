//! HTTP handlers for the user record APIs
//!
//! One uniform CRUD surface per entity type, all served by the same four
//! handlers:
//! - GET    /api/user/:entity        filtered, paginated list
//! - POST   /api/user/:entity        create (validated)
//! - PUT    /api/user/:entity        partial update by id in the body
//! - DELETE /api/user/:entity?id=    delete by id

use crate::records::entities::RecordStores;
use crate::records::store::{capitalize, StoreError};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared state for record handlers
#[derive(Clone)]
pub struct RecordsState {
    pub stores: Arc<RecordStores>,
}

/// Create the record CRUD router covering all entity types
pub fn records_router(state: RecordsState) -> Router {
    Router::new()
        .route(
            "/api/user/:entity",
            get(list_records)
                .post(create_record)
                .put(update_record)
                .delete(delete_record),
        )
        .with_state(state)
}

fn unknown_entity(entity: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("Unknown entity type: {}", entity)})),
    )
}

fn store_error(err: StoreError) -> (StatusCode, Json<Value>) {
    let status = match err {
        StoreError::Validation(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(json!({"error": err.to_string()})))
}

/// Parse a page/limit query value leniently: absent or non-numeric values
/// fall back to the default instead of rejecting the request.
fn lenient_usize(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v >= 1)
        .unwrap_or(default)
}

/// GET /api/user/:entity
async fn list_records(
    State(state): State<RecordsState>,
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(store) = state.stores.get(&entity) else {
        return unknown_entity(&entity);
    };

    let page = lenient_usize(&params, "page", 1);
    let limit = lenient_usize(&params, "limit", 10);

    let result = store.list(&params, page, limit).await;
    (
        StatusCode::OK,
        Json(json!({
            store.schema().plural: result.items,
            "pagination": result.pagination,
        })),
    )
}

/// POST /api/user/:entity
async fn create_record(
    State(state): State<RecordsState>,
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let Some(store) = state.stores.get(&entity) else {
        return unknown_entity(&entity);
    };

    let Some(payload) = body.as_object().cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Request body must be a JSON object"})),
        );
    };

    match store.create(payload).await {
        Ok(record) => {
            let singular = store.schema().singular;
            (
                StatusCode::CREATED,
                Json(json!({
                    "message": format!("{} created successfully", capitalize(singular)),
                    singular: record,
                })),
            )
        }
        Err(err) => store_error(err),
    }
}

/// PUT /api/user/:entity
async fn update_record(
    State(state): State<RecordsState>,
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let Some(store) = state.stores.get(&entity) else {
        return unknown_entity(&entity);
    };
    let singular = store.schema().singular;

    let Some(payload) = body.as_object().cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Request body must be a JSON object"})),
        );
    };

    let Some(id) = payload.get("id").and_then(Value::as_str).map(String::from) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("{} ID is required", capitalize(singular))})),
        );
    };

    match store.update(&id, payload).await {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("{} updated successfully", capitalize(singular)),
                singular: record,
            })),
        ),
        Err(err) => store_error(err),
    }
}

/// DELETE /api/user/:entity?id=
async fn delete_record(
    State(state): State<RecordsState>,
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(store) = state.stores.get(&entity) else {
        return unknown_entity(&entity);
    };
    let singular = store.schema().singular;

    let Some(id) = params.get("id") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("{} ID is required", capitalize(singular))})),
        );
    };

    match store.delete(id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("{} deleted successfully", capitalize(singular)),
                singular: record,
            })),
        ),
        Err(err) => store_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_app() -> Router {
        let state = RecordsState {
            stores: Arc::new(RecordStores::empty()),
        };
        records_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn put_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_uri(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = make_app();
        let resp = get_uri(&app, "/api/user/charts").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["charts"].as_array().unwrap().len(), 0);
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 10);
        assert_eq!(json["pagination"]["total"], 0);
        assert_eq!(json["pagination"]["totalPages"], 0);
    }

    #[tokio::test]
    async fn test_unknown_entity() {
        let app = make_app();
        let resp = get_uri(&app, "/api/user/widgets").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_priority_lifecycle() {
        let app = make_app();

        // Create
        let resp = post_json(
            &app,
            "/api/user/priorities",
            json!({"title": "Fix bug", "priority": "high", "impact": "high", "status": "pending"}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        assert_eq!(created["message"], "Priority created successfully");
        let record = &created["priority"];
        let id = record["id"].as_str().unwrap().to_string();
        assert_eq!(record["created_at"], record["updated_at"]);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        // Update
        let resp = put_json(
            &app,
            "/api/user/priorities",
            json!({"id": id, "status": "completed"}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body_json(resp).await;
        assert_eq!(updated["priority"]["id"], id.as_str());
        assert_eq!(updated["priority"]["status"], "completed");
        let created_at = updated["priority"]["created_at"].as_str().unwrap();
        let updated_at = updated["priority"]["updated_at"].as_str().unwrap();
        assert!(updated_at > created_at);

        // Delete
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/user/priorities?id={}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // Subsequent list excludes it
        let resp = get_uri(&app, "/api/user/priorities").await;
        let json = body_json(resp).await;
        assert_eq!(json["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn test_create_missing_required_field() {
        let app = make_app();
        let resp = post_json(&app, "/api/user/charts", json!({"title": "Revenue"})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Missing required fields"));
    }

    #[tokio::test]
    async fn test_create_invalid_enum() {
        let app = make_app();
        let resp = post_json(
            &app,
            "/api/user/recommendations",
            json!({"text": "x", "urgency": "critical", "impact": "high"}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "urgency must be one of: high, medium, low");
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let app = make_app();
        let resp = put_json(&app, "/api/user/metrics", json!({"title": "DAU"})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Metric ID is required");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let app = make_app();
        let resp = put_json(
            &app,
            "/api/user/metrics",
            json!({"id": "metric-missing", "title": "DAU"}),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let app = make_app();
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/user/charts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let app = make_app();
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/user/charts?id=chart-missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_page_and_limit_default() {
        let app = make_app();
        let resp = get_uri(&app, "/api/user/metrics?page=abc&limit=xyz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 10);
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let app = make_app();

        for i in 0..3 {
            let resp = post_json(
                &app,
                "/api/user/charts",
                json!({
                    "title": format!("Chart {}", i),
                    "chartType": if i == 0 { "pie" } else { "bar" },
                    "numericValue": "count",
                    "metric": "orders"
                }),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = get_uri(&app, "/api/user/charts?chartType=bar&page=1&limit=1").await;
        let json = body_json(resp).await;
        assert_eq!(json["charts"].as_array().unwrap().len(), 1);
        assert_eq!(json["pagination"]["total"], 2);
        assert_eq!(json["pagination"]["totalPages"], 2);
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() {
        let app = make_app();
        let resp = post_json(
            &app,
            "/api/user/recommendations",
            json!({"text": "Tune cache", "urgency": "low", "impact": "low"}),
        )
        .await;
        let created = body_json(resp).await;
        let id = created["recommendation"]["id"].as_str().unwrap().to_string();

        let resp = put_json(
            &app,
            "/api/user/recommendations",
            json!({"id": id, "implemented": true}),
        )
        .await;
        let updated = body_json(resp).await;
        assert_eq!(updated["recommendation"]["id"], id.as_str());
        assert_eq!(updated["recommendation"]["implemented"], true);
    }
}
