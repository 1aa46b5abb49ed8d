//! HTTP handler for the sample generation API
//!
//! - POST /api/ai-generate  {type, context?}

use crate::ai::generator::{SampleGenerator, SampleKind};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared state for sample generation handlers
#[derive(Clone)]
pub struct AiState {
    pub generator: Arc<SampleGenerator>,
}

/// Create the sample generation router
pub fn ai_router(state: AiState) -> Router {
    Router::new()
        .route("/api/ai-generate", post(generate_sample))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    context: Value,
}

/// POST /api/ai-generate
async fn generate_sample(
    State(state): State<AiState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let Some(kind) = SampleKind::parse(&request.kind) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Invalid generation type: {}", request.kind)})),
        );
    };

    let sample = state.generator.generate(kind, &request.context).await;
    (
        StatusCode::OK,
        Json(json!({"source": sample.source, "data": sample.data})),
    )
}
