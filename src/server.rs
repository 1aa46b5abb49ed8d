//! HTTP server assembly
//!
//! Builds the full application router from configuration. All shared state
//! (record stores, upstream clients) is constructed here once and injected
//! into the domain routers; nothing is process-global.

use crate::ai::{ai_router, AiState, SampleGenerator};
use crate::charts::{charts_router, ChartDataService, ChartsState};
use crate::config::PulseboardConfig;
use crate::error::Result;
use crate::insights::{insights_router, InsightsService, InsightsState};
use crate::records::{records_router, RecordStores, RecordsState};
use crate::upstream::UpstreamClient;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router with seeded record stores
pub async fn build_app(config: &PulseboardConfig) -> Router {
    let stores = Arc::new(RecordStores::seeded().await);
    let upstream = UpstreamClient::new(&config.upstream);

    Router::new()
        .route("/health", get(health_check))
        .merge(records_router(RecordsState { stores }))
        .merge(charts_router(ChartsState {
            service: Arc::new(ChartDataService::new(upstream.clone())),
        }))
        .merge(insights_router(InsightsState {
            service: Arc::new(InsightsService::new(upstream)),
        }))
        .merge(ai_router(AiState {
            generator: Arc::new(SampleGenerator::new(config.ai.clone())),
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Run the server until a shutdown signal arrives
pub async fn run(config: PulseboardConfig) -> Result<()> {
    let app = build_app(&config).await;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Pulseboard API listening on {}", addr);
    if config.upstream.base_url.is_none() {
        tracing::warn!("No analytics backend configured; chart and overview endpoints will serve fallback data");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Pulseboard API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
