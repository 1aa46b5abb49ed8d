//! HTTP handler for the chart data API
//!
//! - GET /api/charts?chartType=&metric=&numericValue=&period=

use crate::charts::service::ChartDataService;
use crate::charts::types::ChartType;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for chart handlers
#[derive(Clone)]
pub struct ChartsState {
    pub service: Arc<ChartDataService>,
}

/// Create the chart data router
pub fn charts_router(state: ChartsState) -> Router {
    Router::new()
        .route("/api/charts", get(get_chart_data))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    #[serde(rename = "chartType")]
    chart_type: Option<String>,
    metric: Option<String>,
    #[serde(rename = "numericValue")]
    numeric_value: Option<String>,
    period: Option<String>,
}

/// GET /api/charts
async fn get_chart_data(
    State(state): State<ChartsState>,
    Query(params): Query<ChartQuery>,
) -> impl IntoResponse {
    let chart_type = ChartType::parse_or_default(params.chart_type.as_deref());
    let metric = params.metric.as_deref().unwrap_or("revenue");
    let numeric_value = params.numeric_value.as_deref().unwrap_or("count");
    let period = params.period.as_deref().unwrap_or("30d");

    let response = state
        .service
        .series(chart_type, metric, numeric_value, period)
        .await;
    Json(response)
}
