//! Chart data service
//!
//! Fetches series data from the analytics backend and normalizes whatever
//! shape it returns into `ChartPoint`s. The backend has gone through several
//! payload revisions (`{id, label, value}`, `{label, value}`, `{name, value}`,
//! values as numeric strings), so normalization accepts all of them. Failures
//! of any kind are logged and answered with the fixed fallback series.

use crate::charts::types::{ChartPoint, ChartResponse, ChartType};
use crate::error::{Error, Result};
use crate::upstream::{DataSource, UpstreamClient};
use serde_json::Value;

/// Chart data service backed by the remote analytics backend
pub struct ChartDataService {
    upstream: UpstreamClient,
}

impl ChartDataService {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Fetch a chart series, substituting fallback data on any failure.
    ///
    /// Never errors: the response is tagged `live` or `fallback` instead.
    pub async fn series(
        &self,
        chart_type: ChartType,
        metric: &str,
        numeric_value: &str,
        period: &str,
    ) -> ChartResponse {
        match self.fetch_live(chart_type, metric, numeric_value, period).await {
            Ok(points) => ChartResponse {
                success: true,
                source: DataSource::Live,
                data: points,
            },
            Err(e) => {
                tracing::warn!(
                    chart_type = chart_type.as_str(),
                    metric,
                    "Chart backend unavailable, serving fallback series: {}",
                    e
                );
                ChartResponse {
                    success: true,
                    source: DataSource::Fallback,
                    data: fallback_series(chart_type),
                }
            }
        }
    }

    async fn fetch_live(
        &self,
        chart_type: ChartType,
        metric: &str,
        numeric_value: &str,
        period: &str,
    ) -> Result<Vec<ChartPoint>> {
        let path = format!("/api/charts/{}", chart_type.as_str());
        let body = self
            .upstream
            .get_json(
                &path,
                &[
                    ("metric", metric),
                    ("numericValue", numeric_value),
                    ("period", period),
                ],
            )
            .await?;

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(Error::Upstream(
                "backend reported an unsuccessful chart response".to_string(),
            ));
        }

        normalize_points(&body["data"])
    }
}

/// Normalize a backend series into `{id, label, value}` points.
///
/// Accepts `label` or `name` for the label (falling back to `id`), and
/// numbers or numeric strings for the value. A malformed item fails the
/// whole series so the caller falls back rather than rendering a partial
/// chart.
pub fn normalize_points(data: &Value) -> Result<Vec<ChartPoint>> {
    let items = data
        .as_array()
        .ok_or_else(|| Error::Upstream("chart payload is not an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            let label = item
                .get("label")
                .or_else(|| item.get("name"))
                .or_else(|| item.get("id"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::Upstream("chart point is missing a label".to_string())
                })?;

            let id = item
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or(label);

            let value = match item.get("value") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.replace(',', "").parse::<f64>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                Error::Upstream(format!("chart point '{}' has no numeric value", label))
            })?;

            Ok(ChartPoint::new(id, label, value))
        })
        .collect()
}

/// Fixed series served when the backend is unavailable
pub fn fallback_series(chart_type: ChartType) -> Vec<ChartPoint> {
    match chart_type {
        ChartType::Pie => vec![
            ChartPoint::new("Electronics", "Electronics", 45000.0),
            ChartPoint::new("Clothing", "Clothing", 32000.0),
            ChartPoint::new("Books", "Books", 18000.0),
            ChartPoint::new("Home", "Home & Garden", 25000.0),
        ],
        ChartType::Bar => vec![
            ChartPoint::new("Q1", "Q1 2024", 28000.0),
            ChartPoint::new("Q2", "Q2 2024", 31000.0),
            ChartPoint::new("Q3", "Q3 2024", 35000.0),
            ChartPoint::new("Q4", "Q4 2024", 29000.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use serde_json::json;

    fn unconfigured_service() -> ChartDataService {
        ChartDataService::new(UpstreamClient::new(&UpstreamConfig::default()))
    }

    #[tokio::test]
    async fn test_series_falls_back_without_backend() {
        let service = unconfigured_service();
        let resp = service.series(ChartType::Bar, "revenue", "sum", "30d").await;

        assert!(resp.success);
        assert_eq!(resp.source, DataSource::Fallback);
        assert_eq!(resp.data, fallback_series(ChartType::Bar));
    }

    #[tokio::test]
    async fn test_pie_fallback_differs_from_bar() {
        let service = unconfigured_service();
        let resp = service.series(ChartType::Pie, "revenue", "sum", "30d").await;
        assert_eq!(resp.data, fallback_series(ChartType::Pie));
        assert_ne!(fallback_series(ChartType::Pie), fallback_series(ChartType::Bar));
    }

    #[test]
    fn test_normalize_canonical_shape() {
        let data = json!([
            {"id": "q1", "label": "Q1", "value": 100},
            {"id": "q2", "label": "Q2", "value": 200.5}
        ]);
        let points = normalize_points(&data).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], ChartPoint::new("q1", "Q1", 100.0));
        assert_eq!(points[1].value, 200.5);
    }

    #[test]
    fn test_normalize_name_and_string_values() {
        let data = json!([
            {"name": "Electronics", "value": "45,000"},
            {"label": "Books", "value": "18000"}
        ]);
        let points = normalize_points(&data).unwrap();
        assert_eq!(points[0].id, "Electronics");
        assert_eq!(points[0].value, 45000.0);
        assert_eq!(points[1].id, "Books");
        assert_eq!(points[1].value, 18000.0);
    }

    #[test]
    fn test_normalize_label_falls_back_to_id() {
        let data = json!([{"id": "q1", "value": 10}]);
        let points = normalize_points(&data).unwrap();
        assert_eq!(points[0].label, "q1");
    }

    #[test]
    fn test_normalize_rejects_malformed_payloads() {
        assert!(normalize_points(&json!({"not": "an array"})).is_err());
        assert!(normalize_points(&json!([{"label": "Q1"}])).is_err());
        assert!(normalize_points(&json!([{"value": 10}])).is_err());
        assert!(normalize_points(&json!([{"label": "Q1", "value": "abc"}])).is_err());
    }

    #[test]
    fn test_normalize_empty_array() {
        let points = normalize_points(&json!([])).unwrap();
        assert!(points.is_empty());
    }
}
