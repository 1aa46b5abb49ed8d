//! Wire types for the chart data API

use crate::upstream::DataSource;
use serde::{Deserialize, Serialize};

/// Supported chart renderings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Pie,
    Bar,
}

impl ChartType {
    /// Parse a query value, treating anything unrecognized (or absent) as
    /// `bar`. The dashboard must always render something.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("pie") => Self::Pie,
            _ => Self::Bar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Bar => "bar",
        }
    }
}

/// One normalized data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub id: String,
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
        }
    }
}

/// Chart data response envelope
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    pub source: DataSource,
    pub data: Vec<ChartPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default() {
        assert_eq!(ChartType::parse_or_default(Some("pie")), ChartType::Pie);
        assert_eq!(ChartType::parse_or_default(Some("bar")), ChartType::Bar);
        assert_eq!(ChartType::parse_or_default(Some("bogus")), ChartType::Bar);
        assert_eq!(ChartType::parse_or_default(None), ChartType::Bar);
    }

    #[test]
    fn test_chart_response_serialization() {
        let resp = ChartResponse {
            success: true,
            source: DataSource::Fallback,
            data: vec![ChartPoint::new("Q1", "Q1 2024", 28000.0)],
        };

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"source\":\"fallback\""));
        assert!(json.contains("\"label\":\"Q1 2024\""));
        assert!(json.contains("\"value\":28000.0"));
    }
}
