//! Overview service
//!
//! Each overview kind maps to one backend endpoint returning
//! `{success: true, <key>: [...]}`. A failed or malformed backend response
//! is logged and replaced with the static fallback list; the caller can only
//! tell the difference through the `source` tag.

use crate::error::{Error, Result};
use crate::upstream::{DataSource, UpstreamClient};
use serde_json::{json, Value};

/// The three read-only overview feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewKind {
    Metrics,
    Priorities,
    Recommendations,
}

impl OverviewKind {
    /// Backend path and response key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Priorities => "priorities",
            Self::Recommendations => "recommendations",
        }
    }
}

/// One overview feed plus its source tag
#[derive(Debug)]
pub struct Overview {
    pub source: DataSource,
    pub items: Vec<Value>,
}

/// Overview service backed by the remote analytics backend
pub struct InsightsService {
    upstream: UpstreamClient,
}

impl InsightsService {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Fetch one overview feed, substituting fallback data on any failure
    pub async fn overview(&self, kind: OverviewKind) -> Overview {
        match self.fetch_live(kind).await {
            Ok(items) => Overview {
                source: DataSource::Live,
                items,
            },
            Err(e) => {
                tracing::warn!(
                    feed = kind.key(),
                    "Overview backend unavailable, serving fallback data: {}",
                    e
                );
                Overview {
                    source: DataSource::Fallback,
                    items: fallback_items(kind),
                }
            }
        }
    }

    async fn fetch_live(&self, kind: OverviewKind) -> Result<Vec<Value>> {
        let path = format!("/api/{}", kind.key());
        let body = self.upstream.get_json(&path, &[]).await?;

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            return Err(Error::Upstream(format!(
                "backend reported an unsuccessful {} response",
                kind.key()
            )));
        }

        body.get(kind.key())
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                Error::Upstream(format!("backend {} response has no list", kind.key()))
            })
    }
}

/// Static lists served when the backend is unavailable
pub fn fallback_items(kind: OverviewKind) -> Vec<Value> {
    match kind {
        OverviewKind::Metrics => vec![
            json!({"name": "NPS Score", "value": 72, "change": "+3", "trend": "up"}),
            json!({"name": "Customer Sentiment", "value": "86%", "change": "+2%", "trend": "up"}),
            json!({"name": "Response Rate", "value": "94%", "change": "-1%", "trend": "down"}),
        ],
        OverviewKind::Priorities => vec![
            json!({
                "id": "task1",
                "task": "Fix critical bug in payment gateway",
                "deadline": "Today",
                "status": "in-progress"
            }),
            json!({
                "id": "task2",
                "task": "Respond to enterprise client inquiry",
                "deadline": "Today",
                "status": "pending"
            }),
            json!({
                "id": "task3",
                "task": "Review Q2 performance metrics",
                "deadline": "Tomorrow",
                "status": "pending"
            }),
        ],
        OverviewKind::Recommendations => vec![
            json!({
                "id": "rec1",
                "text": "Address negative feedback about checkout process - 23% increase in cart abandonment",
                "urgency": "high",
                "impact": "high"
            }),
            json!({
                "id": "rec2",
                "text": "Follow up with top 5 customers who reported issues last week",
                "urgency": "medium",
                "impact": "high"
            }),
            json!({
                "id": "rec3",
                "text": "Review pricing strategy for enterprise segment - potential 15% revenue increase",
                "urgency": "medium",
                "impact": "high"
            }),
        ],
    }
}
