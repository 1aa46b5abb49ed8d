//! The four dashboard entity types: schemas and seed data
//!
//! Schemas mirror what the dashboard UI submits through its modal forms.
//! Classification fields (timeframe, channel, topic) exist on every entity
//! and are used only for filtering.

use crate::records::schema::{DefaultValue, EntitySchema, FieldSpec};
use crate::records::store::RecordStore;
use serde_json::{json, Map, Value};
use std::sync::Arc;

const LEVELS: &[&str] = &["high", "medium", "low"];

/// User-configured chart definitions
pub static CHART_SCHEMA: EntitySchema = EntitySchema {
    singular: "chart",
    plural: "charts",
    id_prefix: "chart",
    required: &[
        FieldSpec {
            name: "title",
            allowed: None,
        },
        FieldSpec {
            name: "chartType",
            allowed: Some(&["pie", "bar"]),
        },
        FieldSpec {
            name: "numericValue",
            allowed: Some(&["count", "average", "sum", "median"]),
        },
        FieldSpec {
            name: "metric",
            allowed: Some(&["revenue", "daily_users", "orders", "user_segments", "category"]),
        },
    ],
    optional: &[],
    defaults: &[
        ("timeframe", DefaultValue::Str("month")),
        ("channel", DefaultValue::Str("all")),
        ("topic", DefaultValue::Str("all")),
    ],
    filterable: &["timeframe", "channel", "topic", "chartType"],
};

/// User-defined key metrics
pub static METRIC_SCHEMA: EntitySchema = EntitySchema {
    singular: "metric",
    plural: "metrics",
    id_prefix: "metric",
    required: &[
        FieldSpec {
            name: "title",
            allowed: None,
        },
        FieldSpec {
            name: "value",
            allowed: None,
        },
    ],
    optional: &[
        FieldSpec {
            name: "changeType",
            allowed: Some(&["positive", "negative", "neutral"]),
        },
        FieldSpec {
            name: "trend",
            allowed: Some(&["up", "down", "neutral"]),
        },
    ],
    defaults: &[
        ("changeType", DefaultValue::Str("neutral")),
        ("trend", DefaultValue::Str("neutral")),
        ("timeframe", DefaultValue::Str("month")),
        ("channel", DefaultValue::Str("all")),
        ("topic", DefaultValue::Str("all")),
    ],
    filterable: &["timeframe", "channel", "topic"],
};

/// Task priorities
pub static PRIORITY_SCHEMA: EntitySchema = EntitySchema {
    singular: "priority",
    plural: "priorities",
    id_prefix: "priority",
    required: &[
        FieldSpec {
            name: "title",
            allowed: None,
        },
        FieldSpec {
            name: "priority",
            allowed: Some(LEVELS),
        },
        FieldSpec {
            name: "impact",
            allowed: Some(LEVELS),
        },
        FieldSpec {
            name: "status",
            allowed: Some(&["pending", "in-progress", "completed", "planned"]),
        },
    ],
    optional: &[],
    defaults: &[
        ("timeframe", DefaultValue::Str("month")),
        ("channel", DefaultValue::Str("all")),
        ("topic", DefaultValue::Str("all")),
    ],
    filterable: &["timeframe", "channel", "topic", "status", "priority", "impact"],
};

/// Saved recommendations (AI-generated or user-created)
pub static RECOMMENDATION_SCHEMA: EntitySchema = EntitySchema {
    singular: "recommendation",
    plural: "recommendations",
    id_prefix: "rec",
    required: &[
        FieldSpec {
            name: "text",
            allowed: None,
        },
        FieldSpec {
            name: "urgency",
            allowed: Some(LEVELS),
        },
        FieldSpec {
            name: "impact",
            allowed: Some(LEVELS),
        },
    ],
    optional: &[FieldSpec {
        name: "category",
        allowed: Some(&["ai-generated", "user-created", "system"]),
    }],
    defaults: &[
        ("category", DefaultValue::Str("user-created")),
        ("implemented", DefaultValue::Bool(false)),
        ("timeframe", DefaultValue::Str("month")),
        ("channel", DefaultValue::Str("all")),
        ("topic", DefaultValue::Str("all")),
    ],
    filterable: &[
        "timeframe",
        "channel",
        "topic",
        "urgency",
        "impact",
        "category",
        "implemented",
    ],
};

/// The four per-entity collections, constructed once at startup and shared
/// with the record handlers
pub struct RecordStores {
    pub charts: Arc<RecordStore>,
    pub metrics: Arc<RecordStore>,
    pub priorities: Arc<RecordStore>,
    pub recommendations: Arc<RecordStore>,
}

impl RecordStores {
    /// Empty collections, used by tests
    pub fn empty() -> Self {
        Self {
            charts: Arc::new(RecordStore::new(&CHART_SCHEMA)),
            metrics: Arc::new(RecordStore::new(&METRIC_SCHEMA)),
            priorities: Arc::new(RecordStore::new(&PRIORITY_SCHEMA)),
            recommendations: Arc::new(RecordStore::new(&RECOMMENDATION_SCHEMA)),
        }
    }

    /// Collections pre-populated with the starter records shown on a fresh
    /// dashboard
    pub async fn seeded() -> Self {
        Self {
            charts: Arc::new(RecordStore::seeded(&CHART_SCHEMA, chart_seeds()).await),
            metrics: Arc::new(RecordStore::seeded(&METRIC_SCHEMA, metric_seeds()).await),
            priorities: Arc::new(RecordStore::seeded(&PRIORITY_SCHEMA, priority_seeds()).await),
            recommendations: Arc::new(
                RecordStore::seeded(&RECOMMENDATION_SCHEMA, recommendation_seeds()).await,
            ),
        }
    }

    /// Look up a store by its plural route segment
    pub fn get(&self, entity: &str) -> Option<&Arc<RecordStore>> {
        match entity {
            "charts" => Some(&self.charts),
            "metrics" => Some(&self.metrics),
            "priorities" => Some(&self.priorities),
            "recommendations" => Some(&self.recommendations),
            _ => None,
        }
    }
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn chart_seeds() -> Vec<Map<String, Value>> {
    vec![
        obj(json!({
            "title": "Revenue by Channel",
            "chartType": "bar",
            "numericValue": "sum",
            "metric": "revenue",
            "timeframe": "month",
            "topic": "sales"
        })),
        obj(json!({
            "title": "User Segments Distribution",
            "chartType": "pie",
            "numericValue": "count",
            "metric": "user_segments",
            "timeframe": "quarter",
            "topic": "marketing"
        })),
    ]
}

fn metric_seeds() -> Vec<Map<String, Value>> {
    vec![
        obj(json!({
            "title": "Custom Revenue Target",
            "value": "$125,430",
            "change": 12.5,
            "changeType": "positive",
            "trend": "up",
            "timeframe": "month",
            "channel": "web",
            "topic": "sales",
            "unit": "USD",
            "target": 150000
        })),
        obj(json!({
            "title": "Email Campaign CTR",
            "value": "3.2%",
            "change": -0.8,
            "changeType": "negative",
            "trend": "down",
            "timeframe": "week",
            "channel": "email",
            "topic": "marketing",
            "unit": "percentage",
            "target": 4.0
        })),
    ]
}

fn priority_seeds() -> Vec<Map<String, Value>> {
    vec![
        obj(json!({
            "title": "Optimize mobile checkout flow",
            "description": "Reduce cart abandonment by improving the mobile checkout experience",
            "deadline": "2025-08-15",
            "priority": "high",
            "impact": "high",
            "status": "in-progress",
            "timeframe": "quarter",
            "channel": "mobile",
            "topic": "product",
            "assignee": "Product Team"
        })),
        obj(json!({
            "title": "Launch email automation campaign",
            "description": "Set up automated email sequences for new user onboarding",
            "deadline": "2025-07-30",
            "priority": "medium",
            "impact": "medium",
            "status": "planned",
            "timeframe": "month",
            "channel": "email",
            "topic": "marketing",
            "assignee": "Marketing Team"
        })),
    ]
}

fn recommendation_seeds() -> Vec<Map<String, Value>> {
    vec![
        obj(json!({
            "text": "Implement A/B testing for the new landing page design to optimize conversion rates",
            "urgency": "high",
            "impact": "high",
            "timeframe": "month",
            "channel": "web",
            "topic": "marketing",
            "category": "ai-generated"
        })),
        obj(json!({
            "text": "Add push notifications for abandoned cart recovery to increase mobile sales",
            "urgency": "medium",
            "impact": "high",
            "timeframe": "quarter",
            "channel": "mobile",
            "topic": "product",
            "category": "user-created"
        })),
    ]
}
