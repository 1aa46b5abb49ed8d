//! Sample content generator
//!
//! Live generation goes through the configured chat-completions API with a
//! type-specific prompt that demands a bare JSON reply. Anything that goes
//! wrong (no API key, HTTP failure, unparseable model output) is logged and
//! answered from the local randomized sample pools instead.

use crate::config::AiConfig;
use crate::error::{Error, Result};
use crate::upstream::DataSource;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};
use std::time::Duration;

/// What kind of sample content to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Metric,
    Priority,
    Recommendation,
    ChartLabels,
}

impl SampleKind {
    /// Parse the request's `type` field
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "metric" => Some(Self::Metric),
            "priority" => Some(Self::Priority),
            "recommendation" => Some(Self::Recommendation),
            "chart_labels" => Some(Self::ChartLabels),
            _ => None,
        }
    }
}

/// A generated sample plus its source tag
#[derive(Debug)]
pub struct Sample {
    pub source: DataSource,
    pub data: Value,
}

/// Sample generator backed by a chat-completions API
pub struct SampleGenerator {
    config: AiConfig,
    client: reqwest::Client,
}

impl SampleGenerator {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Generate sample content, substituting a randomized local sample on
    /// any failure
    pub async fn generate(&self, kind: SampleKind, context: &Value) -> Sample {
        match self.complete(kind, context).await {
            Ok(data) => Sample {
                source: DataSource::Live,
                data,
            },
            Err(e) => {
                tracing::warn!(
                    "Completion API unavailable, serving randomized sample: {}",
                    e
                );
                Sample {
                    source: DataSource::Fallback,
                    data: fallback_sample(kind, context),
                }
            }
        }
    }

    async fn complete(&self, kind: SampleKind, context: &Value) -> Result<Value> {
        let api_key = self
            .config
            .resolved_api_key()
            .ok_or_else(|| Error::Upstream("no completion API key configured".to_string()))?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a business analytics AI that generates realistic \
                                dashboard content. Always respond with valid JSON only, \
                                no additional text."
                },
                {"role": "user", "content": prompt_for(kind, context)}
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| Error::Upstream("completion response has no content".to_string()))?;

        serde_json::from_str(content.trim())
            .map_err(|e| Error::Upstream(format!("completion output is not valid JSON: {}", e)))
    }
}

/// Build the type-specific prompt
fn prompt_for(kind: SampleKind, context: &Value) -> String {
    match kind {
        SampleKind::Metric => r#"Generate a realistic business metric for a dashboard. Return ONLY a JSON object with this exact structure:
{
  "name": "metric name (max 20 chars)",
  "value": "value with unit (max 20 chars, e.g., 85%, 1.2s, 42)",
  "change": "change with +/- (max 20 chars, e.g., +3%, -0.1s)",
  "trend": "up, down, or neutral"
}

Keep ALL fields under 20 characters. Focus on short metric names like "CTR", "CAC", "MRR", "DAU"."#
            .to_string(),
        SampleKind::Priority => r#"Generate a realistic business task/priority for a dashboard. Return ONLY a JSON object with this exact structure:
{
  "task": "task description (max 30 chars)",
  "deadline": "deadline (max 30 chars, e.g., Today, Dec 15)",
  "status": "pending, in-progress, or completed"
}

Keep ALL fields under 30 characters. Use concise task names like "Fix critical login bug", "Update payment API", "Review Q4 metrics"."#
            .to_string(),
        SampleKind::Recommendation => r#"Generate a realistic AI business recommendation for a dashboard. Return ONLY a JSON object with this exact structure:
{
  "text": "recommendation text (max 30 chars)",
  "urgency": "high, medium, or low",
  "impact": "high, medium, or low"
}

Keep text field under 30 characters. Use concise recommendations like "Optimize database queries", "Add A/B testing framework", "Fix mobile UI responsiveness"."#
            .to_string(),
        SampleKind::ChartLabels => {
            let metric = context["metric"].as_str().unwrap_or("revenue");
            let numeric_value = context["numericValue"].as_str().unwrap_or("count");
            let chart_type = context["chartType"].as_str().unwrap_or("bar");
            let count = if chart_type == "pie" { 5 } else { 7 };
            format!(
                r#"Generate contextually appropriate chart labels for a {chart_type} chart showing {metric} data with {numeric_value} values. Return ONLY a JSON array of objects with this exact structure:
[
  {{"id": "label-1", "label": "Descriptive Label 1", "value": 100}},
  {{"id": "label-2", "label": "Descriptive Label 2", "value": 85}}
]

Generate {count} realistic labels that make sense for {metric}. Each label should be descriptive and specific to the metric type. Values should be realistic numbers for {numeric_value} of {metric}."#
            )
        }
    }
}

/// Randomized local sample served when the completion API is unavailable
pub fn fallback_sample(kind: SampleKind, context: &Value) -> Value {
    let mut rng = rand::thread_rng();
    match kind {
        SampleKind::Metric => {
            let names = ["CTR", "CAC", "MRR", "DAU", "NPS", "Churn Rate"];
            let trends = ["up", "down", "neutral"];
            let value = rng.gen_range(10..95);
            let change = rng.gen_range(-10..10);
            json!({
                "name": names.choose(&mut rng).copied().unwrap_or("CTR"),
                "value": format!("{}%", value),
                "change": format!("{}{}%", if change >= 0 { "+" } else { "" }, change),
                "trend": trends.choose(&mut rng).copied().unwrap_or("neutral"),
            })
        }
        SampleKind::Priority => {
            let tasks = [
                "Fix critical login bug",
                "Update payment API",
                "Review Q4 metrics",
                "Ship onboarding emails",
                "Audit checkout funnel",
            ];
            let deadlines = ["Today", "Tomorrow", "This week", "Dec 15"];
            let statuses = ["pending", "in-progress", "completed"];
            json!({
                "task": tasks.choose(&mut rng).copied().unwrap_or("Review Q4 metrics"),
                "deadline": deadlines.choose(&mut rng).copied().unwrap_or("Today"),
                "status": statuses.choose(&mut rng).copied().unwrap_or("pending"),
            })
        }
        SampleKind::Recommendation => {
            let texts = [
                "Optimize database queries",
                "Add A/B testing framework",
                "Fix mobile UI responsiveness",
                "Bundle slow-moving inventory",
                "Tighten retry budgets",
            ];
            let levels = ["high", "medium", "low"];
            json!({
                "text": texts.choose(&mut rng).copied().unwrap_or("Optimize database queries"),
                "urgency": levels.choose(&mut rng).copied().unwrap_or("medium"),
                "impact": levels.choose(&mut rng).copied().unwrap_or("medium"),
            })
        }
        SampleKind::ChartLabels => {
            let metric = context["metric"].as_str().unwrap_or("revenue");
            let chart_type = context["chartType"].as_str().unwrap_or("bar");
            let count = if chart_type == "pie" { 5 } else { 7 };
            let labels: Vec<Value> = (1..=count)
                .map(|i| {
                    json!({
                        "id": format!("label-{}", i),
                        "label": format!("{} segment {}", metric, i),
                        "value": rng.gen_range(50..150),
                    })
                })
                .collect();
            Value::Array(labels)
        }
    }
}
