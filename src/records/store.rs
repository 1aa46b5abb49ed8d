//! Generic in-memory record store
//!
//! One ordered collection per entity type, guarded by a `tokio::sync::RwLock`
//! so every CRUD operation is atomic with respect to the collection. Records
//! are plain JSON objects; the schema drives validation, defaults, and
//! filterable fields. Nothing is persisted; the collection lives and dies
//! with the process.

use crate::records::schema::EntitySchema;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

type JsonMap = Map<String, Value>;

/// Store-level error, mapped to an HTTP status by the handler layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad input: missing required field or enum value outside its set
    #[error("{0}")]
    Validation(String),

    /// Unknown record id on update or delete
    #[error("{0}")]
    NotFound(String),
}

/// Pagination metadata returned alongside every list window
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// A sliced list window plus its pagination metadata
#[derive(Debug)]
pub struct ListResult {
    pub items: Vec<JsonMap>,
    pub pagination: Pagination,
}

/// In-memory collection for one entity type
pub struct RecordStore {
    schema: &'static EntitySchema,
    records: RwLock<Vec<JsonMap>>,
}

impl RecordStore {
    /// Create an empty store for the given schema
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Create a store and run each seed payload through the create path.
    ///
    /// Seeds that fail validation are logged and skipped rather than
    /// aborting startup.
    pub async fn seeded(schema: &'static EntitySchema, seeds: Vec<JsonMap>) -> Self {
        let store = Self::new(schema);
        for seed in seeds {
            if let Err(e) = store.create(seed).await {
                tracing::warn!("Skipping invalid {} seed: {}", schema.singular, e);
            }
        }
        store
    }

    /// Schema backing this collection
    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// List records matching the filter conjunction, sliced to one page.
    ///
    /// Filters are equality checks over the schema's filterable fields; the
    /// value `"all"` relaxes a constraint. Boolean fields compare against
    /// `"true"`/`"false"`. Insertion order is preserved.
    pub async fn list(&self, filters: &HashMap<String, String>, page: usize, limit: usize) -> ListResult {
        let page = page.max(1);
        let limit = limit.max(1);

        let records = self.records.read().await;
        let filtered: Vec<&JsonMap> = records
            .iter()
            .filter(|record| {
                self.schema.filterable.iter().all(|field| {
                    match filters.get(*field) {
                        Some(wanted) => field_matches(record.get(*field), wanted),
                        None => true,
                    }
                })
            })
            .collect();

        let total = filtered.len();
        let total_pages = total.div_ceil(limit);
        let start = (page - 1) * limit;
        let items: Vec<JsonMap> = filtered
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        ListResult {
            items,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }

    /// Create a record from a payload.
    ///
    /// Validates required fields and enumerations, assigns a fresh id and
    /// both timestamps, fills declared defaults, and appends. On failure the
    /// collection is untouched.
    pub async fn create(&self, payload: JsonMap) -> Result<JsonMap, StoreError> {
        self.schema
            .validate_create(&payload)
            .map_err(StoreError::Validation)?;

        let mut record = payload;
        let now = now_rfc3339();
        record.insert(
            "id".to_string(),
            Value::String(format!("{}-{}", self.schema.id_prefix, uuid::Uuid::new_v4())),
        );
        record.insert("created_at".to_string(), Value::String(now.clone()));
        record.insert("updated_at".to_string(), Value::String(now));
        self.schema.apply_defaults(&mut record);

        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    /// Shallow-merge a partial payload over the record with the given id.
    ///
    /// Enumerated fields present in the payload are re-validated; `id` is
    /// forced back to the original even when the payload supplies another;
    /// `updated_at` is refreshed. The record keeps its position.
    pub async fn update(&self, id: &str, partial: JsonMap) -> Result<JsonMap, StoreError> {
        self.schema
            .validate_enums(&partial)
            .map_err(StoreError::Validation)?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "{} not found",
                    capitalize(self.schema.singular)
                ))
            })?;

        for (key, value) in partial {
            record.insert(key, value);
        }
        record.insert("id".to_string(), Value::String(id.to_string()));
        record.insert("updated_at".to_string(), Value::String(now_rfc3339()));

        Ok(record.clone())
    }

    /// Remove the record with the given id and return it
    pub async fn delete(&self, id: &str) -> Result<JsonMap, StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "{} not found",
                    capitalize(self.schema.singular)
                ))
            })?;

        Ok(records.remove(index))
    }
}

/// Equality filter for one field.
///
/// `"all"` relaxes string constraints; booleans compare against a parsed
/// `"true"`/`"false"` and treat anything else as no constraint.
fn field_matches(value: Option<&Value>, wanted: &str) -> bool {
    match value {
        Some(Value::Bool(b)) => wanted.parse::<bool>().map_or(true, |w| w == *b),
        Some(Value::String(s)) => wanted == "all" || s == wanted,
        _ => wanted == "all",
    }
}

/// Current UTC time as RFC 3339 with millisecond precision
fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Uppercase the first character ("chart" -> "Chart")
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
