//! Entity schemas for the record store
//!
//! A schema declares, per entity type, which fields are required, which are
//! constrained to a closed enumeration, which default values are filled in
//! at creation time, and which fields can be used as list filters. The four
//! entity collections share one store implementation parameterized by these
//! tables.

use serde_json::{Map, Value};

/// A field declaration, optionally constrained to a closed set of values
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name of the field
    pub name: &'static str,

    /// Allowed values, when the field is enumerated
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldSpec {
    /// Check a value against the enumeration, if any.
    ///
    /// Non-string values never match an enumeration; fields without an
    /// enumeration accept anything.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.allowed {
            Some(allowed) => value
                .as_str()
                .map(|s| allowed.contains(&s))
                .unwrap_or(false),
            None => true,
        }
    }
}

/// Default value filled in for an omitted optional field
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.to_string()),
            Self::Bool(b) => Value::Bool(b),
        }
    }
}

/// Schema for one entity type
#[derive(Debug)]
pub struct EntitySchema {
    /// Singular entity name, used in response envelopes and messages
    pub singular: &'static str,

    /// Plural entity name, used as the list response key and route segment
    pub plural: &'static str,

    /// Prefix for store-assigned record ids
    pub id_prefix: &'static str,

    /// Fields that must be present and non-empty on create
    pub required: &'static [FieldSpec],

    /// Optional fields that carry an enumeration constraint
    pub optional: &'static [FieldSpec],

    /// Defaults filled in for omitted fields at creation time
    pub defaults: &'static [(&'static str, DefaultValue)],

    /// Fields usable as equality filters in list queries
    pub filterable: &'static [&'static str],
}

impl EntitySchema {
    /// Look up the declaration for a field, across required and optional sets
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|f| f.name == name)
    }

    /// Validate a create payload: all required fields present, every
    /// enumerated field (required or optional) within its allowed set.
    pub fn validate_create(&self, payload: &Map<String, Value>) -> Result<(), String> {
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|f| !is_present(payload.get(f.name)))
            .map(|f| f.name)
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ));
        }

        self.validate_enums(payload)
    }

    /// Validate only the enumerated fields that appear in a payload.
    ///
    /// Used on update, where absent fields keep their current value.
    pub fn validate_enums(&self, payload: &Map<String, Value>) -> Result<(), String> {
        for spec in self.required.iter().chain(self.optional.iter()) {
            let Some(allowed) = spec.allowed else {
                continue;
            };
            if let Some(value) = payload.get(spec.name) {
                if !spec.accepts(value) {
                    return Err(format!(
                        "{} must be one of: {}",
                        spec.name,
                        allowed.join(", ")
                    ));
                }
            }
        }
        Ok(())
    }

    /// Fill declared defaults for fields the payload omitted
    pub fn apply_defaults(&self, record: &mut Map<String, Value>) {
        for (name, default) in self.defaults {
            if !is_present(record.get(*name)) {
                record.insert((*name).to_string(), default.to_value());
            }
        }
    }
}

/// A field counts as present when it exists, is not null, and is not an
/// empty string. Mirrors the truthiness check the dashboard UI relies on.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
