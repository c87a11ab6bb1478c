//! Schema inference from sample issues
//!
//! Produces column declarations that can be pasted into a run configuration.
//! Top-level issue keys come first, then one column per entry of `fields`.
//! Object fields carrying a `name` (or failing that an `id`) are reduced to
//! that member, e.g. `status.name`.

use serde_json::Value;
use std::collections::HashMap;

use crate::issue::Issue;
use crate::schema::{ColumnConfig, ColumnType};
use crate::timestamp::{parse_timestamp, DEFAULT_TIMESTAMP_PATTERN};

/// Top-level keys that never become columns
const SKIPPED_KEYS: &[&str] = &["fields", "expand"];

/// Infer column declarations from `issues`
pub fn guess_columns(issues: &[Issue]) -> Vec<ColumnConfig> {
    let mut order: Vec<String> = Vec::new();
    let mut types: HashMap<String, Option<ColumnType>> = HashMap::new();

    let mut observe = |name: String, value: &Value| {
        let observed = infer_type(value);
        match types.get_mut(&name) {
            Some(current) => *current = merge(*current, observed),
            None => {
                order.push(name.clone());
                types.insert(name, observed);
            }
        }
    };

    for issue in issues {
        let Some(document) = issue.document().as_object() else {
            continue;
        };

        for (key, value) in document {
            if !SKIPPED_KEYS.contains(&key.as_str()) {
                observe(key.clone(), value);
            }
        }

        for (key, value) in issue.fields().into_iter().flatten() {
            match reduce_object(value) {
                Some((member, inner)) => observe(format!("{key}.{member}"), inner),
                None => observe(key.clone(), value),
            }
        }
    }

    order
        .into_iter()
        .map(|name| {
            let column_type = types
                .get(&name)
                .copied()
                .flatten()
                .unwrap_or(ColumnType::String);
            let config = ColumnConfig::new(name, column_type);
            if column_type == ColumnType::Timestamp {
                config.with_format(DEFAULT_TIMESTAMP_PATTERN)
            } else {
                config
            }
        })
        .collect()
}

/// Reduce an object to its `name` or `id` member
fn reduce_object(value: &Value) -> Option<(&'static str, &Value)> {
    let object = value.as_object()?;
    ["name", "id"]
        .into_iter()
        .find_map(|member| object.get(member).map(|inner| (member, inner)))
}

/// Type suggested by a single value, `None` for null
fn infer_type(value: &Value) -> Option<ColumnType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ColumnType::Boolean),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(ColumnType::Long),
        Value::Number(_) => Some(ColumnType::Double),
        Value::String(s) if parse_timestamp(s, DEFAULT_TIMESTAMP_PATTERN).is_some() => {
            Some(ColumnType::Timestamp)
        }
        Value::String(_) => Some(ColumnType::String),
        Value::Array(_) | Value::Object(_) => Some(ColumnType::Json),
    }
}

/// Widen two observations of the same column
fn merge(current: Option<ColumnType>, observed: Option<ColumnType>) -> Option<ColumnType> {
    use ColumnType::*;

    match (current, observed) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) if a == b => Some(a),
        (Some(Long), Some(Double)) | (Some(Double), Some(Long)) => Some(Double),
        _ => Some(String),
    }
}
