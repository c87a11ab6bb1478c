//! JSON to column-type coercion
//!
//! Every conversion is total over [`serde_json::Value`]: a value that does not
//! fit the target type yields `None`, which the record engine writes as null.
//! Scalar conversions follow the usual JSON-library rules: a single-element
//! array converts as its element, numbers truncate to integers, and strings
//! are parsed.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::timestamp::parse_timestamp;

/// Whether `value` is a string, number or boolean
pub fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// String form of a primitive (`"abc"` → `abc`, `1.5` → `1.5`, `true` → `true`)
pub fn primitive_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `json` column: arrays and objects pass through, anything else is null
pub fn to_json(value: &Value) -> Option<Value> {
    match value {
        Value::Array(_) | Value::Object(_) => Some(value.clone()),
        _ => None,
    }
}

/// `string` column
///
/// Arrays are joined with `,`; primitive elements use their string form and
/// every other element (null, nested array, object) its compact JSON text.
pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| primitive_as_string(item).unwrap_or_else(|| item.to_string()))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
        primitive => primitive_as_string(primitive),
    }
}

/// `timestamp` column: only primitives are parsed
pub fn to_timestamp(value: &Value, pattern: &str) -> Option<DateTime<Utc>> {
    let text = primitive_as_string(value)?;
    parse_timestamp(&text, pattern)
}

/// `boolean` column
///
/// A non-boolean primitive is `true` exactly when its string form is `true`
/// ignoring case.
pub fn to_boolean(value: &Value) -> Option<bool> {
    match single_primitive(value)? {
        Value::Bool(b) => Some(*b),
        other => primitive_as_string(other).map(|s| s.eq_ignore_ascii_case("true")),
    }
}

/// `long` column
pub fn to_long(value: &Value) -> Option<i64> {
    match single_primitive(value)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| u as i64))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

/// `double` column
pub fn to_double(value: &Value) -> Option<f64> {
    match single_primitive(value)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// The primitive a scalar conversion operates on.
///
/// A one-element array stands for its element; null, objects and arrays of
/// any other length have no scalar form.
fn single_primitive(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) if items.len() == 1 => single_primitive(&items[0]),
        v if is_primitive(v) => Some(v),
        _ => None,
    }
}
