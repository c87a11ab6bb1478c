//! Record materialization
//!
//! [`materialize_record`] turns one [`Issue`] into one row of the schema and
//! hands it to a [`RecordSink`]. Column-level failures never abort the row:
//! they are written as null and the next column is processed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::coerce;
use crate::issue::Issue;
use crate::schema::{Column, ColumnType, Schema};
use crate::timestamp::DEFAULT_TIMESTAMP_PATTERN;

/// Consumer of typed rows
///
/// Setters may be called in any column order; [`RecordSink::add_record`]
/// finalizes the row built so far.
pub trait RecordSink {
    fn set_null(&mut self, column: &Column);
    fn set_string(&mut self, column: &Column, value: String);
    fn set_boolean(&mut self, column: &Column, value: bool);
    fn set_long(&mut self, column: &Column, value: i64);
    fn set_double(&mut self, column: &Column, value: f64);
    fn set_timestamp(&mut self, column: &Column, value: DateTime<Utc>);
    fn set_json(&mut self, column: &Column, value: Value);
    fn add_record(&mut self);
}

/// A single typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    String(String),
    Boolean(bool),
    Long(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    Json(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// JSON rendering used by the output writers. Timestamps become RFC 3339
    /// strings with millisecond precision; non-finite doubles become null.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Long(n) => Value::from(*n),
            FieldValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Timestamp(ts) => {
                Value::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            FieldValue::Json(v) => v.clone(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Timestamp(ts) => {
                f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// One materialized row, positionally aligned with its schema
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<FieldValue>,
}

impl Record {
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Render as a JSON object keyed by column name
    pub fn to_json_object(&self, schema: &Schema) -> serde_json::Map<String, Value> {
        schema
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(column, value)| (column.name.clone(), value.to_json()))
            .collect()
    }
}

/// In-memory sink collecting rows for a schema
#[derive(Debug)]
pub struct RecordBuilder {
    width: usize,
    current: Vec<FieldValue>,
    records: Vec<Record>,
}

impl RecordBuilder {
    pub fn new(schema: &Schema) -> Self {
        Self {
            width: schema.len(),
            current: vec![FieldValue::Null; schema.len()],
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Take the finished rows, leaving the builder empty
    pub fn take_records(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }

    fn set(&mut self, column: &Column, value: FieldValue) {
        if let Some(slot) = self.current.get_mut(column.index) {
            *slot = value;
        }
    }
}

impl RecordSink for RecordBuilder {
    fn set_null(&mut self, column: &Column) {
        self.set(column, FieldValue::Null);
    }

    fn set_string(&mut self, column: &Column, value: String) {
        self.set(column, FieldValue::String(value));
    }

    fn set_boolean(&mut self, column: &Column, value: bool) {
        self.set(column, FieldValue::Boolean(value));
    }

    fn set_long(&mut self, column: &Column, value: i64) {
        self.set(column, FieldValue::Long(value));
    }

    fn set_double(&mut self, column: &Column, value: f64) {
        self.set(column, FieldValue::Double(value));
    }

    fn set_timestamp(&mut self, column: &Column, value: DateTime<Utc>) {
        self.set(column, FieldValue::Timestamp(value));
    }

    fn set_json(&mut self, column: &Column, value: Value) {
        self.set(column, FieldValue::Json(value));
    }

    fn add_record(&mut self) {
        let values = std::mem::replace(&mut self.current, vec![FieldValue::Null; self.width]);
        self.records.push(Record { values });
    }
}

/// Materialize `issue` against `schema` and commit exactly one row to `sink`
pub fn materialize_record<S: RecordSink + ?Sized>(issue: &Issue, schema: &Schema, sink: &mut S) {
    for column in schema.columns() {
        let raw = issue.value(&column.name);

        let written = match column.column_type {
            ColumnType::Json => coerce::to_json(raw).map(|v| sink.set_json(column, v)),
            ColumnType::String => coerce::to_string(raw).map(|v| sink.set_string(column, v)),
            ColumnType::Timestamp => {
                let pattern = schema
                    .timestamp_pattern(&column.name)
                    .unwrap_or(DEFAULT_TIMESTAMP_PATTERN);
                coerce::to_timestamp(raw, pattern).map(|v| sink.set_timestamp(column, v))
            }
            ColumnType::Boolean => coerce::to_boolean(raw).map(|v| sink.set_boolean(column, v)),
            ColumnType::Long => coerce::to_long(raw).map(|v| sink.set_long(column, v)),
            ColumnType::Double => coerce::to_double(raw).map(|v| sink.set_double(column, v)),
        };

        if written.is_none() {
            if !raw.is_null() {
                log::trace!(
                    "column {:?} ({}): {} does not convert, writing null",
                    column.name,
                    column.column_type,
                    raw
                );
            }
            sink.set_null(column);
        }
    }

    sink.add_record();
}
