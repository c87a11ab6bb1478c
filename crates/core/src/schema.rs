//! Output schema model
//!
//! A schema is the ordered list of columns a record is materialized into.
//! It is built once from the column declarations of the run configuration;
//! per-column timestamp patterns are resolved at that point so that record
//! materialization never scans the declarations again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::timestamp::resolve_pattern;

/// Declared type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Json,
    String,
    Timestamp,
    Boolean,
    Long,
    Double,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::Json => "json",
            ColumnType::String => "string",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Boolean => "boolean",
            ColumnType::Long => "long",
            ColumnType::Double => "double",
        };
        f.write_str(name)
    }
}

/// One column declaration as written in the run configuration
///
/// Any key other than `name` and `type` is kept in `options`. The only option
/// the engine reads is a textual `format`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColumnConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            options: serde_json::Map::new(),
        }
    }

    /// Attach a timestamp `format` option
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.options
            .insert("format".to_string(), serde_json::Value::String(format.into()));
        self
    }

    /// The `format` option, if present and textual
    pub fn format(&self) -> Option<&str> {
        self.options.get("format").and_then(|v| v.as_str())
    }
}

/// A column of the output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
    pub column_type: ColumnType,
}

/// Ordered, immutable set of output columns
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
    timestamp_patterns: HashMap<String, String>,
}

impl Schema {
    /// Build a schema from column declarations.
    ///
    /// Timestamp columns get their parse pattern resolved here.
    pub fn from_configs(configs: &[ColumnConfig]) -> Self {
        let columns: Vec<Column> = configs
            .iter()
            .enumerate()
            .map(|(index, config)| Column {
                index,
                name: config.name.clone(),
                column_type: config.column_type,
            })
            .collect();

        let timestamp_patterns = columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Timestamp)
            .map(|c| (c.name.clone(), resolve_pattern(configs, &c.name).to_string()))
            .collect();

        Self {
            columns,
            timestamp_patterns,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Parse pattern for a timestamp column, `None` for any other column
    pub fn timestamp_pattern(&self, name: &str) -> Option<&str> {
        self.timestamp_patterns.get(name).map(String::as_str)
    }
}
