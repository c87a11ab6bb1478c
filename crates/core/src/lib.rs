//! Core library for jira-ingest
//!
//! This crate implements the **Functional Core** of the jira-ingest application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The jira-ingest project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`jira_ingest_core`** (this crate): Pure transformation functions with zero I/O
//! - **`jira-ingest`**: HTTP, configuration files and output (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`url`]: Endpoint URL construction for the permission and search APIs
//! - [`config`]: Run configuration model and its validation checks
//! - [`pagination`]: Page count and page offset arithmetic
//! - [`schema`]: Column declarations and per-column timestamp patterns
//! - [`issue`]: Read-only access to a fetched issue document
//! - [`coerce`]: Conversion of dynamically-typed JSON into column types
//! - [`timestamp`]: strptime-style pattern resolution and UTC parsing
//! - [`record`]: The sink contract and the record materialization engine
//! - [`guess`]: Schema inference from sample issues
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use jira_ingest_core::issue::Issue;
//! use jira_ingest_core::record::{materialize_record, RecordBuilder};
//! use jira_ingest_core::schema::{ColumnConfig, ColumnType, Schema};
//!
//! let schema = Schema::from_configs(&[ColumnConfig::new("key", ColumnType::String)]);
//! let issue = Issue::new(serde_json::json!({"key": "PROJ-1", "fields": {}}));
//!
//! let mut builder = RecordBuilder::new(&schema);
//! materialize_record(&issue, &schema, &mut builder);
//!
//! assert_eq!(builder.records().len(), 1);
//! ```

pub mod coerce;
pub mod config;
pub mod guess;
pub mod issue;
pub mod pagination;
pub mod record;
pub mod schema;
pub mod timestamp;
pub mod url;
