//! Read-only view over one fetched issue

use serde::Deserialize;
use serde_json::Value;

static NULL: Value = Value::Null;

/// A single issue document as returned by the search API
///
/// Column names are looked up as dotted paths (`status.name`). A path whose
/// first segment is not a top-level key of the issue (`key`, `id`, `self`,
/// ...) is resolved inside its `fields` object, so `summary` and
/// `fields.summary` name the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    document: Value,
}

impl Issue {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// The raw issue document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The `fields` object, if the issue has one
    pub fn fields(&self) -> Option<&serde_json::Map<String, Value>> {
        self.document.get("fields").and_then(Value::as_object)
    }

    /// Value at `path`, or JSON null when any segment is missing
    pub fn value(&self, path: &str) -> &Value {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return &NULL;
        };

        let start = match self.document.get(first) {
            Some(value) => value,
            None => match self.fields().and_then(|f| f.get(first)) {
                Some(value) => value,
                None => return &NULL,
            },
        };

        segments
            .try_fold(start, |current, segment| current.get(segment))
            .unwrap_or(&NULL)
    }
}

/// Response of the offset-paginated search endpoint
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    #[serde(rename = "startAt")]
    pub start_at: u64,
    #[serde(default)]
    #[serde(rename = "maxResults")]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Value>,
}

impl SearchResponse {
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues.into_iter().map(Issue::new).collect()
    }
}
