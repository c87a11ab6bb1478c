//! Timestamp pattern resolution and parsing
//!
//! Patterns are strptime-style. Besides everything chrono understands, `%L`
//! (milliseconds) and `%N` (fractional seconds) are accepted. Parsed values
//! are always UTC: an offset in the input is applied, a missing one means UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::schema::ColumnConfig;

/// Pattern used when a column declares no `format` (e.g. `2019-01-07T13:55:06.000+0000`)
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S.%L%z";

/// Pick the parse pattern for `column_name`.
///
/// The first declaration with that name and a textual `format` wins;
/// otherwise [`DEFAULT_TIMESTAMP_PATTERN`] is used.
pub fn resolve_pattern<'a>(configs: &'a [ColumnConfig], column_name: &str) -> &'a str {
    configs
        .iter()
        .filter(|c| c.name == column_name)
        .find_map(ColumnConfig::format)
        .unwrap_or(DEFAULT_TIMESTAMP_PATTERN)
}

/// Parse `value` with `pattern`, returning `None` on any failure
pub fn parse_timestamp(value: &str, pattern: &str) -> Option<DateTime<Utc>> {
    let pattern = to_chrono_pattern(pattern);

    if let Ok(dt) = DateTime::parse_from_str(value, &pattern) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, &pattern) {
        return Some(naive.and_utc());
    }
    match NaiveDate::parse_from_str(value, &pattern) {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        Err(e) => {
            log::debug!("could not parse {value:?} with {pattern:?}: {e}");
            None
        }
    }
}

/// Rewrite the strptime directives chrono spells differently
fn to_chrono_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('L') => out.push_str("%3f"),
            Some('N') => out.push_str("%f"),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    out
}
