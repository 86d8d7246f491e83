//! Date handling for backup rows.
//!
//! Dates travel through the backup document as ISO-8601 strings. The
//! exporter writes them with millisecond precision; the importer turns
//! them back into native `DateTime<Utc>` values before insertion.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::database::SiteTable;
use crate::error::{BackupError, Result};

/// Date-like columns converted on restore.
pub const DATE_FIELDS: [&str; 3] = ["createdAt", "updatedAt", "deletedAt"];

/// Formats SQLite writes when a column falls back to `CURRENT_TIMESTAMP`.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A date field lifted out of a row, already in native form.
#[derive(Debug, Clone, PartialEq)]
pub struct RevivedDate {
    pub field: &'static str,
    /// `None` when the document holds an explicit `null`.
    pub value: Option<DateTime<Utc>>,
}

/// Parse a document value into an instant.
///
/// Accepts RFC 3339 strings, SQLite's naive `YYYY-MM-DD HH:MM:SS[.fff]`
/// form (read as UTC), and integer epoch milliseconds.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Document form of an instant: `2024-01-01T00:00:00.000Z`.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Remove the date fields from `row` and return them as native values.
///
/// Fields absent from the row are not reported, so the caller leaves the
/// matching columns untouched.
pub fn revive_dates(table: SiteTable, row: &mut Map<String, Value>) -> Result<Vec<RevivedDate>> {
    let mut revived = Vec::new();
    for field in DATE_FIELDS {
        let Some(raw) = row.remove(field) else {
            continue;
        };
        if raw.is_null() {
            revived.push(RevivedDate { field, value: None });
            continue;
        }
        let value = parse_instant(&raw).ok_or_else(|| BackupError::Date {
            table: table.table_name(),
            field: field.to_string(),
            value: raw.to_string(),
        })?;
        revived.push(RevivedDate {
            field,
            value: Some(value),
        });
    }
    Ok(revived)
}

/// Rewrite the date fields of an exported row into document form.
pub fn stamp_dates(row: &mut Map<String, Value>) {
    for field in DATE_FIELDS {
        if let Some(slot) = row.get_mut(field) {
            if let Some(dt) = parse_instant(slot) {
                *slot = Value::String(format_instant(&dt));
            }
        }
    }
}
