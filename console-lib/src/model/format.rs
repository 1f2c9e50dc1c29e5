//! Display helpers for common column values.

use chrono::DateTime;
use chrono::Local;
use serde_json::Value;

/// Date format used across the console listings.
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Formats an RFC 3339 timestamp in local time using [`DATE_FORMAT`].
///
/// Empty or unparsable input renders as an empty string.
pub fn format_date(raw: &str) -> String {
    format_date_with(raw, DATE_FORMAT)
}

/// Formats an RFC 3339 timestamp in local time with a custom `strftime` format.
pub fn format_date_with(raw: &str, format: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).format(format).to_string())
        .unwrap_or_default()
}

/// Renders a JSON scalar the way a plain table cell shows it.
///
/// Strings are shown verbatim, numbers and booleans via `Display`, null or a
/// missing value as an empty string. Objects and arrays fall back to compact
/// JSON.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
