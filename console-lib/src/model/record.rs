//! Row identity and the JSON-backed [`Record`] row.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

/// Stable identifier of a row (its primary key as rendered by the API).
///
/// The delete flow keeps a `RowId` instead of the row itself so that a page
/// refresh between opening and confirming cannot act on a stale copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the row carried no usable id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds an id from a JSON scalar. Objects, arrays and null yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Bool(b) => Some(Self(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A row the data table can display.
///
/// The table never interprets row fields itself; it only asks for the row's
/// id and for values at the dot-paths named by its columns.
pub trait Row: Clone + Send + Sync + 'static {
    /// Returns the row's stable identifier.
    fn row_id(&self) -> RowId;

    /// Returns the raw value at a dot-separated path (`user.fullname`).
    fn value_at(&self, path: &str) -> Option<&Value>;
}

/// Looks up a dot-separated path inside a JSON value.
///
/// Object members are matched by key and array elements by numeric index.
/// An empty path returns the value itself.
pub fn value_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Default primary key field of API records.
pub const DEFAULT_ID_FIELD: &str = "id";

/// A JSON object returned by the API, used as a generic table row.
///
/// # Example
///
/// ```
/// use console_lib::model::{Record, Row};
/// use serde_json::json;
///
/// let record = Record::from_value(json!({"code": "BTC", "name": "Bitcoin"}))
///     .unwrap()
///     .with_id_field("code");
///
/// assert_eq!(record.row_id().as_str(), "BTC");
/// assert_eq!(record.get_str("name"), Some("Bitcoin"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    data: Value,
    id_field: String,
}

impl Record {
    /// Creates a record from a JSON object map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            data: Value::Object(fields),
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }

    /// Creates a record from a JSON value; returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Sets the field used as the row id (`id`, `code`, `type`, ...).
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Returns the name of the id field.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Returns the value at a dot-path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        value_at_path(&self.data, path)
    }

    /// Returns the string at a dot-path, if it is a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Returns the boolean at a dot-path, if it is a boolean.
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.data
    }

    /// Consumes the record and returns the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.data
    }
}

impl Row for Record {
    fn row_id(&self) -> RowId {
        self.get(&self.id_field)
            .and_then(RowId::from_value)
            .unwrap_or_default()
    }

    fn value_at(&self, path: &str) -> Option<&Value> {
        self.get(path)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_at_nested_path() {
        let value = json!({"user": {"fullname": "Jane Doe", "tags": ["a", "b"]}});
        assert_eq!(value_at_path(&value, "user.fullname"), Some(&json!("Jane Doe")));
        assert_eq!(value_at_path(&value, "user.tags.1"), Some(&json!("b")));
        assert_eq!(value_at_path(&value, "user.missing"), None);
        assert_eq!(value_at_path(&value, "user.fullname.deeper"), None);
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let record = Record::from_value(json!({"id": 42, "name": "x"})).unwrap();
        assert_eq!(record.row_id(), RowId::from("42"));
    }

    #[test]
    fn test_missing_id_is_empty() {
        let record = Record::from_value(json!({"name": "x"})).unwrap();
        assert!(record.row_id().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_non_objects() {
        assert!(serde_json::from_value::<Record>(json!([1, 2])).is_err());
        let record: Record = serde_json::from_value(json!({"id": "u1"})).unwrap();
        assert_eq!(record.row_id().as_str(), "u1");
    }
}
