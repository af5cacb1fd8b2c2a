//! Telemetry values as a tagged union
//!
//! Data sources deliver heterogeneous values (text, numbers, booleans, flat
//! maps). Rather than passing raw JSON around, the binding layer works with
//! this tagged union and converters extract typed values with an explicit
//! runtime check, failing with [`TypeMismatchError`] instead of casting.

use crate::DataType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error returned when extracting a typed value from a [`Value`] with a
/// different tag, or when importing an unsupported JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a {expected} value, found {found}")]
pub struct TypeMismatchError {
    /// The type the caller asked for
    pub expected: &'static str,
    /// The type actually held
    pub found: &'static str,
}

/// A single telemetry value.
///
/// `Composite` holds a flat map over string keys; keys like `"a/b/c"` are
/// opaque strings, not paths to traverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Boolean(bool),
    /// Numerical value
    Number(f64),
    /// Text value
    Text(String),
    /// Flat string-keyed map of values
    Composite(HashMap<String, Value>),
}

impl Value {
    /// The shape classifier for this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::Number(_) => DataType::Number,
            Value::Text(_) => DataType::Text,
            Value::Composite(_) => DataType::Composite,
        }
    }

    /// Short tag name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Composite(_) => "composite",
        }
    }

    /// Extract a boolean, failing on any other tag.
    pub fn as_boolean(&self) -> Result<bool, TypeMismatchError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(TypeMismatchError {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }

    /// Extract a number, failing on any other tag.
    pub fn as_number(&self) -> Result<f64, TypeMismatchError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(TypeMismatchError {
                expected: "number",
                found: other.type_name(),
            }),
        }
    }

    /// Extract text, failing on any other tag.
    pub fn as_text(&self) -> Result<&str, TypeMismatchError> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(TypeMismatchError {
                expected: "text",
                found: other.type_name(),
            }),
        }
    }

    /// Extract the composite map, failing on any other tag.
    pub fn as_composite(&self) -> Result<&HashMap<String, Value>, TypeMismatchError> {
        match self {
            Value::Composite(map) => Ok(map),
            other => Err(TypeMismatchError {
                expected: "composite",
                found: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    /// Textual rendering used by text-oriented views.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Composite(map) => write!(f, "<composite: {} entries>", map.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Composite(map)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = TypeMismatchError;

    /// Import a JSON value from the telemetry boundary. Nulls and arrays
    /// have no representation here and are rejected.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::Number(n) => {
                n.as_f64().map(Value::Number).ok_or(TypeMismatchError {
                    expected: "number",
                    found: "number",
                })
            }
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Object(map) => {
                let mut entries = HashMap::with_capacity(map.len());
                for (key, value) in map {
                    entries.insert(key, Value::try_from(value)?);
                }
                Ok(Value::Composite(entries))
            }
            serde_json::Value::Null => Err(TypeMismatchError {
                expected: "scalar or composite",
                found: "null",
            }),
            serde_json::Value::Array(_) => Err(TypeMismatchError {
                expected: "scalar or composite",
                found: "array",
            }),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Composite(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_checks() {
        let v = Value::Number(1.5);
        assert_eq!(v.as_number().unwrap(), 1.5);
        assert_eq!(v.data_type(), DataType::Number);

        let err = v.as_boolean().unwrap_err();
        assert_eq!(err.expected, "boolean");
        assert_eq!(err.found, "number");

        assert_eq!(Value::from("hi").as_text().unwrap(), "hi");
        assert!(Value::from(true).as_boolean().unwrap());
    }

    #[test]
    fn test_composite_access() {
        let mut map = HashMap::new();
        map.insert("Speed".to_string(), Value::Number(0.5));
        let v = Value::from(map);
        assert_eq!(v.data_type(), DataType::Composite);
        let entries = v.as_composite().unwrap();
        assert_eq!(entries["Speed"], Value::Number(0.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_json_round_trip() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"Speed": 0.5, "Inverted": false, "Name": "left"}"#).unwrap();
        let value = Value::try_from(json.clone()).unwrap();
        let entries = value.as_composite().unwrap();
        assert_eq!(entries["Speed"], Value::Number(0.5));
        assert_eq!(entries["Inverted"], Value::Boolean(false));
        assert_eq!(entries["Name"], Value::Text("left".to_string()));

        let back: serde_json::Value = value.into();
        assert_eq!(back, json);
    }

    #[test]
    fn test_json_unsupported_shapes() {
        let err = Value::try_from(serde_json::Value::Null).unwrap_err();
        assert_eq!(err.found, "null");
        let err = Value::try_from(serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.found, "array");
    }
}
