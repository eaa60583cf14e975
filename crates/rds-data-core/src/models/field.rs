// ABOUTME: Tagged wire field used for parameters and result cells
// ABOUTME: Serializes as a single-key object such as {"stringValue": "..."} or {"isNull": true}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One typed value on the wire
///
/// Externally tagged, so each variant serializes as an object with exactly one key.
/// Nulls are sent as `{"isNull": true}` regardless of the column's declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Explicit null
    #[serde(rename = "isNull")]
    IsNull(bool),
    /// Text
    #[serde(rename = "stringValue")]
    StringValue(String),
    /// 64-bit signed integer
    #[serde(rename = "longValue")]
    LongValue(i64),
    /// Double precision float
    #[serde(rename = "doubleValue")]
    DoubleValue(f64),
    /// Boolean
    #[serde(rename = "booleanValue")]
    BooleanValue(bool),
    /// Base64 encoded bytes
    #[serde(rename = "blobValue")]
    BlobValue(String),
    /// Array column value, e.g. `{"stringValues": [...]}`; only ever received
    #[serde(rename = "arrayValue")]
    ArrayValue(Value),
}

impl Field {
    /// The null marker, `{"isNull": true}`
    #[must_use]
    pub const fn null() -> Self {
        Self::IsNull(true)
    }

    /// Encode raw bytes as a blob field
    #[must_use]
    pub fn blob(bytes: &[u8]) -> Self {
        Self::BlobValue(BASE64.encode(bytes))
    }
}

/// A named, typed statement parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedParameter {
    /// Placeholder name without the leading colon
    pub name: String,
    /// Typed value
    pub value: Field,
}

impl TypedParameter {
    /// Create a parameter
    #[must_use]
    pub fn new(name: impl Into<String>, value: Field) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_wire_shape() {
        assert_eq!(
            serde_json::to_value(Field::StringValue("x".to_owned())).unwrap(),
            json!({"stringValue": "x"})
        );
        assert_eq!(
            serde_json::to_value(Field::null()).unwrap(),
            json!({"isNull": true})
        );
        assert_eq!(
            serde_json::to_value(Field::LongValue(7)).unwrap(),
            json!({"longValue": 7})
        );
    }

    #[test]
    fn test_parameter_wire_shape() {
        let param = TypedParameter::new("cpid", Field::StringValue("09999999990".to_owned()));
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({"name": "cpid", "value": {"stringValue": "09999999990"}})
        );
    }

    #[test]
    fn test_deserialize_result_cells() {
        let cells: Vec<Field> = serde_json::from_value(json!([
            {"stringValue": "A"},
            {"isNull": true},
            {"booleanValue": false},
            {"doubleValue": 2.5}
        ]))
        .unwrap();
        assert_eq!(cells[0], Field::StringValue("A".to_owned()));
        assert_eq!(cells[1], Field::null());
        assert_eq!(cells[2], Field::BooleanValue(false));
        assert_eq!(cells[3], Field::DoubleValue(2.5));
    }

    #[test]
    fn test_deserialize_array_cell() {
        let cell: Field =
            serde_json::from_value(json!({"arrayValue": {"longValues": [1, 2]}})).unwrap();
        assert_eq!(cell, Field::ArrayValue(json!({"longValues": [1, 2]})));
    }

    #[test]
    fn test_blob_is_base64() {
        assert_eq!(Field::blob(b"hi"), Field::BlobValue("aGk=".to_owned()));
    }
}
