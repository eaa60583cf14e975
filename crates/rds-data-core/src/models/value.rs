// ABOUTME: Application-side scalar values carried by records
// ABOUTME: Conversions from Rust primitives and from JSON documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;

use crate::errors::{DataLayerError, DataResult};

/// A single non-null value supplied by the application
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Text
    String(String),
    /// 64-bit signed integer
    Long(i64),
    /// Double precision float
    Double(f64),
    /// Boolean
    Boolean(bool),
    /// Raw bytes
    Blob(Vec<u8>),
}

impl ScalarValue {
    /// Name of the value kind, used in type mismatch errors
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Blob(_) => "blob",
        }
    }

    /// Convert a JSON scalar; `null` becomes `None`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for arrays, objects and numbers that fit neither
    /// `i64` nor `f64`
    pub fn from_json(value: &Value) -> DataResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Self::Boolean(*b))),
            Value::String(s) => Ok(Some(Self::String(s.clone()))),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Long)
                .or_else(|| n.as_f64().map(Self::Double))
                .map(Some)
                .ok_or_else(|| {
                    DataLayerError::invalid_argument(format!("number {n} is out of range"))
                }),
            Value::Array(_) | Value::Object(_) => Err(DataLayerError::invalid_argument(
                "record values must be scalars",
            )),
        }
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Long(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}
