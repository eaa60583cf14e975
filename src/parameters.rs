// ABOUTME: Binds application records to ordered, typed statement parameters
// ABOUTME: Explicit nulls become {"isNull": true}; absent keys are MissingField errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Parameter Binder
//!
//! Parameters are produced in schema column order. The INSERT text must be built from
//! the same column sequence or placeholders bind to the wrong values.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{DataLayerError, DataResult};
use crate::models::{ColumnType, Field, ScalarValue, TypedParameter};
use crate::schema::ColumnDescriptor;

/// Column name to optional value, supplied per call
///
/// A key mapped to `None` is an explicit null. A key that is not present at all is
/// missing, which is an error when the column is declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, Option<ScalarValue>>,
}

impl Record {
    /// Empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column to a value
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    /// Set a column to an explicit null
    #[must_use]
    pub fn with_null(mut self, column: impl Into<String>) -> Self {
        self.insert(column, None);
        self
    }

    /// Set or replace a column
    pub fn insert(&mut self, column: impl Into<String>, value: Option<ScalarValue>) {
        self.values.insert(column.into(), value);
    }

    /// Value for a column: `None` if the key is absent, `Some(None)` for an explicit null
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Option<ScalarValue>> {
        self.values.get(column)
    }

    /// Whether the key is present (null or not)
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Column names present in the record
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a record from a JSON object
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the value is not an object or holds non-scalar values
    pub fn from_json(value: &Value) -> DataResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| DataLayerError::invalid_argument("record must be a JSON object"))?;
        Self::from_json_map(object)
    }

    /// Build a record from a JSON map
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any value is an array or object
    pub fn from_json_map(object: &Map<String, Value>) -> DataResult<Self> {
        let mut record = Self::new();
        for (column, value) in object {
            record.insert(column.clone(), ScalarValue::from_json(value)?);
        }
        Ok(record)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<ScalarValue>)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, Option<ScalarValue>)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Bind a record to typed parameters, one per column, in column order
///
/// # Errors
///
/// Returns `MissingField` when a declared column has no key in the record, and
/// `TypeMismatch` when a value cannot be sent as the column's declared type
pub fn bind(columns: &[ColumnDescriptor], record: &Record) -> DataResult<Vec<TypedParameter>> {
    let parameters = columns
        .iter()
        .map(|column| {
            let value = record
                .get(&column.name)
                .ok_or_else(|| DataLayerError::missing_field(&column.name))?;

            let field = match value {
                None => Field::null(),
                Some(value) => typed_field(column, value)?,
            };
            Ok(TypedParameter::new(&column.name, field))
        })
        .collect::<DataResult<Vec<_>>>()?;

    let ignored: Vec<&str> = record
        .columns()
        .filter(|k| !columns.iter().any(|c| c.name == *k))
        .collect();
    if !ignored.is_empty() {
        debug!(?ignored, "Record keys without a declared column were not bound");
    }

    Ok(parameters)
}

/// Bind several records against the same columns, e.g. for a batch insert
///
/// # Errors
///
/// Returns the first binding error encountered
pub fn bind_batch(
    columns: &[ColumnDescriptor],
    records: &[Record],
) -> DataResult<Vec<Vec<TypedParameter>>> {
    records.iter().map(|record| bind(columns, record)).collect()
}

fn typed_field(column: &ColumnDescriptor, value: &ScalarValue) -> DataResult<Field> {
    let field = match (column.column_type, value) {
        (ColumnType::String, ScalarValue::String(s)) => Field::StringValue(s.clone()),
        (ColumnType::Long, ScalarValue::Long(n)) => Field::LongValue(*n),
        (ColumnType::Double, ScalarValue::Double(d)) => Field::DoubleValue(*d),
        (ColumnType::Double, ScalarValue::Long(n)) => Field::DoubleValue(*n as f64),
        (ColumnType::Boolean, ScalarValue::Boolean(b)) => Field::BooleanValue(*b),
        (ColumnType::Blob, ScalarValue::Blob(bytes)) => Field::blob(bytes),
        (expected, found) => {
            return Err(DataLayerError::TypeMismatch {
                column: column.name.clone(),
                expected,
                found: found.kind(),
            })
        }
    };
    Ok(field)
}
