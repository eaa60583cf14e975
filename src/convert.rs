// ABOUTME: Converts raw typed result rows into keyed records or queue-send envelopes
// ABOUTME: Output shape is a closed enum resolved before any statement runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Result Converter
//!
//! Two shapes are supported for a whole result set:
//!
//! - **Dict**: one [`ConvertedRecord`] per row, keyed by the select-list names exactly
//!   as given (join qualifiers kept).
//! - **`QueueMessage`**: one [`QueueEnvelope`] per row, keyed by the last `.` segment of
//!   each select-list name, all envelopes sharing one freshly generated group id.
//!
//! Null cells become empty strings in both shapes. A row whose cell count differs from
//! the select list fails the whole conversion with `MalformedResultSet`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::errors::{DataLayerError, DataResult};
use crate::gateway::RawResultSet;
use crate::models::Field;

/// Requested output shape for a select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Flat keyed records
    #[default]
    Dict,
    /// Queue-send envelopes with a shared group id
    QueueMessage,
}

impl OutputShape {
    /// Names accepted by `from_str`
    pub const VALID_NAMES: [&'static str; 2] = ["dict", "queue"];

    /// Convert a result set into this shape
    ///
    /// # Errors
    ///
    /// Returns `MalformedResultSet` if any row does not match the select list, and
    /// `Serialization` if a message body cannot be encoded
    pub fn convert(self, result: &RawResultSet) -> DataResult<SelectOutput> {
        match self {
            Self::Dict => to_records(result).map(SelectOutput::Records),
            Self::QueueMessage => to_queue_messages(result).map(SelectOutput::Messages),
        }
    }
}

impl Display for OutputShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Dict => f.write_str("dict"),
            Self::QueueMessage => f.write_str("queue"),
        }
    }
}

impl FromStr for OutputShape {
    type Err = DataLayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dict" | "record" | "records" => Ok(Self::Dict),
            "queue" | "queue_message" | "queuemessage" | "sqs" => Ok(Self::QueueMessage),
            other => Err(DataLayerError::invalid_argument(format!(
                "output shape must be one of {:?}, got '{other}'",
                Self::VALID_NAMES
            ))),
        }
    }
}

/// Column name to normalized value, in select-list order
///
/// Setting a name that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedRecord {
    entries: Vec<(String, Value)>,
}

impl ConvertedRecord {
    /// Empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, keeping the position of an existing one
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON text with keys in order
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails
    pub fn to_json_string(&self) -> DataResult<String> {
        serde_json::to_string(self).map_err(|source| DataLayerError::Serialization {
            context: "queue message body",
            source,
        })
    }
}

impl Serialize for ConvertedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One queue-send entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEnvelope {
    /// 1-based row position
    #[serde(rename = "Id")]
    pub id: String,
    /// Group id shared by every envelope of one conversion
    #[serde(rename = "MessageGroupId")]
    pub group_id: String,
    /// JSON encoded record
    #[serde(rename = "MessageBody")]
    pub body: String,
}

/// Converted select result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectOutput {
    /// Dict shape
    Records(Vec<ConvertedRecord>),
    /// Queue message shape
    Messages(Vec<QueueEnvelope>),
}

impl SelectOutput {
    /// Number of converted rows
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Messages(messages) => messages.len(),
        }
    }

    /// Whether no rows were converted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dict conversion: select-list names as given, nulls as empty strings
///
/// # Errors
///
/// Returns `MalformedResultSet` if a row does not match the select list
pub fn to_records(result: &RawResultSet) -> DataResult<Vec<ConvertedRecord>> {
    check_shape(result)?;
    Ok(result
        .rows
        .iter()
        .map(|row| build_record(&result.columns, row, |name| name))
        .collect())
}

/// Queue message conversion with a freshly generated group id
///
/// # Errors
///
/// Returns `MalformedResultSet` if a row does not match the select list
pub fn to_queue_messages(result: &RawResultSet) -> DataResult<Vec<QueueEnvelope>> {
    to_queue_messages_with_group(result, Uuid::new_v4())
}

/// Queue message conversion with a caller-supplied group id
///
/// # Errors
///
/// Returns `MalformedResultSet` if a row does not match the select list, and
/// `Serialization` if a body cannot be encoded
pub fn to_queue_messages_with_group(
    result: &RawResultSet,
    group_id: Uuid,
) -> DataResult<Vec<QueueEnvelope>> {
    check_shape(result)?;
    let group_id = group_id.to_string();

    result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let body = build_record(&result.columns, row, unqualified).to_json_string()?;
            Ok(QueueEnvelope {
                id: (i + 1).to_string(),
                group_id: group_id.clone(),
                body,
            })
        })
        .collect()
}

/// `table.column` -> `column`
fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn build_record<'a>(
    columns: &'a [String],
    row: &[Field],
    key_for: impl Fn(&'a str) -> &'a str,
) -> ConvertedRecord {
    let mut record = ConvertedRecord::new();
    for (column, cell) in columns.iter().zip(row) {
        record.insert(key_for(column.as_str()), normalize(cell));
    }
    record
}

fn check_shape(result: &RawResultSet) -> DataResult<()> {
    let expected = result.columns.len();
    match result
        .rows
        .iter()
        .position(|row| row.len() != expected)
    {
        Some(row) => Err(DataLayerError::MalformedResultSet {
            row,
            expected,
            found: result.rows[row].len(),
        }),
        None => Ok(()),
    }
}

/// Null becomes `""`; other cells keep their carried value
fn normalize(cell: &Field) -> Value {
    match cell {
        Field::IsNull(_) => Value::String(String::new()),
        Field::StringValue(s) | Field::BlobValue(s) => Value::String(s.clone()),
        Field::LongValue(n) => Value::Number(Number::from(*n)),
        Field::DoubleValue(d) => {
            Number::from_f64(*d).map_or_else(|| Value::String(d.to_string()), Value::Number)
        }
        Field::BooleanValue(b) => Value::Bool(*b),
        Field::ArrayValue(array) => array.clone(),
    }
}
