// ABOUTME: Headerless delimited text parsing into records for the insert path
// ABOUTME: Maps fields positionally onto a caller supplied header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Delimited text input
//!
//! Rows are mapped positionally onto `header`. A short row fills the remaining columns
//! with null. A row longer than the header rejects the whole input, returning no
//! records at all. Empty fields stay empty strings and blank lines are skipped.
//!
//! [`parse_typed_records`] additionally converts each field to its column's declared
//! type, so the records bind against tables with non-string columns. There an empty
//! field in a non-string column is null.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::errors::{DataLayerError, DataResult};
use crate::models::{ColumnType, ScalarValue};
use crate::parameters::Record;
use crate::schema::ColumnDescriptor;

/// Parse headerless delimited text into records keyed by `header`
///
/// # Errors
///
/// Returns `Csv` if the text is not valid delimited data
pub fn parse_records<S: AsRef<str>>(text: &str, header: &[S]) -> DataResult<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| DataLayerError::Csv {
            reason: e.to_string(),
        })?;
        if row.len() > header.len() {
            warn!(
                row = index + 1,
                fields = row.len(),
                expected = header.len(),
                "Row has more fields than the header, discarding input"
            );
            return Ok(Vec::new());
        }
        records.push(to_record(header, &row));
    }

    debug!(rows = records.len(), "Parsed delimited text");
    Ok(records)
}

/// Parse headerless delimited text against table columns, typing each field
///
/// # Errors
///
/// Returns `Csv` if the text is not valid delimited data or a field cannot be read as
/// its column's type
pub fn parse_typed_records(text: &str, columns: &[ColumnDescriptor]) -> DataResult<Vec<Record>> {
    let header: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    parse_records(text, &header)?
        .iter()
        .enumerate()
        .map(|(index, record)| typed_record(columns, record, index + 1))
        .collect()
}

/// Read a file and parse it with [`parse_typed_records`]
///
/// # Errors
///
/// Returns `Csv` if the file cannot be read, is not valid delimited data, or holds a
/// field that cannot be read as its column's type
pub fn parse_file(path: impl AsRef<Path>, columns: &[ColumnDescriptor]) -> DataResult<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| DataLayerError::Csv {
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    parse_typed_records(&text, columns)
}

fn to_record<S: AsRef<str>>(header: &[S], row: &StringRecord) -> Record {
    header
        .iter()
        .enumerate()
        .map(|(position, column)| {
            (
                column.as_ref(),
                row.get(position).map(ScalarValue::from),
            )
        })
        .collect()
}

fn typed_record(columns: &[ColumnDescriptor], record: &Record, row: usize) -> DataResult<Record> {
    columns
        .iter()
        .map(|column| {
            let value = match record.get(&column.name) {
                Some(Some(ScalarValue::String(raw))) => typed_value(column, raw, row)?,
                Some(other) => other.clone(),
                None => None,
            };
            Ok((column.name.as_str(), value))
        })
        .collect()
}

fn typed_value(column: &ColumnDescriptor, raw: &str, row: usize) -> DataResult<Option<ScalarValue>> {
    let trimmed = raw.trim();
    if column.column_type != ColumnType::String && trimmed.is_empty() {
        return Ok(None);
    }

    let value = match column.column_type {
        ColumnType::String => Some(ScalarValue::String(raw.to_owned())),
        ColumnType::Long => trimmed.parse().ok().map(ScalarValue::Long),
        ColumnType::Double => trimmed.parse().ok().map(ScalarValue::Double),
        ColumnType::Boolean => parse_bool(trimmed).map(ScalarValue::Boolean),
        ColumnType::Blob => Some(ScalarValue::Blob(raw.as_bytes().to_vec())),
    };

    value.map(Some).ok_or_else(|| DataLayerError::Csv {
        reason: format!(
            "row {row}, column '{}': '{raw}' is not a valid {}",
            column.name, column.column_type
        ),
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
