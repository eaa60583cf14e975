// ABOUTME: Unified error taxonomy for schema, binding, execution and conversion failures
// ABOUTME: Defines DataLayerError, stable error codes and the DataResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Every failure in the data layer is raised at the point of detection and surfaced to
//! the caller unchanged. Nothing here retries or suppresses.

/// Errors reported by the remote execution endpoint
pub mod remote;

pub use remote::RemoteExecutionError;

use serde::{Deserialize, Serialize};

use crate::models::ColumnType;

/// Stable error codes, one per `DataLayerError` variant
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Table name not present in the schema registry
    UnknownTable,
    /// Record lacks a key for a declared column
    MissingField,
    /// Caller supplied an unusable argument
    InvalidArgument,
    /// Value does not match the declared column type
    TypeMismatch,
    /// Remote endpoint rejected or failed the statement
    RemoteExecution,
    /// Required startup configuration is missing
    ConfigurationUnavailable,
    /// Result rows do not line up with the select list
    MalformedResultSet,
    /// JSON encoding or decoding failed
    Serialization,
    /// Delimited text could not be read
    Csv,
}

impl ErrorCode {
    /// Short human readable description of the code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnknownTable => "Table is not registered",
            Self::MissingField => "Record is missing a declared column",
            Self::InvalidArgument => "Invalid argument",
            Self::TypeMismatch => "Value does not match the column type",
            Self::RemoteExecution => "Remote statement execution failed",
            Self::ConfigurationUnavailable => "Required configuration is missing",
            Self::MalformedResultSet => "Result set does not match the select list",
            Self::Serialization => "Serialization failed",
            Self::Csv => "Delimited text could not be read",
        }
    }
}

/// Unified error type for the data layer
#[derive(Debug, thiserror::Error)]
pub enum DataLayerError {
    /// Table name not present in the schema registry
    #[error("Unknown table: {table}")]
    UnknownTable {
        /// Requested table name
        table: String,
    },

    /// Record lacks a key for a declared column (a null value is not missing)
    #[error("Record is missing field '{column}'")]
    MissingField {
        /// Declared column with no key in the record
        column: String,
    },

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value does not match the declared column type
    #[error("Column '{column}' expects {expected} but the record holds {found}")]
    TypeMismatch {
        /// Column being bound
        column: String,
        /// Declared column type
        expected: ColumnType,
        /// Kind of value found in the record
        found: &'static str,
    },

    /// Remote endpoint rejected or failed the statement
    #[error(transparent)]
    RemoteExecution(#[from] RemoteExecutionError),

    /// Required startup configuration is missing
    #[error("Configuration unavailable: no value for '{key}'")]
    ConfigurationUnavailable {
        /// Key that could not be resolved
        key: String,
    },

    /// Result rows do not line up with the select list
    #[error("Malformed result set at row {row}: expected {expected} cells, found {found}")]
    MalformedResultSet {
        /// Zero-based row index
        row: usize,
        /// Number of selected columns
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization failed for {context}")]
    Serialization {
        /// What was being serialized
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Delimited text could not be read
    #[error("CSV error: {reason}")]
    Csv {
        /// Reader error message
        reason: String,
    },
}

impl DataLayerError {
    /// Unknown table
    #[must_use]
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }

    /// Missing record field
    #[must_use]
    pub fn missing_field(column: impl Into<String>) -> Self {
        Self::MissingField {
            column: column.into(),
        }
    }

    /// Invalid argument
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Missing configuration value
    #[must_use]
    pub fn configuration_unavailable(key: impl Into<String>) -> Self {
        Self::ConfigurationUnavailable { key: key.into() }
    }

    /// Stable code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownTable { .. } => ErrorCode::UnknownTable,
            Self::MissingField { .. } => ErrorCode::MissingField,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::RemoteExecution(_) => ErrorCode::RemoteExecution,
            Self::ConfigurationUnavailable { .. } => ErrorCode::ConfigurationUnavailable,
            Self::MalformedResultSet { .. } => ErrorCode::MalformedResultSet,
            Self::Serialization { .. } => ErrorCode::Serialization,
            Self::Csv { .. } => ErrorCode::Csv,
        }
    }
}

/// Result type alias for convenience
pub type DataResult<T> = Result<T, DataLayerError>;
