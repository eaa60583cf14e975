// ABOUTME: Execution gateway contract for running statements on the remote data API
// ABOUTME: Defines the StatementExecutor trait and the raw request/response shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Execution Gateway
//!
//! The gateway sends statement text and typed parameters to the remote endpoint and
//! hands back the raw tabular result. Failures surface as [`RemoteExecutionError`]
//! without any local retry. Every call is exactly one remote round trip.

/// HTTP client for the data API
pub mod data_api;

pub use data_api::DataApiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RemoteExecutionError;
use crate::models::{Field, TypedParameter};

/// One result row: cells in select-list order
pub type RawRow = Vec<Field>;

/// Response of a single statement execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementResponse {
    /// Result rows; absent for statements that return none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<RawRow>>,
    /// Rows affected by a data manipulation statement
    #[serde(default)]
    pub number_of_records_updated: i64,
    /// Values generated by the statement, e.g. auto-increment keys
    #[serde(default)]
    pub generated_fields: Vec<Field>,
}

/// Result returned to callers of the insert path
pub type RemoteExecutionResult = ExecuteStatementResponse;

/// Per-parameter-set outcome of a batch execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Values generated for this parameter set
    #[serde(default)]
    pub generated_fields: Vec<Field>,
}

/// Response of a batch execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExecuteStatementResponse {
    /// One entry per parameter set, in submission order
    #[serde(default)]
    pub update_results: Vec<UpdateResult>,
}

/// Rows of a select together with the select list that produced them
///
/// Cell `i` of every row corresponds to column `i`, including table-qualified names
/// from a join.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResultSet {
    /// Select list, in order
    pub columns: Vec<String>,
    /// Result rows, in the order returned by the endpoint
    pub rows: Vec<RawRow>,
}

impl RawResultSet {
    /// Pair rows with the select list
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Take the rows out of an execution response; no `records` means no rows
    #[must_use]
    pub fn from_response(columns: Vec<String>, response: ExecuteStatementResponse) -> Self {
        Self::new(columns, response.records.unwrap_or_default())
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs statements against a remote execution endpoint
///
/// Implementations carry their own fixed identity (resource, credential, database)
/// and must be safe to share across concurrent callers.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute one statement, optionally with bound parameters
    async fn execute(
        &self,
        sql: &str,
        parameters: Option<&[TypedParameter]>,
    ) -> Result<ExecuteStatementResponse, RemoteExecutionError>;

    /// Execute one statement once per parameter set, in a single round trip
    async fn batch_execute(
        &self,
        sql: &str,
        parameter_sets: &[Vec<TypedParameter>],
    ) -> Result<BatchExecuteStatementResponse, RemoteExecutionError>;
}
