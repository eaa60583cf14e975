// ABOUTME: Public entry points wiring schema, statement builder, binder, gateway and converter
// ABOUTME: insert, insert_many and select, each performing exactly one remote round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Store
//!
//! `RdsDataStore` is constructed explicitly with its registry and executor and passed
//! to whoever needs it; it holds no global state. Calls are independent of each other
//! and each statement commits or fails on its own.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::convert::{OutputShape, SelectOutput};
use crate::errors::{DataLayerError, DataResult, RemoteExecutionError};
use crate::gateway::{
    BatchExecuteStatementResponse, RawResultSet, RemoteExecutionResult, StatementExecutor,
};
use crate::logging::DataLogger;
use crate::parameters::{bind, bind_batch, Record};
use crate::schema::SchemaRegistry;
use crate::statements::{build_insert, build_select, SelectQuery};

/// Facade over the registry and an execution gateway
#[derive(Clone)]
pub struct RdsDataStore {
    registry: Arc<SchemaRegistry>,
    executor: Arc<dyn StatementExecutor>,
}

impl RdsDataStore {
    /// Create a store
    #[must_use]
    pub fn new(registry: Arc<SchemaRegistry>, executor: Arc<dyn StatementExecutor>) -> Self {
        Self { registry, executor }
    }

    /// Schema registry in use
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Insert one record into a registered table
    ///
    /// The statement and the parameters are both built from the schema's column order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable`, `MissingField` or `TypeMismatch` before any I/O, and
    /// `RemoteExecution` if the endpoint fails the statement
    pub async fn insert(&self, table: &str, record: &Record) -> DataResult<RemoteExecutionResult> {
        let schema = self.registry.table(table)?;
        let sql = build_insert(table, &schema.column_names());
        let parameters = bind(schema.columns(), record)?;
        debug!(%sql, parameters = parameters.len(), "Executing insert");

        let started = Instant::now();
        let response = self
            .executor
            .execute(&sql, Some(&parameters))
            .await
            .map_err(|e| failed("insert", table, e))?;

        DataLogger::log_statement(
            "insert",
            table,
            usize::try_from(response.number_of_records_updated).unwrap_or(0),
            elapsed_ms(started),
        );
        Ok(response)
    }

    /// Insert several records with one batch statement
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty batch, the first binding error of any
    /// record before any I/O, and `RemoteExecution` if the endpoint fails the batch
    pub async fn insert_many(
        &self,
        table: &str,
        records: &[Record],
    ) -> DataResult<BatchExecuteStatementResponse> {
        let schema = self.registry.table(table)?;
        if records.is_empty() {
            return Err(DataLayerError::invalid_argument(
                "batch insert needs at least one record",
            ));
        }
        let sql = build_insert(table, &schema.column_names());
        let parameter_sets = bind_batch(schema.columns(), records)?;
        debug!(%sql, parameter_sets = parameter_sets.len(), "Executing batch insert");

        let started = Instant::now();
        let response = self
            .executor
            .batch_execute(&sql, &parameter_sets)
            .await
            .map_err(|e| failed("insert_many", table, e))?;

        DataLogger::log_statement("insert_many", table, records.len(), elapsed_ms(started));
        Ok(response)
    }

    /// Run a select and convert the rows into the requested shape
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` before any I/O, `RemoteExecution` if the endpoint fails
    /// the statement, and `MalformedResultSet` if rows do not match the select list
    pub async fn select(&self, query: &SelectQuery, shape: OutputShape) -> DataResult<SelectOutput> {
        let result = self.select_raw(query).await?;
        let output = shape.convert(&result)?;
        debug!(shape = %shape, rows = output.len(), "Result set converted");
        Ok(output)
    }

    /// Run a select and return the unconverted rows paired with the select list
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` before any I/O and `RemoteExecution` if the endpoint
    /// fails the statement
    pub async fn select_raw(&self, query: &SelectQuery) -> DataResult<RawResultSet> {
        self.registry.table(&query.table)?;
        let sql = build_select(query);
        debug!(%sql, "Executing select");

        let started = Instant::now();
        let response = self
            .executor
            .execute(&sql, None)
            .await
            .map_err(|e| failed("select", &query.table, e))?;

        let result = RawResultSet::from_response(query.columns.clone(), response);
        DataLogger::log_statement("select", &query.table, result.len(), elapsed_ms(started));
        Ok(result)
    }
}

fn failed(operation: &str, table: &str, error: RemoteExecutionError) -> DataLayerError {
    DataLogger::log_statement_failure(operation, table, &error);
    DataLayerError::from(error)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
