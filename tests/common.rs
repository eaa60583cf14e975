// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, sample business records and a recording executor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `rds_data_layer`

use std::env;
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use rds_data_layer::errors::RemoteExecutionError;
use rds_data_layer::gateway::{
    BatchExecuteStatementResponse, ExecuteStatementResponse, RawRow, StatementExecutor,
    UpdateResult,
};
use rds_data_layer::models::TypedParameter;
use rds_data_layer::parameters::Record;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A complete `business` record
pub fn business_record(cpid: &str) -> Record {
    Record::new()
        .with("cpid", cpid)
        .with("business_name", "test")
        .with("docomokouza_number", "1234567")
        .with("access_key", "AKIAEXAMPLE")
        .with("secret_access_key", "secret")
}

/// One call seen by [`RecordingExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute {
        sql: String,
        parameters: Option<Vec<TypedParameter>>,
    },
    Batch {
        sql: String,
        parameter_sets: Vec<Vec<TypedParameter>>,
    },
}

/// Executor that records every call and answers with canned rows or a canned error
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    rows: Option<Vec<RawRow>>,
    failure: Option<RemoteExecutionError>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer selects with these rows
    pub fn returning(rows: Vec<RawRow>) -> Self {
        Self {
            rows: Some(rows),
            ..Self::default()
        }
    }

    /// Fail every call with this error
    pub fn failing(error: RemoteExecutionError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(
        &self,
        sql: &str,
        parameters: Option<&[TypedParameter]>,
    ) -> Result<ExecuteStatementResponse, RemoteExecutionError> {
        self.calls.lock().unwrap().push(Call::Execute {
            sql: sql.to_owned(),
            parameters: parameters.map(<[TypedParameter]>::to_vec),
        });
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(ExecuteStatementResponse {
            records: self.rows.clone(),
            number_of_records_updated: i64::from(parameters.is_some()),
            generated_fields: Vec::new(),
        })
    }

    async fn batch_execute(
        &self,
        sql: &str,
        parameter_sets: &[Vec<TypedParameter>],
    ) -> Result<BatchExecuteStatementResponse, RemoteExecutionError> {
        self.calls.lock().unwrap().push(Call::Batch {
            sql: sql.to_owned(),
            parameter_sets: parameter_sets.to_vec(),
        });
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(BatchExecuteStatementResponse {
            update_results: vec![UpdateResult::default(); parameter_sets.len()],
        })
    }
}
