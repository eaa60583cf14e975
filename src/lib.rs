// ABOUTME: Main library entry point for the RDS data layer
// ABOUTME: Schema-driven statements, typed parameters, remote execution and result shaping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # RDS Data Layer
//!
//! A thin SQL layer over a remote "data API" execution endpoint. Callers name a table
//! and hand over a record; the layer builds the statement text from a fixed schema,
//! binds values as typed parameters, executes the statement remotely and reshapes
//! tabular results into key/value records or queue message envelopes.
//!
//! ## Architecture
//!
//! - **schema**: registry of known tables and their ordered, typed columns
//! - **statements**: INSERT / SELECT text generation with named placeholders
//! - **parameters**: records and their binding into typed wire parameters
//! - **gateway**: the `StatementExecutor` seam and its HTTP implementation
//! - **convert**: Dict and `QueueMessage` result shapes
//! - **store**: the `RdsDataStore` facade tying the above together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rds_data_layer::config::DataApiConfig;
//! use rds_data_layer::convert::OutputShape;
//! use rds_data_layer::gateway::DataApiClient;
//! use rds_data_layer::schema::SchemaRegistry;
//! use rds_data_layer::statements::SelectQuery;
//! use rds_data_layer::store::RdsDataStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DataApiClient::new(DataApiConfig::from_env()?)?;
//!     let store = RdsDataStore::new(Arc::new(SchemaRegistry::default()), Arc::new(client));
//!
//!     let query = SelectQuery::new("business", ["cpid", "business_name"]);
//!     let output = store.select(&query, OutputShape::QueueMessage).await?;
//!     println!("{}", serde_json::to_string_pretty(&output)?);
//!     Ok(())
//! }
//! ```

/// Gateway configuration and the parameter sources it is loaded from
pub mod config;

/// Endpoint paths and configuration keys
pub mod constants;

/// Result set conversion into Dict records and queue message envelopes
pub mod convert;

/// Delimited text input for bulk inserts
pub mod csv_records;

/// Error taxonomy
pub mod errors;

/// Execution gateway contract and the HTTP data API client
pub mod gateway;

/// Structured logging setup and statement log events
pub mod logging;

/// Column types, scalar values and typed wire fields
pub mod models;

/// Records and parameter binding
pub mod parameters;

/// Table schema registry
pub mod schema;

/// INSERT and SELECT statement text generation
pub mod statements;

/// Facade running statements end to end
pub mod store;

pub use convert::{ConvertedRecord, OutputShape, QueueEnvelope, SelectOutput};
pub use errors::{DataLayerError, DataResult, ErrorCode, RemoteExecutionError};
pub use gateway::{DataApiClient, StatementExecutor};
pub use parameters::Record;
pub use schema::SchemaRegistry;
pub use statements::{SelectQuery, SortDirection};
pub use store::RdsDataStore;
