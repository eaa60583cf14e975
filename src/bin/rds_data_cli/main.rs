// ABOUTME: rds-data-cli - command-line front end for the RDS data layer
// ABOUTME: Runs inserts, CSV bulk inserts and selects against the configured data API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Insert one record
//! rds-data-cli insert --table business --record '{"cpid":"0999","business_name":"test",...}'
//!
//! # Insert every row of a headerless CSV file in one batch
//! rds-data-cli insert-csv --table business --file businesses.csv
//!
//! # Select rows as queue message envelopes
//! rds-data-cli select --table business --columns cpid,business_name --shape queue
//! ```
//!
//! Connection settings come from the `DATA_API_*` environment variables.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rds_data_layer::config::DataApiConfig;
use rds_data_layer::convert::OutputShape;
use rds_data_layer::gateway::DataApiClient;
use rds_data_layer::logging::{self, LoggingConfig};
use rds_data_layer::schema::SchemaRegistry;
use rds_data_layer::statements::SortDirection;
use rds_data_layer::store::RdsDataStore;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "rds-data-cli",
    about = "RDS data layer CLI",
    long_about = "Insert records into and select rows from tables reachable through a remote data API."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Schema file (`{"table": [{"name": ..., "type": ...}]}`) replacing the built-in tables
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Insert one record given as a JSON object
    Insert {
        /// Target table
        #[arg(long)]
        table: String,

        /// Record as a JSON object; `null` values are sent as explicit nulls
        #[arg(long)]
        record: String,
    },

    /// Insert every row of a headerless CSV file in a single batch
    InsertCsv {
        /// Target table; its columns name the CSV fields in order
        #[arg(long)]
        table: String,

        /// CSV file to read
        #[arg(long)]
        file: PathBuf,
    },

    /// Select rows and print them in the requested shape
    Select {
        /// Source table
        #[arg(long)]
        table: String,

        /// Select list, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Table to join
        #[arg(long, requires = "join_condition")]
        join_table: Option<String>,

        /// Join condition, inserted verbatim
        #[arg(long, requires = "join_table")]
        join_condition: Option<String>,

        /// Where clause, inserted verbatim
        #[arg(long = "where")]
        filter: Option<String>,

        /// Columns to order by, comma separated
        #[arg(long, value_delimiter = ',')]
        sort_by: Vec<String>,

        /// Sort direction (asc or desc, default desc)
        #[arg(long)]
        sort: Option<SortDirection>,

        /// Output shape (dict or queue)
        #[arg(long, default_value = "dict")]
        shape: OutputShape,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let mut logging = LoggingConfig::from_env();
        logging.level = "debug".to_owned();
        logging.init()?;
    } else {
        logging::init_from_env()?;
    }

    let registry = match &cli.schema {
        Some(path) => SchemaRegistry::from_file(path)
            .with_context(|| format!("loading schema from {}", path.display()))?,
        None => SchemaRegistry::default(),
    };
    info!(tables = ?registry.table_names(), "Schema registry ready");

    let config = DataApiConfig::from_env()?;
    let client = DataApiClient::new(config)?;
    let store = RdsDataStore::new(Arc::new(registry), Arc::new(client));

    let output = match cli.command {
        Command::Insert { table, record } => commands::insert(&store, &table, &record).await?,
        Command::InsertCsv { table, file } => commands::insert_csv(&store, &table, &file).await?,
        Command::Select {
            table,
            columns,
            join_table,
            join_condition,
            filter,
            sort_by,
            sort,
            shape,
        } => {
            let join = join_table.zip(join_condition);
            let query = commands::select_query(table, columns, join, filter, sort_by, sort);
            commands::select(&store, &query, shape).await?
        }
    };

    println!("{output}");
    Ok(())
}
