// ABOUTME: Insert and CSV bulk insert commands
// ABOUTME: Parses caller input into records and runs them through the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::{bail, Context, Result};
use rds_data_layer::csv_records;
use rds_data_layer::parameters::Record;
use rds_data_layer::store::RdsDataStore;
use serde_json::Value;
use tracing::info;

/// Insert one record given as JSON text
pub async fn insert(store: &RdsDataStore, table: &str, record_json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(record_json).context("--record is not valid JSON")?;
    let record = Record::from_json(&value)?;

    let response = store.insert(table, &record).await?;
    info!(
        table,
        updated = response.number_of_records_updated,
        "Record inserted"
    );
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Insert all rows of a headerless CSV file, typed by the table's columns
pub async fn insert_csv(store: &RdsDataStore, table: &str, file: &Path) -> Result<String> {
    let columns = store.registry().table(table)?.columns();
    let records = csv_records::parse_file(file, columns)?;
    if records.is_empty() {
        bail!(
            "no records read from {} (empty, or a row has more than {} fields)",
            file.display(),
            columns.len()
        );
    }

    let response = store.insert_many(table, &records).await?;
    info!(table, rows = records.len(), "CSV rows inserted");
    Ok(serde_json::to_string_pretty(&response)?)
}
