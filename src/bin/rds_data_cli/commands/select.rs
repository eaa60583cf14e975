// ABOUTME: Select command
// ABOUTME: Builds a select query from command-line arguments and prints the converted rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use rds_data_layer::convert::OutputShape;
use rds_data_layer::statements::{SelectQuery, SortDirection};
use rds_data_layer::store::RdsDataStore;

/// Assemble a query from the optional clauses given on the command line
pub fn select_query(
    table: String,
    columns: Vec<String>,
    join: Option<(String, String)>,
    filter: Option<String>,
    sort_by: Vec<String>,
    sort: Option<SortDirection>,
) -> SelectQuery {
    let mut query = SelectQuery::new(table, columns);
    if let Some((join_table, condition)) = join {
        query = query.join(join_table, condition);
    }
    if let Some(filter) = filter {
        query = query.filter(filter);
    }
    if !sort_by.is_empty() {
        query = query.order_by(sort_by, sort);
    }
    query
}

/// Run the query and render the output shape as JSON
pub async fn select(store: &RdsDataStore, query: &SelectQuery, shape: OutputShape) -> Result<String> {
    let output = store.select(query, shape).await?;
    Ok(serde_json::to_string_pretty(&output)?)
}
