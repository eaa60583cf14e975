// ABOUTME: Static registry mapping table names to ordered column descriptors
// ABOUTME: Source of truth for which columns exist and how their values are tagged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Schema Registry
//!
//! The registry is built once at startup (from code, the built-in default, or a JSON
//! document) and is read-only afterwards. Share it behind an `Arc`; it needs no locking.
//!
//! JSON documents map table names to ordered column lists:
//!
//! ```json
//! { "business": [ { "name": "cpid", "type": "string" } ] }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{DataLayerError, DataResult};
use crate::models::ColumnType;

/// Name of the table registered by default
pub const BUSINESS_TABLE: &str = "business";

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, also used as the placeholder name
    pub name: String,
    /// Declared value type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    /// Create a column descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Ordered columns of a single table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Table name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Column names in declaration order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Read-only mapping from table name to schema
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: HashMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Ordered column descriptors for a table
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if the table is not registered
    pub fn resolve_columns(&self, table: &str) -> DataResult<&[ColumnDescriptor]> {
        self.table(table).map(TableSchema::columns)
    }

    /// Full schema for a table
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if the table is not registered
    pub fn table(&self, table: &str) -> DataResult<&TableSchema> {
        self.tables
            .get(table)
            .ok_or_else(|| DataLayerError::unknown_table(table))
    }

    /// Whether a table is registered
    #[must_use]
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Registered table names, sorted
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a registry from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON and `InvalidArgument` for empty
    /// tables or duplicate columns
    pub fn from_json_str(document: &str) -> DataResult<Self> {
        let tables: HashMap<String, Vec<ColumnDescriptor>> = serde_json::from_str(document)
            .map_err(|source| DataLayerError::Serialization {
                context: "schema document",
                source,
            })?;

        tables
            .into_iter()
            .fold(Self::builder(), |builder, (name, columns)| {
                builder.table_columns(name, columns)
            })
            .build()
    }

    /// Load a registry from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the file cannot be read, otherwise the errors of
    /// [`SchemaRegistry::from_json_str`]
    pub fn from_file(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|e| {
            DataLayerError::invalid_argument(format!(
                "cannot read schema file {}: {e}",
                path.display()
            ))
        })?;
        let registry = Self::from_json_str(&document)?;
        debug!(
            path = %path.display(),
            tables = registry.tables.len(),
            "Schema registry loaded"
        );
        Ok(registry)
    }
}

impl Default for SchemaRegistry {
    /// Registry holding the `business` table
    fn default() -> Self {
        let columns = [
            "cpid",
            "business_name",
            "docomokouza_number",
            "access_key",
            "secret_access_key",
        ]
        .into_iter()
        .map(|name| ColumnDescriptor::new(name, ColumnType::String))
        .collect();

        let business = TableSchema {
            name: BUSINESS_TABLE.to_owned(),
            columns,
        };

        Self {
            tables: HashMap::from([(BUSINESS_TABLE.to_owned(), business)]),
        }
    }
}

/// Collects table definitions and validates them on `build`
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    tables: Vec<TableSchema>,
}

impl SchemaRegistryBuilder {
    /// Add a table from `(name, type)` pairs, in column order
    #[must_use]
    pub fn table<'a>(
        self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (&'a str, ColumnType)>,
    ) -> Self {
        let columns = columns
            .into_iter()
            .map(|(column, column_type)| ColumnDescriptor::new(column, column_type))
            .collect();
        self.table_columns(name, columns)
    }

    /// Add a table from prepared descriptors, in column order
    #[must_use]
    pub fn table_columns(mut self, name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.push(TableSchema {
            name: name.into(),
            columns,
        });
        self
    }

    /// Validate and freeze the registry
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a table registered twice, a table without
    /// columns, or a column declared twice in one table
    pub fn build(self) -> DataResult<SchemaRegistry> {
        let mut tables = HashMap::with_capacity(self.tables.len());

        for schema in self.tables {
            if schema.columns.is_empty() {
                return Err(DataLayerError::invalid_argument(format!(
                    "table '{}' declares no columns",
                    schema.name
                )));
            }

            let mut seen = HashSet::with_capacity(schema.columns.len());
            if let Some(dup) = schema.columns.iter().find(|c| !seen.insert(c.name.as_str())) {
                return Err(DataLayerError::invalid_argument(format!(
                    "column '{}' is declared twice in table '{}'",
                    dup.name, schema.name
                )));
            }

            if tables.contains_key(&schema.name) {
                return Err(DataLayerError::invalid_argument(format!(
                    "table '{}' is registered twice",
                    schema.name
                )));
            }
            tables.insert(schema.name.clone(), schema);
        }

        Ok(SchemaRegistry { tables })
    }
}
