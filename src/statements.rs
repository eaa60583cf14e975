// ABOUTME: Pure SQL text builders for parameterized INSERT and clause-composed SELECT
// ABOUTME: No execution, no escaping; output is deterministic for a given input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Statement Builder
//!
//! Inserts use one named placeholder per column (`:name`) in the order given.
//! Selects compose `JOIN`, `WHERE` and `ORDER BY` in that fixed order.
//!
//! Join conditions and where clauses are inserted verbatim. They are never escaped or
//! validated, so they must not carry untrusted input. Only inserted values travel as
//! bound parameters.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DataLayerError;

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortDirection {
    /// SQL keyword
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortDirection {
    type Err = DataLayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(DataLayerError::invalid_argument(format!(
                "sort direction must be ASC or DESC, got '{other}'"
            ))),
        }
    }
}

/// Join target and its raw `ON` condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Joined table
    pub table: String,
    /// Raw condition text, inserted verbatim
    pub condition: String,
}

/// `ORDER BY` columns and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Sort columns, in priority order
    pub columns: Vec<String>,
    /// Direction applied after the column list
    pub direction: SortDirection,
}

/// Declarative description of a SELECT statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    /// Base table
    pub table: String,
    /// Select list; may contain table-qualified names when joining
    pub columns: Vec<String>,
    /// Optional join
    pub join: Option<Join>,
    /// Optional raw where clause, inserted verbatim
    pub filter: Option<String>,
    /// Optional ordering
    pub order_by: Option<OrderBy>,
}

impl SelectQuery {
    /// Select `columns` from `table`
    #[must_use]
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            join: None,
            filter: None,
            order_by: None,
        }
    }

    /// Add `JOIN <table> ON <condition>`
    #[must_use]
    pub fn join(mut self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.join = Some(Join {
            table: table.into(),
            condition: condition.into(),
        });
        self
    }

    /// Add `WHERE <clause>`
    #[must_use]
    pub fn filter(mut self, clause: impl Into<String>) -> Self {
        self.filter = Some(clause.into());
        self
    }

    /// Add `ORDER BY <columns> <direction>`; `None` means descending
    #[must_use]
    pub fn order_by<I, S>(mut self, columns: I, direction: Option<SortDirection>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = Some(OrderBy {
            columns: columns.into_iter().map(Into::into).collect(),
            direction: direction.unwrap_or_default(),
        });
        self
    }
}

/// Build `INSERT INTO <table> (<cols>) VALUE (<:cols>)`
///
/// Placeholders follow the order of `columns` exactly. The singular `VALUE` keyword
/// is what the target dialect has always received and is kept as is.
#[must_use]
pub fn build_insert<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let names = join_names(columns);
    let placeholders = columns
        .iter()
        .map(|c| format!(":{}", c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("INSERT INTO {table} ({names}) VALUE ({placeholders})")
}

/// Build the SELECT text for a query
#[must_use]
pub fn build_select(query: &SelectQuery) -> String {
    let mut sql = format!(
        "SELECT {} FROM {}",
        join_names(&query.columns),
        query.table
    );

    if let Some(join) = &query.join {
        sql.push_str(&format!(" JOIN {} ON {}", join.table, join.condition));
    }

    if let Some(filter) = &query.filter {
        sql.push_str(&format!(" WHERE {filter}"));
    }

    if let Some(order_by) = &query.order_by {
        sql.push_str(&format!(
            " ORDER BY {} {}",
            join_names(&order_by.columns),
            order_by.direction
        ));
    }

    sql
}

fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
