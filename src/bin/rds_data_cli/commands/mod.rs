// ABOUTME: Subcommand implementations for rds-data-cli
// ABOUTME: Each command returns pretty printed JSON for stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod insert;
mod select;

pub use insert::{insert, insert_csv};
pub use select::{select, select_query};
