// ABOUTME: Re-exports column types, scalars and wire fields from rds-data-core
// ABOUTME: Ensures Field/TypedParameter are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rds_data_core::models::*;
