// ABOUTME: Re-exports the error taxonomy from rds-data-core for unified type identity
// ABOUTME: Ensures DataLayerError/RemoteExecutionError are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rds_data_core::errors::*;
