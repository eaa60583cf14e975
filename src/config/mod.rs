// ABOUTME: Configuration management for the execution gateway and its parameter sources
// ABOUTME: Loads endpoint identity at startup and fails fast on missing values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! - **Data API**: resource, secret and database identity plus transport settings
//! - **Sources**: where startup values come from (environment, in-memory map)

/// Data API gateway configuration
pub mod data_api;
/// Parameter sources consulted at startup
pub mod sources;

pub use data_api::{DataApiConfig, ParameterKeys};
pub use sources::{EnvParameterSource, ParameterSource, StaticParameterSource};
