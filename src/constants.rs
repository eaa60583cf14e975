// ABOUTME: Re-exports endpoint paths and configuration keys from rds-data-core
// ABOUTME: Single source of truth for constants shared by the gateway and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rds_data_core::constants::*;
