// ABOUTME: Core types for the RDS data layer
// ABOUTME: Foundation crate with the error taxonomy, typed wire fields, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # RDS Data Core
//!
//! Foundation crate shared by the statement builder, parameter binder, execution
//! gateway and result converter. It holds nothing that performs I/O.
//!
//! ## Modules
//!
//! - **errors**: `DataLayerError`, `RemoteExecutionError` and stable `ErrorCode`s
//! - **models**: column types, application scalars and the tagged wire `Field`
//! - **constants**: endpoint paths and configuration keys

/// Error taxonomy shared by every layer
pub mod errors;

/// Column types, scalar values and typed wire fields
pub mod models;

/// Endpoint paths and configuration keys
pub mod constants;
