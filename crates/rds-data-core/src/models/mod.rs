// ABOUTME: Data model shared between binder, gateway and converter
// ABOUTME: Column types, application scalar values and tagged wire fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Declared column types
pub mod column_type;
/// Tagged wire field and typed parameter
pub mod field;
/// Application-side scalar values
pub mod value;

pub use column_type::ColumnType;
pub use field::{Field, TypedParameter};
pub use value::ScalarValue;
