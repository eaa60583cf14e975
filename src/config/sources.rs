// ABOUTME: Parameter sources consulted when loading startup configuration
// ABOUTME: Environment-backed and in-memory implementations of ParameterSource
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::env;

/// Somewhere startup values can be looked up by key
///
/// Implementations return `None` for unknown keys; callers decide whether that is
/// fatal. A parameter store client can implement this by fetching (and decrypting)
/// each named parameter.
pub trait ParameterSource: Send + Sync {
    /// Value for `key`, if present
    fn fetch(&self, key: &str) -> Option<String>;
}

/// Reads keys from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvParameterSource;

impl ParameterSource for EnvParameterSource {
    fn fetch(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Fixed key/value map, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticParameterSource {
    values: HashMap<String, String>,
}

impl StaticParameterSource {
    /// Empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticParameterSource {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ParameterSource for StaticParameterSource {
    fn fetch(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
