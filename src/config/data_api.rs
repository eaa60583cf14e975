// ABOUTME: Data API gateway configuration loaded once at process start
// ABOUTME: Resolves resource, secret and database identity from a parameter source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::sources::{EnvParameterSource, ParameterSource};
use crate::constants::endpoints::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::constants::env_keys;
use crate::errors::{DataLayerError, DataResult};

/// Keys looked up in a [`ParameterSource`]
///
/// Defaults to the `DATA_API_*` environment variable names; point them at parameter
/// store paths when loading from a parameter store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterKeys {
    /// Key of the cluster / resource identifier (required)
    pub resource_arn: String,
    /// Key of the credential identifier (required)
    pub secret_arn: String,
    /// Key of the database name (required)
    pub database: String,
    /// Key of the endpoint base URL (optional)
    pub endpoint: String,
    /// Key of the request timeout in seconds (optional)
    pub timeout_secs: String,
}

impl Default for ParameterKeys {
    fn default() -> Self {
        Self {
            resource_arn: env_keys::RESOURCE_ARN.to_owned(),
            secret_arn: env_keys::SECRET_ARN.to_owned(),
            database: env_keys::DATABASE.to_owned(),
            endpoint: env_keys::ENDPOINT.to_owned(),
            timeout_secs: env_keys::TIMEOUT_SECS.to_owned(),
        }
    }
}

/// Identity and transport settings of the execution gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataApiConfig {
    /// Cluster / resource identifier
    pub resource_arn: String,
    /// Credential (secret) identifier
    pub secret_arn: String,
    /// Database name
    pub database: String,
    /// Endpoint base URL
    pub endpoint: String,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl DataApiConfig {
    /// Configuration with the default endpoint and timeout
    #[must_use]
    pub fn new(
        resource_arn: impl Into<String>,
        secret_arn: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            resource_arn: resource_arn.into(),
            secret_arn: secret_arn.into(),
            database: database.into(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Override the endpoint base URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from a parameter source
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationUnavailable` naming the first required key that is missing
    /// or blank, and `InvalidArgument` if the timeout is not a whole number of seconds
    pub fn load(source: &dyn ParameterSource, keys: &ParameterKeys) -> DataResult<Self> {
        let resource_arn = required(source, &keys.resource_arn)?;
        let secret_arn = required(source, &keys.secret_arn)?;
        let database = required(source, &keys.database)?;

        let endpoint = optional(source, &keys.endpoint).unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        let timeout = match optional(source, &keys.timeout_secs) {
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    DataLayerError::invalid_argument(format!(
                        "Invalid {} value '{raw}': {e}",
                        keys.timeout_secs
                    ))
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let config = Self {
            resource_arn,
            secret_arn,
            database,
            endpoint,
            timeout,
        };
        info!("{}", config.summary());
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// See [`DataApiConfig::load`]
    pub fn from_env() -> DataResult<Self> {
        Self::load(&EnvParameterSource, &ParameterKeys::default())
    }

    /// One-line description safe for logs (identifiers are not credentials)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Data API configured: endpoint={}, database={}, resource={}, timeout={}",
            self.endpoint,
            self.database,
            self.resource_arn,
            self.timeout
                .map_or_else(|| "none".to_owned(), |t| format!("{}s", t.as_secs()))
        )
    }
}

fn required(source: &dyn ParameterSource, key: &str) -> DataResult<String> {
    optional(source, key).ok_or_else(|| DataLayerError::configuration_unavailable(key))
}

fn optional(source: &dyn ParameterSource, key: &str) -> Option<String> {
    source
        .fetch(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticParameterSource;
    use crate::errors::ErrorCode;

    fn complete_source() -> StaticParameterSource {
        StaticParameterSource::new()
            .with(env_keys::RESOURCE_ARN, "arn:aws:rds:region:1:cluster:db")
            .with(env_keys::SECRET_ARN, "arn:aws:secretsmanager:region:1:secret:db")
            .with(env_keys::DATABASE, "app")
    }

    #[test]
    fn test_load_with_defaults() {
        let config = DataApiConfig::load(&complete_source(), &ParameterKeys::default()).unwrap();
        assert_eq!(config.database, "app");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn test_missing_required_key() {
        let source = StaticParameterSource::new()
            .with(env_keys::RESOURCE_ARN, "arn")
            .with(env_keys::DATABASE, "app");
        let err = DataApiConfig::load(&source, &ParameterKeys::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationUnavailable);
        assert!(err.to_string().contains(env_keys::SECRET_ARN));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let source = complete_source().with(env_keys::DATABASE, "   ");
        let err = DataApiConfig::load(&source, &ParameterKeys::default()).unwrap_err();
        assert!(matches!(
            err,
            DataLayerError::ConfigurationUnavailable { ref key } if key == env_keys::DATABASE
        ));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let source = complete_source().with(env_keys::TIMEOUT_SECS, "0");
        let config = DataApiConfig::load(&source, &ParameterKeys::default()).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_invalid_timeout() {
        let source = complete_source().with(env_keys::TIMEOUT_SECS, "soon");
        let err = DataApiConfig::load(&source, &ParameterKeys::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_custom_keys() {
        let keys = ParameterKeys {
            resource_arn: "/app/arn/cluster".to_owned(),
            secret_arn: "/app/arn/secret".to_owned(),
            database: "/app/database".to_owned(),
            ..ParameterKeys::default()
        };
        let source: StaticParameterSource = [
            ("/app/arn/cluster", "c"),
            ("/app/arn/secret", "s"),
            ("/app/database", "d"),
        ]
        .into_iter()
        .collect();
        let config = DataApiConfig::load(&source, &keys).unwrap();
        assert_eq!(config.resource_arn, "c");
        assert_eq!(config.secret_arn, "s");
    }
}
