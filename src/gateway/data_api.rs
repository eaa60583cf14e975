// ABOUTME: HTTP client for the remote data API execution endpoint
// ABOUTME: Posts statements with a fixed resource/secret/database identity and maps remote errors

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Data API client
//!
//! Speaks the JSON protocol of the RDS Data API (`ExecuteStatement` and
//! `BatchExecuteStatement`). Requests are plain JSON POSTs to `<endpoint>/Execute` and
//! `<endpoint>/BatchExecute`; request signing is left to whatever sits in front of the
//! endpoint (a local data API emulator, or a signing proxy).
//!
//! # Example
//! ```rust,no_run
//! use rds_data_layer::config::DataApiConfig;
//! use rds_data_layer::gateway::{DataApiClient, StatementExecutor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DataApiClient::new(DataApiConfig::from_env()?)?;
//! let response = client.execute("SELECT 1", None).await?;
//! # Ok(())
//! # }
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BatchExecuteStatementResponse, ExecuteStatementResponse, StatementExecutor};
use crate::config::DataApiConfig;
use crate::constants::endpoints::{
    BATCH_EXECUTE_OPERATION, BATCH_EXECUTE_PATH, ERROR_TYPE_HEADER, EXECUTE_OPERATION,
    EXECUTE_PATH,
};
use crate::errors::remote::UNREADABLE_RESPONSE_CODE;
use crate::errors::{DataLayerError, DataResult, RemoteExecutionError};
use crate::models::TypedParameter;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteStatementRequest<'a> {
    resource_arn: &'a str,
    secret_arn: &'a str,
    database: &'a str,
    sql: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a [TypedParameter]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchExecuteStatementRequest<'a> {
    resource_arn: &'a str,
    secret_arn: &'a str,
    database: &'a str,
    sql: &'a str,
    parameter_sets: &'a [Vec<TypedParameter>],
}

/// Error body returned by the endpoint
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(alias = "Code", alias = "__type")]
    code: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
    #[serde(rename = "ResponseMetadata")]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(rename = "MaxAttemptsReached", default)]
    max_attempts_reached: bool,
    #[serde(rename = "RetryAttempts")]
    retry_attempts: Option<u32>,
}

/// Data API execution gateway over HTTP
///
/// Holds one `reqwest::Client`, which pools connections internally and is shared by
/// all concurrent calls.
#[derive(Debug, Clone)]
pub struct DataApiClient {
    config: DataApiConfig,
    http_client: Client,
}

impl DataApiClient {
    /// Create a client, applying the configured request timeout
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the HTTP client cannot be constructed
    pub fn new(config: DataApiConfig) -> DataResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            DataLayerError::invalid_argument(format!("cannot build HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(config: DataApiConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &DataApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.endpoint.trim_end_matches('/'))
    }

    async fn post<B, R>(&self, path: &str, operation: &str, body: &B) -> Result<R, RemoteExecutionError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteExecutionError::timeout(operation, e.to_string())
                } else {
                    RemoteExecutionError::transport(operation, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = remote_error(operation, response).await;
            warn!(
                data_api.operation = %operation,
                data_api.status = status.as_u16(),
                data_api.code = %error.code,
                "Data API call failed"
            );
            return Err(error);
        }

        let decoded = response.json::<R>().await.map_err(|e| {
            RemoteExecutionError::new(
                operation,
                UNREADABLE_RESPONSE_CODE,
                format!("response body could not be decoded: {e}"),
            )
            .with_status(status.as_u16())
        })?;

        debug!(
            data_api.operation = %operation,
            data_api.duration_ms = duration_ms(started.elapsed()),
            "Data API call completed"
        );
        Ok(decoded)
    }
}

#[async_trait]
impl StatementExecutor for DataApiClient {
    async fn execute(
        &self,
        sql: &str,
        parameters: Option<&[TypedParameter]>,
    ) -> Result<ExecuteStatementResponse, RemoteExecutionError> {
        debug!(
            sql = %sql,
            parameter_count = parameters.map_or(0, <[TypedParameter]>::len),
            "Executing statement"
        );
        let request = ExecuteStatementRequest {
            resource_arn: &self.config.resource_arn,
            secret_arn: &self.config.secret_arn,
            database: &self.config.database,
            sql,
            parameters,
        };
        self.post(EXECUTE_PATH, EXECUTE_OPERATION, &request).await
    }

    async fn batch_execute(
        &self,
        sql: &str,
        parameter_sets: &[Vec<TypedParameter>],
    ) -> Result<BatchExecuteStatementResponse, RemoteExecutionError> {
        debug!(
            sql = %sql,
            parameter_sets = parameter_sets.len(),
            "Executing batch statement"
        );
        let request = BatchExecuteStatementRequest {
            resource_arn: &self.config.resource_arn,
            secret_arn: &self.config.secret_arn,
            database: &self.config.database,
            sql,
            parameter_sets,
        };
        self.post(BATCH_EXECUTE_PATH, BATCH_EXECUTE_OPERATION, &request)
            .await
    }
}

/// Build a `RemoteExecutionError` from a non-success response
///
/// The code comes from the error-type header, then the body, then the HTTP status.
async fn remote_error(operation: &str, response: Response) -> RemoteExecutionError {
    let status = response.status();
    let header_code = response
        .headers()
        .get(ERROR_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(':').next())
        .map(str::to_owned);
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

    let code = header_code
        .or_else(|| body.code.as_deref().map(strip_type_namespace))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let message = body.message.unwrap_or(text);

    let error = RemoteExecutionError::new(operation, code, message).with_status(status.as_u16());
    match body.response_metadata {
        Some(ResponseMetadata {
            max_attempts_reached: true,
            retry_attempts: Some(attempts),
        }) => error.with_retry_attempts(attempts),
        _ => error,
    }
}

/// `com.amazonaws.rdsdata#BadRequestException` -> `BadRequestException`
fn strip_type_namespace(code: &str) -> String {
    code.rsplit('#').next().unwrap_or(code).to_owned()
}

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use serde_json::json;

    fn config() -> DataApiConfig {
        DataApiConfig::new("arn:cluster", "arn:secret", "app")
    }

    #[test]
    fn test_execute_request_omits_absent_parameters() {
        let request = ExecuteStatementRequest {
            resource_arn: "arn:cluster",
            secret_arn: "arn:secret",
            database: "app",
            sql: "SELECT 1",
            parameters: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "resourceArn": "arn:cluster",
                "secretArn": "arn:secret",
                "database": "app",
                "sql": "SELECT 1"
            })
        );
    }

    #[test]
    fn test_batch_request_shape() {
        let sets = vec![vec![TypedParameter::new("cpid", Field::null())]];
        let request = BatchExecuteStatementRequest {
            resource_arn: "r",
            secret_arn: "s",
            database: "d",
            sql: "INSERT",
            parameter_sets: &sets,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["parameterSets"],
            json!([[{"name": "cpid", "value": {"isNull": true}}]])
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let mut config = config();
        config.endpoint = "http://localhost:8080/".to_owned();
        let client = DataApiClient::with_http_client(config, Client::new());
        assert_eq!(client.url(EXECUTE_PATH), "http://localhost:8080/Execute");
    }

    #[test]
    fn test_strip_type_namespace() {
        assert_eq!(
            strip_type_namespace("com.amazonaws.rdsdata#BadRequestException"),
            "BadRequestException"
        );
        assert_eq!(strip_type_namespace("BadRequestException"), "BadRequestException");
    }
}
