// ABOUTME: Constants for the data API endpoint and configuration keys
// ABOUTME: Pure data constants organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Remote endpoint paths and operation names
pub mod endpoints {
    /// Single statement execution path
    pub const EXECUTE_PATH: &str = "/Execute";
    /// Batch statement execution path
    pub const BATCH_EXECUTE_PATH: &str = "/BatchExecute";
    /// Operation name reported in errors for single execution
    pub const EXECUTE_OPERATION: &str = "ExecuteStatement";
    /// Operation name reported in errors for batch execution
    pub const BATCH_EXECUTE_OPERATION: &str = "BatchExecuteStatement";
    /// Header carrying the remote error type
    pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
    /// Default endpoint when none is configured
    pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 45;
}

/// Environment variable names read at startup
pub mod env_keys {
    /// Cluster / resource identifier
    pub const RESOURCE_ARN: &str = "DATA_API_RESOURCE_ARN";
    /// Credential (secret) identifier
    pub const SECRET_ARN: &str = "DATA_API_SECRET_ARN";
    /// Database name
    pub const DATABASE: &str = "DATA_API_DATABASE";
    /// Endpoint base URL
    pub const ENDPOINT: &str = "DATA_API_ENDPOINT";
    /// Request timeout in seconds (`0` disables)
    pub const TIMEOUT_SECS: &str = "DATA_API_TIMEOUT_SECS";
}

/// Service identity used in logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const RDS_DATA_LAYER: &str = "rds-data-layer";
}
