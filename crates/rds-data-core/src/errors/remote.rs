// ABOUTME: Error raised when the remote execution endpoint rejects or fails a statement
// ABOUTME: Formats messages in the remote client's conventional shape with retry info

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error code used when the request never reached the endpoint
pub const TRANSPORT_ERROR_CODE: &str = "TransportError";

/// Error code used when the request exceeded the configured timeout
pub const TIMEOUT_ERROR_CODE: &str = "Timeout";

/// Error code used when the endpoint answered with an unreadable body
pub const UNREADABLE_RESPONSE_CODE: &str = "UnreadableResponse";

/// Failure reported by (or while talking to) the remote execution endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub struct RemoteExecutionError {
    /// Remote error code, e.g. `BadRequestException`
    pub code: String,
    /// Remote error message
    pub message: String,
    /// Operation that was being called, e.g. `ExecuteStatement`
    pub operation: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Retry attempts reported by the endpoint once it gave up
    pub retry_attempts: Option<u32>,
}

impl RemoteExecutionError {
    /// Create an error for the given operation
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            operation: operation.into(),
            status: None,
            retry_attempts: None,
        }
    }

    /// Attach the HTTP status of the failed response
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Record that the endpoint exhausted its retries
    #[must_use]
    pub const fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    /// Transport-level failure (connection refused, TLS, ...)
    #[must_use]
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(operation, TRANSPORT_ERROR_CODE, message)
    }

    /// Request exceeded the configured timeout
    #[must_use]
    pub fn timeout(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(operation, TIMEOUT_ERROR_CODE, message)
    }

    fn retry_info(&self) -> String {
        self.retry_attempts
            .map_or_else(String::new, |n| format!(" (reached max retries: {n})"))
    }
}

impl fmt::Display for RemoteExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "An error occurred ({}) when calling the {} operation{}: {}",
            self.code,
            self.operation,
            self.retry_info(),
            self.message
        )
    }
}
