//! Tool-specific error types.
//!
//! Trimmed from the original's approval/deferred-call/retry machinery:
//! this workspace's tools are all synchronous single-shot calls with no
//! human-in-the-loop approval step, so only the failure modes that
//! actually occur are kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool execution failed for a reason not covered below.
    #[error("tool execution failed: {0}")]
    ExecutionFailed(String),

    /// Invalid arguments provided to the tool.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool not found in registry.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The tool's result violated its declared contract (e.g. a
    /// search-returning tool produced non-JSON output).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors, typically from an external collaborator
    /// (`SearchBackend`, `ChatBackend`).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolError {
    /// Create an execution-failed error.
    #[must_use]
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create an invalid-arguments error.
    #[must_use]
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a contract-violation error.
    #[must_use]
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<String> for ToolError {
    fn from(s: String) -> Self {
        Self::execution_failed(s)
    }
}

impl From<&str> for ToolError {
    fn from(s: &str) -> Self {
        Self::execution_failed(s)
    }
}

/// Serializable error information for tool return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolErrorInfo {
    /// Error type/code.
    pub error_type: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&ToolError> for ToolErrorInfo {
    fn from(err: &ToolError) -> Self {
        let error_type = match err {
            ToolError::ExecutionFailed(_) => "execution_failed",
            ToolError::InvalidArguments(_) => "invalid_arguments",
            ToolError::NotFound(_) => "not_found",
            ToolError::ContractViolation(_) => "contract_violation",
            ToolError::Json(_) => "json_error",
            ToolError::Other(_) => "other",
        };

        Self {
            error_type: error_type.to_string(),
            message: err.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed() {
        let err = ToolError::execution_failed("Something went wrong");
        assert!(err.message().contains("Something went wrong"));
    }

    #[test]
    fn test_not_found() {
        let err = ToolError::not_found("unknown_tool");
        assert!(err.message().contains("unknown_tool"));
    }

    #[test]
    fn test_contract_violation() {
        let err = ToolError::contract_violation("expected JSON array");
        let info = ToolErrorInfo::from(&err);
        assert_eq!(info.error_type, "contract_violation");
    }

    #[test]
    fn test_from_string() {
        let err: ToolError = "error message".into();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }
}
