//! Closed error taxonomy for the reportability engine.
//!
//! Every error that can reach the HTTP boundary is one of the kinds below.
//! The mapping to HTTP status and `ErrorDelta.code` is fixed: `Validation`
//! is the only client error (400); everything else is a server error (500).

use serde::Serialize;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ReportabilityError>;

/// The closed set of error kinds the engine can surface.
///
/// Transient kinds (`SearchTransient`, `ToolContractViolation`,
/// `ConcurrentSourceFailure`) are usually caught and logged by the layer
/// that owns the retry/empty-result policy rather than propagated all the
/// way to the HTTP boundary; they exist here so that boundary still has a
/// name for them if one slips through uncaught.
#[derive(Debug, thiserror::Error)]
pub enum ReportabilityError {
    /// Malformed or empty request body (e.g. `messages` is empty).
    #[error("validation error: {0}")]
    Validation(String),

    /// A required configuration value was absent.
    #[error("missing configuration: {0}")]
    ConfigMissing(String),

    /// A search backend call failed transiently (timeout, 5xx, connection reset).
    #[error("search backend unavailable for index {index}: {source}")]
    SearchTransient {
        /// Logical index name being queried.
        index: String,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },

    /// The chat-completion backend failed or timed out.
    #[error("chat backend error: {0}")]
    LlmTransient(anyhow::Error),

    /// A tool call returned a result that violated its declared contract
    /// (e.g. non-JSON where JSON was required).
    #[error("tool '{tool}' violated its contract: {detail}")]
    ToolContractViolation {
        /// Name of the offending tool.
        tool: String,
        /// Human-readable description of the violation.
        detail: String,
    },

    /// The Extraction agent's output could not be parsed as a
    /// `Recommendation` array.
    #[error("extraction output invalid: {0}")]
    ExtractionInvalid(String),

    /// One source feeding the concurrent fan-in merge failed; the other
    /// source continues uninterrupted.
    #[error("concurrent source '{source_name}' failed: {cause}")]
    ConcurrentSourceFailure {
        /// Which fan-in source failed (e.g. agent display name).
        source_name: String,
        /// Underlying cause.
        cause: anyhow::Error,
    },

    /// Anything else: programmer error, panics converted to errors,
    /// irrecoverable I/O.
    #[error("internal error: {0}")]
    Fatal(anyhow::Error),
}

/// Stable machine-readable error code, independent of the error's
/// `Display` message. Used as `ErrorDelta.code` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// See [`ReportabilityError::Validation`].
    Validation,
    /// See [`ReportabilityError::ConfigMissing`].
    ConfigMissing,
    /// See [`ReportabilityError::SearchTransient`].
    SearchTransient,
    /// See [`ReportabilityError::LlmTransient`].
    LlmTransient,
    /// See [`ReportabilityError::ToolContractViolation`].
    ToolContractViolation,
    /// See [`ReportabilityError::ExtractionInvalid`].
    ExtractionInvalid,
    /// See [`ReportabilityError::ConcurrentSourceFailure`].
    ConcurrentSourceFailure,
    /// See [`ReportabilityError::Fatal`].
    Fatal,
}

impl ReportabilityError {
    /// The machine-readable kind, used for `ErrorDelta.code` and metrics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConfigMissing(_) => ErrorKind::ConfigMissing,
            Self::SearchTransient { .. } => ErrorKind::SearchTransient,
            Self::LlmTransient(_) => ErrorKind::LlmTransient,
            Self::ToolContractViolation { .. } => ErrorKind::ToolContractViolation,
            Self::ExtractionInvalid(_) => ErrorKind::ExtractionInvalid,
            Self::ConcurrentSourceFailure { .. } => ErrorKind::ConcurrentSourceFailure,
            Self::Fatal(_) => ErrorKind::Fatal,
        }
    }

    /// HTTP status code this error maps to. Only [`ErrorKind::Validation`]
    /// is a client error; every other kind that reaches the boundary is a
    /// 500, per the spec's error table.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            _ => 500,
        }
    }
}
