//! Agent-level error types.

use reportability_core::error::ReportabilityError;
use reportability_tools::ToolError;
use thiserror::Error;

/// Errors that can occur while an agent runs a turn.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The chat backend failed or returned something the agent could not
    /// use.
    #[error("chat backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// A tool call failed or the backend asked for a tool that does not
    /// exist.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    /// The backend kept requesting tool calls past the per-turn cap
    /// (spec.md §4.4's loop guard against a runaway tool-calling agent).
    #[error("tool-calling loop exceeded {0} turns without a final answer")]
    ToolLoopExceeded(usize),
}

impl From<AgentError> for ReportabilityError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Backend(source) => ReportabilityError::LlmTransient(source),
            AgentError::Tool(ToolError::ContractViolation(detail)) => {
                ReportabilityError::ToolContractViolation {
                    tool: "unknown".to_string(),
                    detail,
                }
            }
            AgentError::Tool(tool_err) => {
                ReportabilityError::ToolContractViolation {
                    tool: "unknown".to_string(),
                    detail: tool_err.message(),
                }
            }
            AgentError::ToolLoopExceeded(limit) => {
                ReportabilityError::Fatal(anyhow::anyhow!(
                    "tool-calling loop exceeded {limit} turns"
                ))
            }
        }
    }
}
