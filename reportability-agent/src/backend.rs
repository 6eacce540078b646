//! The external chat-completion backend collaborator interface (C4's
//! "service binding"), analogous to the teacher's `Model` trait.
//!
//! A concrete implementation (an Azure OpenAI client, an Anthropic
//! client, whatever the deployment uses) lives outside this workspace —
//! spec.md §1 lists the chat-completion backend among the external
//! collaborators this engine is built around, not one it implements.

use async_trait::async_trait;
use futures::stream::BoxStream;
use reportability_core::usage::TokenUsage;
use reportability_tools::ToolDefinition;
use serde::{Deserialize, Serialize};

/// One message in the backend-facing turn history. Distinct from
/// `reportability_core::ChatMessage`: this shape also carries tool call
/// requests/results, which never appear on the client-facing wire
/// format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum BackendMessage {
    /// The system/developer instructions for this agent.
    System {
        /// Instruction text.
        content: String,
    },
    /// A user turn.
    User {
        /// Text content.
        content: String,
    },
    /// An assistant turn, possibly requesting tool calls.
    Assistant {
        /// Text content, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        /// Requested tool calls, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    /// The result of executing one tool call.
    Tool {
        /// Id of the call this result answers.
        tool_call_id: String,
        /// The tool's return value, rendered as a backend-facing string.
        content: String,
    },
}

/// One tool call the backend asked the agent to make.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Backend-assigned call id, echoed back in the matching `Tool` message.
    pub id: String,
    /// Name of the tool to call.
    pub name: String,
    /// Arguments, as parsed JSON.
    pub arguments: serde_json::Value,
}

/// One non-streaming chat-completion turn.
#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    /// Conversation so far, including the leading `System` instructions.
    pub messages: Vec<BackendMessage>,
    /// Tools available to the backend this turn.
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Output token cap, if any.
    pub max_tokens: Option<u64>,
}

/// The backend's response to one non-streaming turn.
#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    /// Text content, if the backend produced any (it may produce only
    /// tool calls).
    pub content: Option<String>,
    /// Tool calls requested this turn.
    pub tool_calls: Vec<ToolCallRequest>,
    /// Token usage for this one backend call.
    pub usage: TokenUsage,
}

/// One event in a streamed chat-completion turn.
#[derive(Debug, Clone)]
pub enum ChatStreamEvent {
    /// A fragment of assistant text.
    TextDelta(String),
    /// A tool call's arguments finished streaming and are ready to
    /// execute.
    ToolCallComplete(ToolCallRequest),
    /// The turn finished; carries this call's token usage.
    Done(TokenUsage),
}

/// A chat-completion backend. Implementations are process-wide and must
/// be safe for concurrent use — every agent and every request shares one
/// instance (spec.md §5).
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one non-streaming turn.
    async fn complete(&self, request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse>;

    /// Run one streamed turn.
    async fn stream(
        &self,
        request: ChatCompletionRequest,
    ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use futures::stream;

    /// A backend that always replies with fixed text and no tool calls,
    /// useful for agents that never call tools (e.g. Recommendation).
    pub struct EchoBackend {
        pub reply: String,
    }

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn complete(
            &self,
            _request: ChatCompletionRequest,
        ) -> anyhow::Result<ChatCompletionResponse> {
            Ok(ChatCompletionResponse {
                content: Some(self.reply.clone()),
                tool_calls: Vec::new(),
                usage: TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                },
            })
        }

        async fn stream(
            &self,
            _request: ChatCompletionRequest,
        ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            let events = vec![
                Ok(ChatStreamEvent::TextDelta(self.reply.clone())),
                Ok(ChatStreamEvent::Done(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                })),
            ];
            Ok(Box::pin(stream::iter(events)))
        }
    }

    /// A backend that requests exactly one tool call, then replies with
    /// fixed text on the next turn.
    pub struct ScriptedToolCallBackend {
        pub tool_name: String,
        pub arguments: serde_json::Value,
        pub final_reply: String,
    }

    #[async_trait]
    impl ChatBackend for ScriptedToolCallBackend {
        async fn complete(
            &self,
            request: ChatCompletionRequest,
        ) -> anyhow::Result<ChatCompletionResponse> {
            let already_called_tool = request.messages.iter().any(|m| matches!(m, BackendMessage::Tool { .. }));
            if already_called_tool {
                Ok(ChatCompletionResponse {
                    content: Some(self.final_reply.clone()),
                    tool_calls: Vec::new(),
                    usage: TokenUsage {
                        prompt_tokens: 20,
                        completion_tokens: 10,
                    },
                })
            } else {
                Ok(ChatCompletionResponse {
                    content: None,
                    tool_calls: vec![ToolCallRequest {
                        id: "call_1".to_string(),
                        name: self.tool_name.clone(),
                        arguments: self.arguments.clone(),
                    }],
                    usage: TokenUsage {
                        prompt_tokens: 15,
                        completion_tokens: 5,
                    },
                })
            }
        }

        async fn stream(
            &self,
            request: ChatCompletionRequest,
        ) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            let response = self.complete(request).await?;
            let mut events = Vec::new();
            if let Some(content) = response.content {
                events.push(Ok(ChatStreamEvent::TextDelta(content)));
            }
            for call in response.tool_calls {
                events.push(Ok(ChatStreamEvent::ToolCallComplete(call)));
            }
            events.push(Ok(ChatStreamEvent::Done(response.usage)));
            Ok(Box::pin(stream::iter(events)))
        }
    }
}
