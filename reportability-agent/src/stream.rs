//! Streaming agent execution.
//!
//! Mirrors the teacher's channel-backed `AgentStream`: a background task
//! drives the tool-calling loop and the backend's token stream, forwarding
//! events to the caller over an `mpsc` channel. Trimmed to the handful of
//! events an orchestrator actually needs to turn into `StreamDelta`
//! frames — there is no thinking-delta or per-part bookkeeping here, since
//! nothing in this roster surfaces reasoning traces to the client.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use reportability_core::usage::TokenUsage;
use reportability_tools::RunContext;
use tokio::sync::mpsc;

use crate::agent::{Agent, MAX_TOOL_TURNS};
use crate::backend::{BackendMessage, ChatCompletionRequest, ChatStreamEvent};
use crate::error::AgentError;

/// One event emitted while an agent streams a turn.
#[derive(Debug, Clone)]
pub enum AgentStreamEvent {
    /// A fragment of assistant text, ready to forward to the client.
    TextDelta(String),
    /// A tool call was requested and executed between streamed segments.
    ToolExecuted {
        /// Name of the tool that ran.
        tool_name: String,
        /// Whether it returned successfully.
        success: bool,
    },
    /// The turn finished successfully with this combined usage.
    Done(TokenUsage),
}

/// A running streamed agent turn.
pub struct AgentStream {
    rx: mpsc::Receiver<Result<AgentStreamEvent, AgentError>>,
}

impl AgentStream {
    /// Spawn the background task that drives one streamed `invoke`.
    pub(crate) fn spawn<Deps>(agent: Arc<Agent<Deps>>, ctx: RunContext<Deps>, user_content: String) -> Self
    where
        Deps: Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut history = vec![BackendMessage::User { content: user_content }];
            let mut total_usage = TokenUsage::default();

            for turn in 0..MAX_TOOL_TURNS {
                let streaming_last_turn = turn == MAX_TOOL_TURNS - 1;
                let mut messages = Vec::with_capacity(history.len() + 1);
                messages.push(BackendMessage::System {
                    content: agent.instructions.clone(),
                });
                messages.extend_from_slice(&history);

                let request = ChatCompletionRequest {
                    messages,
                    tools: agent.tool_set.definitions(),
                    temperature: agent.model_settings.temperature,
                    max_tokens: agent.model_settings.max_tokens,
                };

                let mut backend_stream = match agent.service_binding.stream(request).await {
                    Ok(stream) => stream,
                    Err(source) => {
                        let _ = tx.send(Err(AgentError::Backend(source))).await;
                        return;
                    }
                };

                let mut assistant_text = String::new();
                let mut tool_calls = Vec::new();

                while let Some(event) = backend_stream.next().await {
                    match event {
                        Ok(ChatStreamEvent::TextDelta(delta)) => {
                            assistant_text.push_str(&delta);
                            if tx.send(Ok(AgentStreamEvent::TextDelta(delta))).await.is_err() {
                                return;
                            }
                        }
                        Ok(ChatStreamEvent::ToolCallComplete(call)) => {
                            tool_calls.push(call);
                        }
                        Ok(ChatStreamEvent::Done(usage)) => {
                            total_usage += usage;
                        }
                        Err(source) => {
                            let _ = tx.send(Err(AgentError::Backend(source))).await;
                            return;
                        }
                    }
                }

                if tool_calls.is_empty() {
                    let _ = tx.send(Ok(AgentStreamEvent::Done(total_usage))).await;
                    return;
                }

                if streaming_last_turn {
                    let _ = tx
                        .send(Err(AgentError::ToolLoopExceeded(MAX_TOOL_TURNS)))
                        .await;
                    return;
                }

                history.push(BackendMessage::Assistant {
                    content: if assistant_text.is_empty() {
                        None
                    } else {
                        Some(assistant_text)
                    },
                    tool_calls: tool_calls.clone(),
                });

                for call in &tool_calls {
                    let tool_ctx = ctx.for_tool(call.name.clone(), Some(call.id.clone()));
                    let outcome = agent.tool_set.call(&call.name, &tool_ctx, call.arguments.clone()).await;
                    let (content, success) = match outcome {
                        Ok(ret) => (ret.into_model_facing_string(), true),
                        Err(err) => (format!("error: {}", err.message()), false),
                    };
                    if tx
                        .send(Ok(AgentStreamEvent::ToolExecuted {
                            tool_name: call.name.clone(),
                            success,
                        }))
                        .await
                        .is_err()
                    {
                        return;
                    }
                    history.push(BackendMessage::Tool {
                        tool_call_id: call.id.clone(),
                        content,
                    });
                }
            }
        });

        Self { rx }
    }
}

impl Stream for AgentStream {
    type Item = Result<AgentStreamEvent, AgentError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_recv(cx)
    }
}
