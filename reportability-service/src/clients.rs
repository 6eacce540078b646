//! Concrete `ChatBackend`/`SearchBackend` adapters over Azure OpenAI and
//! Azure AI Search's REST APIs.
//!
//! Both trait interfaces are external-collaborator boundaries the engine
//! is built *against*, not specified components (spec.md §1). These
//! adapters are the thin binary-boundary glue that makes `main.rs`
//! runnable against a real deployment; they carry no orchestration logic
//! of their own.

use async_trait::async_trait;
use futures::stream::BoxStream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use reportability_agent::{BackendMessage, ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatStreamEvent, ToolCallRequest};
use reportability_core::usage::TokenUsage;
use reportability_search::{SearchBackend, SearchHit, SearchIndexConfig, SearchMode};

use crate::config::ChatBackendConfig;

/// Azure OpenAI chat-completions backend. Non-streaming only: the agent
/// kernel's `invoke_stream` path is not exercised by this workspace's
/// orchestration strategies (every agent runs to completion before its
/// fragments are forwarded to the client, per `runner.rs`), so `stream`
/// is implemented by wrapping one `complete` call rather than a real
/// server-sent-events client.
pub struct AzureChatBackend {
    http: Client,
    config: ChatBackendConfig,
}

impl AzureChatBackend {
    /// Build a backend around one shared `reqwest::Client`.
    pub fn new(http: Client, config: ChatBackendConfig) -> Self {
        Self { http, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }
}

#[derive(Serialize)]
struct OpenAiRequest {
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OpenAiTool>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
}

#[derive(Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: OpenAiFunction,
}

#[derive(Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<OpenAiToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type", default = "default_function_type")]
    kind: String,
    function: OpenAiToolCallFunction,
}

fn default_function_type() -> String {
    "function".to_string()
}

#[derive(Serialize, Deserialize)]
struct OpenAiToolCallFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: OpenAiUsage,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<OpenAiToolCall>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

fn to_openai_message(message: &BackendMessage) -> OpenAiMessage {
    match message {
        BackendMessage::System { content } => OpenAiMessage {
            role: "system",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        BackendMessage::User { content } => OpenAiMessage {
            role: "user",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        BackendMessage::Assistant { content, tool_calls } => OpenAiMessage {
            role: "assistant",
            content: content.clone(),
            tool_calls: tool_calls
                .iter()
                .map(|call| OpenAiToolCall {
                    id: call.id.clone(),
                    kind: default_function_type(),
                    function: OpenAiToolCallFunction {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
            tool_call_id: None,
        },
        BackendMessage::Tool { tool_call_id, content } => OpenAiMessage {
            role: "tool",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.clone()),
        },
    }
}

async fn complete(http: &Client, url: &str, api_key: &str, request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
    let body = OpenAiRequest {
        messages: request.messages.iter().map(to_openai_message).collect(),
        tools: request
            .tools
            .iter()
            .map(|tool| OpenAiTool {
                kind: "function",
                function: OpenAiFunction {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters_json_schema.clone(),
                },
            })
            .collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    };

    let response: OpenAiResponse = http.post(url).header("api-key", api_key).json(&body).send().await?.error_for_status()?.json().await?;

    let choice = response.choices.into_iter().next().ok_or_else(|| anyhow::anyhow!("backend returned no choices"))?;

    Ok(ChatCompletionResponse {
        content: choice.message.content,
        tool_calls: choice
            .message
            .tool_calls
            .into_iter()
            .map(|call| -> anyhow::Result<ToolCallRequest> {
                Ok(ToolCallRequest {
                    id: call.id,
                    name: call.function.name,
                    arguments: serde_json::from_str(&call.function.arguments)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?,
        usage: TokenUsage {
            prompt_tokens: response.usage.prompt_tokens,
            completion_tokens: response.usage.completion_tokens,
        },
    })
}

#[async_trait]
impl ChatBackend for AzureChatBackend {
    async fn complete(&self, request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
        complete(&self.http, &self.url(), &self.config.api_key, request).await
    }

    async fn stream(&self, request: ChatCompletionRequest) -> anyhow::Result<BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
        let response = complete(&self.http, &self.url(), &self.config.api_key, request).await?;
        let mut events = Vec::new();
        if let Some(content) = response.content {
            events.push(Ok(ChatStreamEvent::TextDelta(content)));
        }
        for call in response.tool_calls {
            events.push(Ok(ChatStreamEvent::ToolCallComplete(call)));
        }
        events.push(Ok(ChatStreamEvent::Done(response.usage)));
        Ok(Box::pin(futures::stream::iter(events)))
    }
}

/// Azure AI Search backend. One REST call per query, in the retrieval
/// mode named by the index's configuration.
pub struct AzureSearchBackend {
    http: Client,
    service_endpoint: String,
    api_key: String,
}

impl AzureSearchBackend {
    /// Build a backend around one shared `reqwest::Client` and the
    /// search service's base endpoint.
    pub fn new(http: Client, service_endpoint: String, api_key: String) -> Self {
        Self { http, service_endpoint, api_key }
    }
}

#[derive(Serialize)]
struct AzureSearchRequest {
    search: String,
    #[serde(skip_serializing_if = "Vec::is_empty", rename = "searchFields")]
    search_fields: Vec<String>,
    select: String,
    top: u32,
    #[serde(skip_serializing_if = "Option::is_none", rename = "vectorQueries")]
    vector_queries: Option<Vec<AzureVectorQuery>>,
}

#[derive(Serialize)]
struct AzureVectorQuery {
    kind: &'static str,
    text: String,
    fields: String,
    k: u32,
}

#[derive(Deserialize)]
struct AzureSearchResponse {
    value: Vec<AzureSearchHit>,
}

#[derive(Deserialize)]
struct AzureSearchHit {
    #[serde(rename = "@search.score")]
    score: f64,
    #[serde(flatten)]
    fields: Value,
}

#[async_trait]
impl SearchBackend for AzureSearchBackend {
    async fn query(&self, config: &SearchIndexConfig, query_text: &str) -> anyhow::Result<Vec<SearchHit>> {
        let vector_queries = match config.search_type {
            SearchMode::Vector | SearchMode::Hybrid => Some(
                config
                    .vector_fields
                    .iter()
                    .map(|field| AzureVectorQuery {
                        kind: "text",
                        text: query_text.to_string(),
                        fields: field.clone(),
                        k: config.k_nearest_neighbors,
                    })
                    .collect(),
            ),
            SearchMode::FullText => None,
        };

        let body = AzureSearchRequest {
            search: query_text.to_string(),
            search_fields: config.search_fields.clone(),
            select: config.select_fields.join(","),
            top: config.top,
            vector_queries,
        };

        let url = format!(
            "{}/indexes/{}/docs/search?api-version=2023-11-01",
            self.service_endpoint.trim_end_matches('/'),
            config.index_name
        );

        let response: AzureSearchResponse = self.http.post(url).header("api-key", &self.api_key).json(&body).send().await?.error_for_status()?.json().await?;

        Ok(response
            .value
            .into_iter()
            .map(|hit| SearchHit {
                id: hit.fields.get("id").and_then(Value::as_str).unwrap_or_default().to_string(),
                score: hit.score,
                fields: hit.fields,
            })
            .collect())
    }
}
