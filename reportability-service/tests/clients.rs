//! HTTP integration tests for the concrete backend adapters, against a
//! mocked Azure OpenAI / Azure AI Search server rather than the real
//! services.

use reportability_agent::{BackendMessage, ChatBackend, ChatCompletionRequest};
use reportability_search::{SearchBackend, SearchIndexConfig, SearchMode};
use reportability_service::config::ChatBackendConfig;
use reportability_service::{AzureChatBackend, AzureSearchBackend};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn chat_backend_parses_a_text_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o/chat/completions"))
        .and(header("api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "no reportability concerns", "tool_calls": []}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4},
        })))
        .mount(&server)
        .await;

    let backend = AzureChatBackend::new(
        reqwest::Client::new(),
        ChatBackendConfig {
            endpoint: server.uri(),
            deployment: "gpt-4o".to_string(),
            api_version: "2024-06-01".to_string(),
            api_key: "secret".to_string(),
        },
    );

    let response = backend
        .complete(ChatCompletionRequest {
            messages: vec![BackendMessage::User { content: "loose part found in reactor".to_string() }],
            tools: Vec::new(),
            temperature: 0.0,
            max_tokens: None,
        })
        .await
        .unwrap();

    assert_eq!(response.content, Some("no reportability concerns".to_string()));
    assert_eq!(response.usage.prompt_tokens, 12);
    assert_eq!(response.usage.completion_tokens, 4);
}

#[tokio::test]
async fn chat_backend_surfaces_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": null, "tool_calls": [
                {"id": "call_1", "type": "function", "function": {"name": "search_nureg", "arguments": "{\"query\":\"feedwater\"}"}},
            ]}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 8},
        })))
        .mount(&server)
        .await;

    let backend = AzureChatBackend::new(
        reqwest::Client::new(),
        ChatBackendConfig {
            endpoint: server.uri(),
            deployment: "gpt-4o".to_string(),
            api_version: "2024-06-01".to_string(),
            api_key: "secret".to_string(),
        },
    );

    let response = backend
        .complete(ChatCompletionRequest {
            messages: vec![BackendMessage::User { content: "feedwater event".to_string() }],
            tools: Vec::new(),
            temperature: 0.0,
            max_tokens: None,
        })
        .await
        .unwrap();

    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].name, "search_nureg");
    assert_eq!(response.tool_calls[0].arguments["query"], "feedwater");
}

#[tokio::test]
async fn search_backend_maps_hits_into_search_hit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/nureg-v1/docs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [
                {"@search.score": 0.92, "id": "doc-1", "title": "Section 3.2.1"},
            ],
        })))
        .mount(&server)
        .await;

    let backend = AzureSearchBackend::new(reqwest::Client::new(), server.uri(), "secret".to_string());

    let config = SearchIndexConfig {
        index_name_setting: "NUREG_INDEX".to_string(),
        index_name: "nureg-v1".to_string(),
        search_type: SearchMode::Hybrid,
        k_nearest_neighbors: 20,
        top: 5,
        search_fields: vec!["content".to_string()],
        select_fields: vec!["id".to_string(), "title".to_string()],
        vector_fields: vec!["embedding".to_string()],
        threshold: 0.5,
    };

    let hits = backend.query(&config, "feedwater isolation").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "doc-1");
    assert_eq!(hits[0].score, 0.92);
}
