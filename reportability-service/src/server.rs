//! The HTTP surface: `POST /chat/stream` (C7's request dispatch) and
//! `GET /health` (C9).

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use reportability_core::error::ReportabilityError;
use reportability_core::messages::ChatRequest;
use reportability_orchestrator::{resolve_orchestration_type, run, OrchestrationType, OrchestratorDeps, Roster};
use reportability_search::{SearchConfigList, SearchPlugin};
use reportability_streaming::{error_frame, DeltaFramer};

use crate::config::AppConfig;

/// Shared state for every HTTP handler.
pub struct AppState {
    /// Process configuration, including the default orchestration type.
    pub config: Arc<AppConfig>,
    /// The roster every request's orchestration strategy runs against.
    pub roster: Arc<Roster>,
    /// The uniform search entry point.
    pub search: Arc<SearchPlugin>,
    /// Resolved per-index search configuration.
    pub search_config: Arc<SearchConfigList>,
}

/// Build the Axum router for this service.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat/stream", post(chat_stream))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct ChatStreamQuery {
    #[serde(rename = "orchestrationType")]
    orchestration_type: Option<String>,
    #[serde(default, rename = "evaluation")]
    evaluation: bool,
}

const FRAME_CONTENT_TYPE: &str = "text/event-stream";

/// `POST /chat/stream` — run the resolved orchestration strategy over
/// the request and stream the framer's output back as the response
/// body (spec.md §4.7, §6).
async fn chat_stream(State(state): State<Arc<AppState>>, Query(query): Query<ChatStreamQuery>, Json(body): Json<ChatRequest>) -> Response {
    if let Err(err) = body.validate() {
        return error_response(&err);
    }

    let kind = resolve_orchestration_type(query.orchestration_type.as_deref(), state.config.default_orchestration_type);
    let user_content = body.latest_user_content().unwrap_or_default().to_string();
    let session_state = body.session_state.clone();

    let deps = OrchestratorDeps::new(query.evaluation, Arc::clone(&state.search), Arc::clone(&state.search_config));
    let context = Arc::clone(&deps.context);

    let stream = run(kind, Arc::clone(&state.roster), deps, user_content);
    let framer = DeltaFramer::new(stream, context, session_state);
    let body = Body::from_stream(framer.map(Ok::<_, Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .body(body)
        .expect("a streaming body never fails to build")
        .into_response()
}

fn error_response(err: &ReportabilityError) -> Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, FRAME_CONTENT_TYPE)
        .body(Body::from(error_frame(err)))
        .expect("a single-frame error body never fails to build")
        .into_response()
}

/// `GET /health` — unconditional liveness probe (SPEC_FULL.md's C9
/// expansion): no per-request state is touched.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use reportability_agent::{ChatBackend, ChatCompletionRequest, ChatCompletionResponse, ChatStreamEvent};
    use reportability_core::messages::{ChatFile, ChatMessage, ChatRole};
    use reportability_core::usage::TokenUsage;
    use reportability_search::{SearchBackend, SearchHit, SearchIndexConfig};

    struct EchoBackend {
        reply: String,
    }

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn complete(&self, _request: ChatCompletionRequest) -> anyhow::Result<ChatCompletionResponse> {
            Ok(ChatCompletionResponse {
                content: Some(self.reply.clone()),
                tool_calls: Vec::new(),
                usage: TokenUsage { prompt_tokens: 10, completion_tokens: 5 },
            })
        }

        async fn stream(&self, _request: ChatCompletionRequest) -> anyhow::Result<futures::stream::BoxStream<'static, anyhow::Result<ChatStreamEvent>>> {
            let reply = self.reply.clone();
            Ok(Box::pin(futures::stream::iter(vec![
                Ok(ChatStreamEvent::TextDelta(reply)),
                Ok(ChatStreamEvent::Done(TokenUsage { prompt_tokens: 10, completion_tokens: 5 })),
            ])))
        }
    }

    struct EmptySearchBackend;

    #[async_trait]
    impl SearchBackend for EmptySearchBackend {
        async fn query(&self, _config: &SearchIndexConfig, _query_text: &str) -> anyhow::Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }
    }

    fn test_state() -> Arc<AppState> {
        let backend: Arc<dyn ChatBackend> = Arc::new(EchoBackend { reply: "ok".to_string() });
        let search_config = Arc::new(SearchConfigList::default());
        let search = Arc::new(SearchPlugin::new(Arc::new(EmptySearchBackend)));
        Arc::new(AppState {
            config: Arc::new(AppConfig {
                bind_address: "127.0.0.1:0".to_string(),
                default_orchestration_type: OrchestrationType::Single,
                sas_token_expiration_days: 1.0,
                log_level: "info".to_string(),
                chat_backend: crate::config::ChatBackendConfig {
                    endpoint: String::new(),
                    deployment: String::new(),
                    api_version: String::new(),
                    api_key: String::new(),
                },
                search_config: SearchConfigList::default(),
                telemetry_endpoint: None,
            }),
            roster: Arc::new(Roster::new(backend)),
            search,
            search_config,
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn empty_messages_yields_a_validation_error_frame() {
        let state = test_state();
        let request = ChatRequest {
            messages: Vec::new(),
            session_state: None,
            context: None,
        };
        let response = chat_stream(State(state), Query(ChatStreamQuery { orchestration_type: None, evaluation: false }), Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(bytes.strip_suffix(b"\r\n").unwrap_or(&bytes)).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION");
    }

    #[tokio::test]
    async fn well_formed_request_streams_frames_terminated_by_a_context_delta() {
        let state = test_state();
        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: ChatRole::User,
                content: Some("is this reportable?".to_string()),
                context: None,
                files: Vec::<ChatFile>::new(),
            }],
            session_state: None,
            context: None,
        };
        let response = chat_stream(State(state), Query(ChatStreamQuery { orchestration_type: Some("single".to_string()), evaluation: false }), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), FRAME_CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let frames: Vec<&[u8]> = bytes.strip_suffix(b"\r\n").unwrap_or(&bytes).split(|&b| b == b'\n').collect();
        let last: serde_json::Value = serde_json::from_slice(frames.last().unwrap().strip_suffix(b"\r").unwrap_or(frames.last().unwrap())).unwrap();
        assert!(last["context"].is_object());
    }
}
