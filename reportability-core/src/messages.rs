//! Chat wire types: requests, messages, and the streamed response delta.
//!
//! Field names follow the original implementation's camelCase wire
//! contract (`ChatRequest`/`ChatMessage`), resolved in `SPEC_FULL.md` §3.

use serde::{Deserialize, Serialize};

/// Who authored a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The end user.
    User,
    /// An agent's reply.
    Assistant,
    /// A system-level instruction (not used on the wire today, reserved
    /// for forward compatibility with the instructions layer).
    System,
}

/// An inline file attached to a [`ChatMessage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFile {
    /// MIME type of `data`, e.g. `"application/pdf"`.
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// Base64-encoded file contents.
    pub data: String,
}

/// One turn of conversation, either inbound from the client or produced
/// by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of this message.
    pub role: ChatRole,
    /// Text content. Never `None` for a well-formed request message, but
    /// `ContextDelta` frames synthesize a `ChatMessage` with no content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Freeform, opaque per-message context the client may attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    /// Inline attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ChatFile>,
}

impl ChatMessage {
    /// Build a plain user or assistant text message with no attachments.
    pub fn text(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            context: None,
            files: Vec::new(),
        }
    }
}

/// The request body for `POST /chat/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation history, oldest first. Must be non-empty.
    pub messages: Vec<ChatMessage>,
    /// Opaque passthrough token never interpreted by the engine.
    #[serde(rename = "sessionState", skip_serializing_if = "Option::is_none")]
    pub session_state: Option<serde_json::Value>,
    /// Opaque passthrough request-level context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Validate the request per spec.md §3 invariant: `messages` must be
    /// non-empty.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.messages.is_empty() {
            return Err(crate::error::ReportabilityError::Validation(
                "messages must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The most recent user message's text, if any. Used by agents that
    /// need "the current turn" rather than the full history.
    pub fn latest_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .and_then(|m| m.content.as_deref())
    }
}

/// Per-delta metadata controlling framing and history behavior.
///
/// Defaults match the common case: a fragment should be buffered normally
/// and, once flushed, appended to history as its own entry.
#[derive(Debug, Clone, Copy)]
pub struct DeltaFlags {
    /// Force a flush of the buffer after this fragment, even if the
    /// buffer has not reached its configured size.
    pub flush: bool,
    /// Whether this fragment should be sent to the client at all (some
    /// internal deltas exist purely to mutate history/usage state).
    pub yield_to_user: bool,
    /// Whether this fragment's content should be appended to the
    /// request-scoped message history.
    pub add_to_chat_history: bool,
    /// Whether this fragment should be concatenated onto the previous
    /// history entry rather than starting a new one.
    pub combine_before_adding_to_history: bool,
}

impl Default for DeltaFlags {
    fn default() -> Self {
        Self {
            flush: false,
            yield_to_user: true,
            add_to_chat_history: true,
            combine_before_adding_to_history: false,
        }
    }
}

/// A single referenced document surfaced in a [`ContextDelta`].
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRef {
    /// Plugin result id.
    pub id: String,
    /// Signed, time-limited URL to the source document.
    pub url: String,
    /// Display label (section/title), per [`crate::document::PluginResult::display_value`].
    pub section: String,
    /// Present only in eval mode.
    #[serde(rename = "searchType", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    /// Present only in eval mode.
    #[serde(rename = "searchQuery", skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Present only in eval mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cited: Option<bool>,
}

/// A non-terminal streamed fragment of assistant text.
///
/// Serializes as `{"delta": {"role": ..., "content": ...}, "sessionState":
/// ..., "context": null}` (SPEC_FULL.md §3's wire-format expansion,
/// resolved from the original implementation's `chat_models.py`): the
/// `delta`/`sessionState`/`context` envelope is shared with
/// [`ContextDelta`] so a client can treat every non-error frame uniformly
/// before checking whether `context` is null.
#[derive(Debug, Clone)]
pub struct MessageDelta {
    /// Author of the fragment (always [`ChatRole::Assistant`] on the wire
    /// today).
    pub role: ChatRole,
    /// The buffered text fragment.
    pub content: String,
    /// Echoed back from the originating request, unexamined.
    pub session_state: Option<serde_json::Value>,
}

impl Serialize for MessageDelta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_json::json!({
            "delta": {"role": self.role, "content": self.content},
            "sessionState": self.session_state,
            "context": serde_json::Value::Null,
        })
        .serialize(serializer)
    }
}

/// The terminal, successful end of a stream: referenced documents and,
/// in eval mode, the extra bookkeeping fields spec.md §4.1 names
/// (`recommendations`, `intent`, `user_input_needed`, `token_usage`).
///
/// Serializes as `{"delta": {"role": "assistant"}, "sessionState": ...,
/// "context": {"documents": [...], ...}}`; the eval-only fields are
/// omitted from `context` entirely outside eval mode rather than
/// serialized as `null`, matching [`DocumentRef`]'s own eval-only fields.
#[derive(Debug, Clone)]
pub struct ContextDelta {
    /// Documents cited or otherwise surfaced during the run.
    pub documents: Vec<DocumentRef>,
    /// Structured recommendations produced by the Extraction agent.
    /// Present only in eval mode.
    pub recommendations: Option<Vec<crate::recommendation::Recommendation>>,
    /// Intent classification. Present only in eval mode.
    pub intent: Option<crate::context::Intent>,
    /// Whether the orchestrator needs another turn of user input.
    /// Present only in eval mode.
    pub user_input_needed: Option<bool>,
    /// Per-agent token usage. Present only in eval mode.
    pub token_usage: Option<crate::usage::TokenUsageAccumulator>,
    /// Echoed back from the originating request, unexamined.
    pub session_state: Option<serde_json::Value>,
}

impl Serialize for ContextDelta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut context = serde_json::Map::new();
        context.insert(
            "documents".to_string(),
            serde_json::to_value(&self.documents).map_err(serde::ser::Error::custom)?,
        );
        if let Some(recommendations) = &self.recommendations {
            context.insert(
                "recommendations".to_string(),
                serde_json::to_value(recommendations).map_err(serde::ser::Error::custom)?,
            );
        }
        if let Some(intent) = self.intent {
            context.insert("intent".to_string(), serde_json::to_value(intent).map_err(serde::ser::Error::custom)?);
        }
        if let Some(needed) = self.user_input_needed {
            context.insert("userInputNeeded".to_string(), serde_json::Value::Bool(needed));
        }
        if let Some(usage) = &self.token_usage {
            context.insert(
                "tokenUsage".to_string(),
                serde_json::to_value(usage).map_err(serde::ser::Error::custom)?,
            );
        }

        serde_json::json!({
            "delta": {"role": ChatRole::Assistant},
            "sessionState": self.session_state,
            "context": serde_json::Value::Object(context),
        })
        .serialize(serializer)
    }
}

/// The terminal, failed end of a stream.
///
/// Serializes as `{"error": {"code": ..., "message": ...}}` — no
/// `delta`/`sessionState`/`context` envelope, matching the original's
/// `AIChatErrorResponse` shape and spec.md §6's literal example.
#[derive(Debug, Clone)]
pub struct ErrorDelta {
    /// Machine-readable error kind.
    pub code: crate::error::ErrorKind,
    /// Human-readable message, safe to display to a client.
    pub message: String,
}

impl Serialize for ErrorDelta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_json::json!({
            "error": {"code": self.code, "message": self.message},
        })
        .serialize(serializer)
    }
}

/// The tagged union streamed as successive frames of the response body.
/// Exactly one terminal frame (`ContextDelta` or `ErrorDelta`) closes any
/// given stream; it is never both, and never neither.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StreamDelta {
    /// Non-terminal text fragment.
    Message(MessageDelta),
    /// Terminal success frame.
    Context(ContextDelta),
    /// Terminal failure frame.
    Error(ErrorDelta),
}

impl StreamDelta {
    /// Whether this frame ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Context(_) | Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_rejects_empty_messages() {
        let req = ChatRequest {
            messages: Vec::new(),
            session_state: None,
            context: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn chat_request_accepts_nonempty_messages() {
        let req = ChatRequest {
            messages: vec![ChatMessage::text(ChatRole::User, "hello")],
            session_state: None,
            context: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn latest_user_content_finds_most_recent_user_turn() {
        let req = ChatRequest {
            messages: vec![
                ChatMessage::text(ChatRole::User, "first"),
                ChatMessage::text(ChatRole::Assistant, "reply"),
                ChatMessage::text(ChatRole::User, "second"),
            ],
            session_state: None,
            context: None,
        };
        assert_eq!(req.latest_user_content(), Some("second"));
    }

    #[test]
    fn delta_flags_default_to_normal_buffered_history_append() {
        let flags = DeltaFlags::default();
        assert!(!flags.flush);
        assert!(flags.yield_to_user);
        assert!(flags.add_to_chat_history);
        assert!(!flags.combine_before_adding_to_history);
    }

    #[test]
    fn only_context_and_error_deltas_are_terminal() {
        let message = StreamDelta::Message(MessageDelta {
            role: ChatRole::Assistant,
            content: "hi".into(),
            session_state: None,
        });
        assert!(!message.is_terminal());

        let context = StreamDelta::Context(minimal_context_delta());
        assert!(context.is_terminal());
    }

    fn minimal_context_delta() -> ContextDelta {
        ContextDelta {
            documents: Vec::new(),
            recommendations: None,
            intent: None,
            user_input_needed: None,
            token_usage: None,
            session_state: None,
        }
    }

    #[test]
    fn message_delta_wraps_role_and_content_in_a_delta_envelope() {
        let delta = MessageDelta {
            role: ChatRole::Assistant,
            content: "hello".into(),
            session_state: Some(serde_json::json!("token")),
        };
        let value = serde_json::to_value(&delta).unwrap();
        assert_eq!(value["delta"]["role"], "assistant");
        assert_eq!(value["delta"]["content"], "hello");
        assert_eq!(value["sessionState"], "token");
        assert!(value["context"].is_null());
    }

    #[test]
    fn context_delta_omits_eval_only_fields_outside_eval_mode() {
        let value = serde_json::to_value(minimal_context_delta()).unwrap();
        assert!(value["context"]["documents"].is_array());
        assert!(value["context"].get("recommendations").is_none());
        assert!(value["context"].get("intent").is_none());
        assert!(value["context"].get("userInputNeeded").is_none());
        assert!(value["context"].get("tokenUsage").is_none());
    }

    #[test]
    fn context_delta_includes_eval_only_fields_when_present() {
        let delta = ContextDelta {
            documents: Vec::new(),
            recommendations: Some(Vec::new()),
            intent: Some(crate::context::Intent::Reportability),
            user_input_needed: Some(false),
            token_usage: Some(crate::usage::TokenUsageAccumulator::new()),
            session_state: None,
        };
        let value = serde_json::to_value(delta).unwrap();
        assert_eq!(value["context"]["intent"], "reportability");
        assert_eq!(value["context"]["userInputNeeded"], false);
        assert!(value["context"]["tokenUsage"].is_object());
    }

    #[test]
    fn error_delta_has_no_delta_or_session_state_envelope() {
        let delta = ErrorDelta {
            code: crate::error::ErrorKind::Validation,
            message: "messages must not be empty".into(),
        };
        let value = serde_json::to_value(delta).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION");
        assert_eq!(value["error"]["message"], "messages must not be empty");
        assert!(value.get("delta").is_none());
        assert!(value.get("sessionState").is_none());
    }
}
