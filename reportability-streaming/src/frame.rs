//! The stream framer (C1, spec.md §4.1 / SPEC_FULL.md §4.1): turns an
//! orchestrator's lazy `AgentDelta` sequence into the wire's lazy byte-frame
//! sequence — one serialized [`StreamDelta`] followed by `\r\n` per frame.
//!
//! Grounded in the teacher's `agent_stream.rs` poll-based buffering state
//! machine: a pending-frame queue drained before polling the inner stream
//! again, so one inner item can produce zero, one, or two outbound frames
//! (a forced flush followed immediately by the terminal context frame).

use std::collections::VecDeque;
use std::env;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;

use reportability_core::document::PluginResult;
use reportability_core::error::ReportabilityError;
use reportability_core::messages::{ChatRole, ContextDelta, DocumentRef, ErrorDelta, MessageDelta, StreamDelta};
use reportability_orchestrator::{AgentDelta, ContextHandle};

/// Default per-role buffer size before a `MessageDelta` is flushed,
/// overridable via `STREAM_BUFFER_SIZE`. Read once at framer construction,
/// not per frame (spec.md §4.1).
const DEFAULT_STREAM_BUFFER_SIZE: usize = 5;

fn stream_buffer_size() -> usize {
    match env::var("STREAM_BUFFER_SIZE").ok().and_then(|value| value.parse::<usize>().ok()).filter(|&n| n > 0) {
        Some(size) => {
            tracing::debug!(size, "overriding default stream buffer size");
            size
        }
        None => DEFAULT_STREAM_BUFFER_SIZE,
    }
}

pin_project! {
    /// Adapts any `Stream<Item = AgentDelta>` — in practice an
    /// `OrchestratorStream` — into the HTTP response body: one
    /// `\r\n`-terminated JSON frame per item. Despite the `text/event-stream`
    /// MIME type this endpoint answers with, this is not true SSE — there is
    /// no `data: ` prefix or blank-line separator.
    pub struct DeltaFramer<S> {
        #[pin]
        inner: S,
        context: ContextHandle,
        session_state: Option<serde_json::Value>,
        buffer_size: usize,
        pending_role: Option<ChatRole>,
        pending_content: String,
        pending_count: usize,
        queue: VecDeque<Bytes>,
        done: bool,
    }
}

impl<S> DeltaFramer<S>
where
    S: Stream<Item = AgentDelta>,
{
    /// Wrap one orchestrator run's delta stream. `session_state` is echoed
    /// back verbatim from the originating request on every frame.
    pub fn new(inner: S, context: ContextHandle, session_state: Option<serde_json::Value>) -> Self {
        Self {
            inner,
            context,
            session_state,
            buffer_size: stream_buffer_size(),
            pending_role: None,
            pending_content: String::new(),
            pending_count: 0,
            queue: VecDeque::new(),
            done: false,
        }
    }
}

fn flush_buffer(
    pending_role: &mut Option<ChatRole>,
    pending_content: &mut String,
    pending_count: &mut usize,
    session_state: &Option<serde_json::Value>,
    queue: &mut VecDeque<Bytes>,
) {
    if *pending_count == 0 {
        return;
    }
    let role = pending_role.take().unwrap_or(ChatRole::Assistant);
    let content = std::mem::take(pending_content);
    *pending_count = 0;
    queue.push_back(encode(&StreamDelta::Message(MessageDelta {
        role,
        content,
        session_state: session_state.clone(),
    })));
}

fn handle_delta(
    delta: AgentDelta,
    pending_role: &mut Option<ChatRole>,
    pending_content: &mut String,
    pending_count: &mut usize,
    buffer_size: usize,
    session_state: &Option<serde_json::Value>,
    queue: &mut VecDeque<Bytes>,
) {
    // Empty-content fragments carry no text to buffer, but a `flush=true`
    // one still forces whatever is already pending out (spec.md §4.1).
    if delta.flags.yield_to_user && !delta.content.is_empty() {
        if pending_role.is_some_and(|role| role != delta.role) {
            flush_buffer(pending_role, pending_content, pending_count, session_state, queue);
        }
        *pending_role = Some(delta.role);
        pending_content.push_str(&delta.content);
        *pending_count += 1;
    }

    if delta.flags.flush || *pending_count >= buffer_size {
        flush_buffer(pending_role, pending_content, pending_count, session_state, queue);
    }
}

fn push_context_delta(context: &ContextHandle, session_state: &Option<serde_json::Value>, queue: &mut VecDeque<Bytes>) {
    let ctx = context.lock();
    let include_eval = ctx.include_eval_content();
    let documents = ctx
        .plugin_results()
        .filter(|result| result.cited || include_eval)
        .map(|result| to_document_ref(result, include_eval))
        .collect();

    let delta = if include_eval {
        ContextDelta {
            documents,
            recommendations: Some(ctx.recommendations().to_vec()),
            intent: Some(ctx.intent()),
            user_input_needed: Some(ctx.user_input_needed()),
            token_usage: Some(ctx.token_usage().clone()),
            session_state: session_state.clone(),
        }
    } else {
        ContextDelta {
            documents,
            recommendations: None,
            intent: None,
            user_input_needed: None,
            token_usage: None,
            session_state: session_state.clone(),
        }
    };
    drop(ctx);

    queue.push_back(encode(&StreamDelta::Context(delta)));
}

fn to_document_ref(result: &PluginResult, include_eval: bool) -> DocumentRef {
    DocumentRef {
        id: result.id.clone(),
        url: result.resolve_url(),
        section: result.display_value(),
        search_type: include_eval.then(|| result.search_type.clone()),
        search_query: include_eval.then(|| result.search_query.clone()),
        cited: include_eval.then_some(result.cited),
    }
}

fn encode(delta: &StreamDelta) -> Bytes {
    let mut buf = serde_json::to_vec(delta).expect("StreamDelta always serializes");
    buf.extend_from_slice(b"\r\n");
    Bytes::from(buf)
}

/// A single `ErrorDelta` frame, for errors surfaced outside an orchestrator
/// run entirely (request validation, dispatch failures) — the framer's own
/// pass-through of an in-flight orchestrator error is `DeltaFramer`'s own
/// end-of-stream path, since the orchestrator never sends a sentinel error
/// value onto its channel (failures within one agent turn are logged and
/// the roster continues, per spec.md §4.6's per-source isolation).
pub fn error_frame(err: &ReportabilityError) -> Bytes {
    encode(&StreamDelta::Error(ErrorDelta {
        code: err.kind(),
        message: err.to_string(),
    }))
}

impl<S> Stream for DeltaFramer<S>
where
    S: Stream<Item = AgentDelta>,
{
    type Item = Bytes;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            if let Some(frame) = this.queue.pop_front() {
                return Poll::Ready(Some(frame));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => {
                    flush_buffer(this.pending_role, this.pending_content, this.pending_count, this.session_state, this.queue);
                    push_context_delta(this.context, this.session_state, this.queue);
                    *this.done = true;
                }
                Poll::Ready(Some(delta)) => {
                    handle_delta(
                        delta,
                        this.pending_role,
                        this.pending_content,
                        this.pending_count,
                        *this.buffer_size,
                        this.session_state,
                        this.queue,
                    );
                }
            }
        }
    }
}
