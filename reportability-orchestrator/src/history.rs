//! Small helpers for rendering and extending the context store's
//! append-only message log (spec.md §9's "append-only message log owned
//! by the context store" redesign note).

use reportability_core::messages::{ChatMessage, ChatRole};

use crate::deps::ContextHandle;

/// Render the conversation so far as a single dense block of text, fed to
/// the next agent's `invoke`/`invoke_stream` as its `user_content` — the
/// agent kernel's single-shot turn has no notion of a multi-message
/// history of its own, so the orchestrator flattens the context store's
/// log into one string each time it hands a turn to an agent.
pub(crate) fn render_transcript(context: &ContextHandle) -> String {
    context
        .lock()
        .message_history()
        .iter()
        .map(|message| {
            let role = match message.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
                ChatRole::System => "System",
            };
            format!("{role}: {}", message.content.as_deref().unwrap_or(""))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append one combined assistant turn to history. A no-op for empty text,
/// since an agent that only called tools and produced no prose has
/// nothing worth recording.
pub(crate) fn append_assistant_turn(context: &ContextHandle, text: &str) {
    if text.is_empty() {
        return;
    }
    context.lock().append_message(ChatMessage::text(ChatRole::Assistant, text));
}
