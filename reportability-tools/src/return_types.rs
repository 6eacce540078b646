//! Tool call return values.

use serde_json::Value as JsonValue;

use crate::errors::ToolError;

/// What a tool call produces on success.
///
/// Search tools and the `set_intent` tool return [`ToolReturn::Json`];
/// nothing in this roster needs a mixed text+image return, so the
/// original's richer multi-part return type is trimmed to the two
/// shapes actually used.
#[derive(Debug, Clone)]
pub enum ToolReturn {
    /// Plain text result.
    Text(String),
    /// Structured JSON result (the common case: search hits, citations).
    Json(JsonValue),
}

impl ToolReturn {
    /// Build a text return.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Build a JSON return.
    pub fn json(value: JsonValue) -> Self {
        Self::Json(value)
    }

    /// View this return as text, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(_) => None,
        }
    }

    /// Render this return as the string an LLM tool-result message
    /// carries, regardless of which variant it is.
    pub fn into_model_facing_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Json(v) => v.to_string(),
        }
    }
}

/// Outcome of one tool call.
pub type ToolResult = Result<ToolReturn, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_return_renders_as_its_string_form() {
        let ret = ToolReturn::json(serde_json::json!({"a": 1}));
        assert_eq!(ret.into_model_facing_string(), r#"{"a":1}"#);
    }

    #[test]
    fn text_return_is_returned_verbatim() {
        let ret = ToolReturn::text("hello");
        assert_eq!(ret.as_text(), Some("hello"));
    }
}
