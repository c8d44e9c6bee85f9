//! Chat request, upstream payload and reply types.

use serde::Serialize;
use serde_json::Value;

/// Model identifier sent with every upstream completion request.
pub const UPSTREAM_MODEL: &str = "llama-3.1-8b-instant";

/// System instruction placed ahead of the user's message.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI writing assistant.";

/// Prefix for replies produced when the upstream body carries no `choices`.
pub const UPSTREAM_ERROR_PREFIX: &str = "⚠️ Groq API error: ";

/// Prefix for replies produced when the call or the parse itself failed.
pub const EXCEPTION_PREFIX: &str = "⚠️ Exception: ";

/// Inbound chat request from the frontend.
///
/// `message` is whatever JSON value the caller sent; it is not type-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: Value,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            message: Value::String(String::new()),
        }
    }
}

impl ChatRequest {
    /// Create a request carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extract the request from a raw HTTP body.
    ///
    /// Never fails. A body that is not JSON, not an object, or has no
    /// `message` field yields an empty string. A present `message` is kept
    /// as-is, `null` and non-strings included.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|mut value| value.get_mut("message").map(Value::take))
            .map(Self::new)
            .unwrap_or_default()
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One `{role, content}` entry of the upstream payload.
///
/// `content` is a JSON value so a caller's non-string message reaches
/// upstream unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: Value,
}

/// Body of the outbound completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Build the two-message payload: the fixed system prompt, then the
    /// user's message verbatim.
    #[must_use]
    pub fn for_user_message(message: impl Into<Value>) -> Self {
        Self {
            model: UPSTREAM_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: MessageRole::System,
                    content: Value::from(SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: MessageRole::User,
                    content: message.into(),
                },
            ],
        }
    }

    /// Content of the user entry.
    #[must_use]
    pub fn user_content(&self) -> Option<&Value> {
        self.messages
            .iter()
            .find(|m| m.role == MessageRole::User)
            .map(|m| &m.content)
    }
}

/// Reply returned to the frontend on every path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
}

impl ChatReply {
    /// Reply carrying generated text.
    #[must_use]
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Reply for an upstream body that reported an error instead of choices.
    #[must_use]
    pub fn upstream_error(message: &str) -> Self {
        Self {
            response: format!("{UPSTREAM_ERROR_PREFIX}{message}"),
        }
    }

    /// Reply for a failed call or an unreadable upstream body.
    #[must_use]
    pub fn exception(description: &str) -> Self {
        Self {
            response: format!("{EXCEPTION_PREFIX}{description}"),
        }
    }
}
