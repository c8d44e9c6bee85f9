//! Domain types for the relay.
//!
//! Everything here is transient: built per request and dropped once the
//! reply is written.

mod chat;

pub use chat::{
    ChatMessage, ChatReply, ChatRequest, CompletionRequest, EXCEPTION_PREFIX, MessageRole,
    SYSTEM_PROMPT, UPSTREAM_ERROR_PREFIX, UPSTREAM_MODEL,
};
